//! Content elicitation.

use tracing::debug;

use smith_schema::Rule;

use crate::error::CoreResult;
use crate::node::Node;
use crate::prompt::Prompter;

/// Populates a node's content from its rule.
pub struct ContentFiller;

impl ContentFiller {
    /// Ask for the node's content unless the rule forbids it.
    ///
    /// Required content is asked for again until it is supplied. An empty
    /// answer to optional content leaves the content absent.
    pub fn fill(
        node: &mut Node,
        rule: &Rule,
        prompter: &mut dyn Prompter,
    ) -> CoreResult<Option<String>> {
        if rule.content_forbidden() {
            return Ok(None);
        }

        let required = rule.content_required();
        let allowed = &rule.content.allowed_values;
        let prompt = format!(
            "Content for {}{}: ",
            node.name,
            if required { " (*)" } else { "" }
        );

        loop {
            let value = if allowed.is_empty() {
                prompter.read_text(&prompt)?
            } else {
                prompter.read_text_with_choices(&prompt, required, allowed)?
            };

            if value.is_empty() {
                if required {
                    prompter.say(&format!("Content is required for {}.", node.name))?;
                    continue;
                }
                return Ok(None);
            }

            if !allowed.is_empty() && !allowed.contains(&value) {
                debug!("Rejected content {:?} for {}", value, node.name);
                continue;
            }

            node.set_content(value.clone());
            return Ok(Some(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompter;
    use smith_schema::ContentRule;

    #[test]
    fn test_empty_content_rule_reads_nothing() {
        let rule = Rule::new("br").with_content_rule(ContentRule::EmptyContent);
        let mut node = Node::new("br");
        let mut prompter = LinePrompter::scripted(Vec::<String>::new());

        assert_eq!(ContentFiller::fill(&mut node, &rule, &mut prompter).unwrap(), None);
        assert_eq!(node.content, None);
    }

    #[test]
    fn test_required_content_retries() {
        let rule = Rule::new("leaf").with_content_rule(ContentRule::NonEmptyContent);
        let mut node = Node::new("leaf");
        let mut prompter = LinePrompter::scripted(["", "", "hello"]);

        let content = ContentFiller::fill(&mut node, &rule, &mut prompter).unwrap();
        assert_eq!(content.as_deref(), Some("hello"));
        assert_eq!(node.content(), Some("hello"));
    }

    #[test]
    fn test_content_keeps_surrounding_whitespace() {
        let rule = Rule::new("leaf").with_content_rule(ContentRule::NonEmptyContent);
        let mut node = Node::new("leaf");
        let mut prompter = LinePrompter::scripted(["  hello world  "]);

        ContentFiller::fill(&mut node, &rule, &mut prompter).unwrap();
        assert_eq!(node.content(), Some("  hello world  "));
    }

    #[test]
    fn test_optional_content_may_be_skipped() {
        let rule = Rule::new("note");
        let mut node = Node::new("note");
        let mut prompter = LinePrompter::scripted([""]);

        assert_eq!(ContentFiller::fill(&mut node, &rule, &mut prompter).unwrap(), None);
        assert_eq!(node.content, None);
    }

    #[test]
    fn test_enumerated_content() {
        let rule = Rule::new("organization").with_content_values(["LTER", "NCEAS"]);
        let mut node = Node::new("organization");
        let mut prompter = LinePrompter::scripted(["", "USGS", "NCEAS"]);

        ContentFiller::fill(&mut node, &rule, &mut prompter).unwrap();
        assert_eq!(node.content(), Some("NCEAS"));
    }

    #[test]
    fn test_required_content_without_answer_is_exhausted() {
        let rule = Rule::new("leaf").with_content_rule(ContentRule::NonEmptyContent);
        let mut node = Node::new("leaf");
        let mut prompter = LinePrompter::scripted([""]);

        let err = ContentFiller::fill(&mut node, &rule, &mut prompter).unwrap_err();
        assert!(matches!(err, crate::error::CoreError::InputExhausted));
    }
}
