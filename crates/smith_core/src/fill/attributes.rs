//! Attribute elicitation.

use tracing::debug;

use smith_schema::{AttributeSpec, Rule};

use crate::error::CoreResult;
use crate::node::Node;
use crate::prompt::Prompter;

/// Populates a node's attributes in the rule's declared order.
pub struct AttributeFiller;

impl AttributeFiller {
    /// Ask for every declared attribute until each answer is acceptable.
    ///
    /// Empty answers are never stored, so an absent attribute means
    /// "not provided".
    pub fn fill(node: &mut Node, rule: &Rule, prompter: &mut dyn Prompter) -> CoreResult<()> {
        if rule.attributes.is_empty() {
            return Ok(());
        }

        prompter.say(&format!(
            "Please supply attribute values for the {} node. (*) indicates required",
            node.name
        ))?;

        for attribute in &rule.attributes {
            let prompt = if attribute.required {
                format!("{} (*): ", attribute.name)
            } else {
                format!("{}: ", attribute.name)
            };

            let value = loop {
                let value = if attribute.is_enumerated() {
                    prompter.read_text_with_choices(
                        &prompt,
                        attribute.required,
                        &attribute.allowed_values,
                    )?
                } else {
                    prompter.read_text(&prompt)?
                };

                if Self::accepts(attribute, &value) {
                    break value;
                }
                debug!("Rejected {:?} for attribute {}", value, attribute.name);
                prompter.say(&format!("Invalid value for {}.", attribute.name))?;
            };

            if !value.is_empty() {
                node.set_attribute(&attribute.name, value);
            }
        }

        Ok(())
    }

    /// Whether `value` may be taken for `attribute`.
    pub fn accepts(attribute: &AttributeSpec, value: &str) -> bool {
        if value.is_empty() {
            return !attribute.required;
        }
        !attribute.is_enumerated() || attribute.allowed_values.iter().any(|v| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompter;

    fn dataset_rule() -> Rule {
        Rule::new("dataset")
            .with_attribute(AttributeSpec::new("id"))
            .with_attribute(AttributeSpec::new("packageId").required())
            .with_attribute(AttributeSpec::new("system").with_allowed_values(["doi", "knb"]))
    }

    #[test]
    fn test_accepts() {
        let free = AttributeSpec::new("id");
        let required = AttributeSpec::new("id").required();
        let enumerated = AttributeSpec::new("system").with_allowed_values(["doi"]);

        assert!(AttributeFiller::accepts(&free, ""));
        assert!(!AttributeFiller::accepts(&required, ""));
        assert!(AttributeFiller::accepts(&enumerated, ""));
        assert!(AttributeFiller::accepts(&enumerated, "doi"));
        assert!(!AttributeFiller::accepts(&enumerated, "ark"));
        assert!(!AttributeFiller::accepts(&required.with_allowed_values(["doi"]), ""));
    }

    #[test]
    fn test_fill_stores_only_non_empty_values() {
        let mut node = Node::new("dataset");
        let mut prompter = LinePrompter::scripted(["", "pkg.1", "knb"]);

        AttributeFiller::fill(&mut node, &dataset_rule(), &mut prompter).unwrap();

        assert_eq!(node.attribute("id"), None);
        assert_eq!(node.attribute("packageId"), Some("pkg.1"));
        assert_eq!(node.attribute("system"), Some("knb"));
    }

    #[test]
    fn test_required_attribute_reprompts() {
        let mut node = Node::new("dataset");
        let mut prompter = LinePrompter::scripted(["", "", "", "pkg.2", ""]);

        AttributeFiller::fill(&mut node, &dataset_rule(), &mut prompter).unwrap();

        assert_eq!(node.attribute("packageId"), Some("pkg.2"));
        assert_eq!(node.attributes.len(), 1);
    }

    #[test]
    fn test_no_attributes_reads_nothing() {
        let mut node = Node::new("leaf");
        let mut prompter = LinePrompter::scripted(Vec::<String>::new());

        AttributeFiller::fill(&mut node, &Rule::new("leaf"), &mut prompter).unwrap();
        assert!(node.attributes.is_empty());
    }
}
