//! Validation of completed nodes against their rules.

use smith_schema::{RuleProvider, ValidationResult};

use crate::error::{CoreError, CoreResult};
use crate::node::Node;

/// Validator for node trees.
pub struct NodeValidator;

impl NodeValidator {
    /// Check a whole tree against the rules of every node type in it.
    pub fn validate(node: &Node, rules: &dyn RuleProvider) -> ValidationResult {
        let mut result = ValidationResult::new();

        let mut pending = vec![(node, node.name.clone())];
        while let Some((node, path)) = pending.pop() {
            result.merge(Self::validate_node(node, &path, rules));
            for child in node.children.iter().rev() {
                pending.push((child, format!("{}/{}", path, child.name)));
            }
        }

        result
    }

    /// Fail with `SchemaIncomplete` unless the tree is valid.
    pub fn ensure_complete(node: &Node, rules: &dyn RuleProvider) -> CoreResult<()> {
        let result = Self::validate(node, rules);
        if result.valid {
            Ok(())
        } else {
            Err(CoreError::SchemaIncomplete {
                node: node.name.clone(),
                problems: result.errors,
            })
        }
    }

    /// Check a single node, not descending into its children.
    fn validate_node(node: &Node, path: &str, rules: &dyn RuleProvider) -> ValidationResult {
        let mut result = ValidationResult::new();

        let rule = match rules.rule(&node.name) {
            Ok(rule) => rule,
            Err(_) => {
                result.add_error(format!("{}: unknown node type '{}'", path, node.name));
                return result;
            }
        };

        for attribute in &rule.attributes {
            match node.attribute(&attribute.name) {
                None | Some("") if attribute.required => {
                    result.add_error(format!(
                        "{}: missing required attribute '{}'",
                        path, attribute.name
                    ));
                }
                Some(value)
                    if !value.is_empty()
                        && attribute.is_enumerated()
                        && !attribute.allowed_values.iter().any(|v| v == value) =>
                {
                    result.add_error(format!(
                        "{}: attribute '{}' has value '{}', expected one of: {}",
                        path,
                        attribute.name,
                        value,
                        attribute.allowed_values.join(", ")
                    ));
                }
                _ => {}
            }
        }

        for name in node.attributes.keys() {
            if rule.attribute(name).is_none() {
                result.add_warning(format!("{}: undeclared attribute '{}'", path, name));
            }
        }

        let content = node.content().unwrap_or("");
        if rule.content_forbidden() {
            if !content.is_empty() {
                result.add_error(format!("{}: content is not permitted", path));
            }
        } else if rule.content_required() && content.is_empty() {
            result.add_error(format!("{}: content is required", path));
        } else if !content.is_empty()
            && !rule.content.allowed_values.is_empty()
            && !rule.content.allowed_values.iter().any(|v| v == content)
        {
            result.add_error(format!(
                "{}: content '{}' is not one of: {}",
                path,
                content,
                rule.content.allowed_values.join(", ")
            ));
        }

        match rule.child_bounds() {
            Ok(bounds) => {
                for (group, bounds) in rule.children.iter().zip(bounds) {
                    let count = node.children_named(&group.names).count();
                    if !bounds.admits(count) {
                        let max = bounds
                            .max
                            .map_or_else(|| "unbounded".to_string(), |m| m.to_string());
                        result.add_error(format!(
                            "{}: {} child(ren) of [{}], expected between {} and {}",
                            path,
                            count,
                            group.names.join(", "),
                            bounds.min,
                            max
                        ));
                    }
                }
            }
            Err(e) => result.add_error(format!("{}: {}", path, e)),
        }

        for child in &node.children {
            if !rule.children.iter().any(|g| g.contains(&child.name)) {
                result.add_error(format!(
                    "{}: child '{}' is not permitted here",
                    path, child.name
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smith_schema::{AttributeSpec, ChildGroup, ContentRule, Rule, RuleSet};

    fn rules() -> RuleSet {
        RuleSet::new()
            .with(Rule::new("leaf").with_content_rule(ContentRule::NonEmptyContent))
            .with(
                Rule::new("group")
                    .with_attribute(AttributeSpec::new("lang").required().with_allowed_values(["en", "fr"]))
                    .with_content_rule(ContentRule::EmptyContent)
                    .with_children(ChildGroup::new(["leaf"], 1, Some(2))),
            )
    }

    fn leaf(content: &str) -> Node {
        let mut node = Node::new("leaf");
        node.set_content(content);
        node
    }

    #[test]
    fn test_valid_tree() {
        let mut group = Node::new("group");
        group.set_attribute("lang", "en");
        group.append_child(leaf("a"));

        let result = NodeValidator::validate(&group, &rules());
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(NodeValidator::ensure_complete(&group, &rules()).is_ok());
    }

    #[test]
    fn test_group_below_minimum() {
        let mut group = Node::new("group");
        group.set_attribute("lang", "en");

        let err = NodeValidator::ensure_complete(&group, &rules()).unwrap_err();
        match err {
            CoreError::SchemaIncomplete { node, problems } => {
                assert_eq!(node, "group");
                assert_eq!(problems.len(), 1);
                assert!(problems[0].contains("expected between 1 and 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_attribute_and_content_violations() {
        let mut group = Node::new("group");
        group.set_attribute("lang", "de");
        group.set_attribute("extra", "x");
        group.set_content("text");
        group.append_child(leaf(""));
        group.append_child(Node::new("group"));

        let result = NodeValidator::validate(&group, &rules());
        assert!(!result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.errors.iter().any(|e| e.contains("'de'")));
        assert!(result.errors.iter().any(|e| e.contains("content is not permitted")));
        assert!(result.errors.iter().any(|e| e == "group/leaf: content is required"));
        assert!(result.errors.iter().any(|e| e.contains("missing required attribute 'lang'")));
        assert!(result.errors.iter().any(|e| e.contains("child 'group' is not permitted")));
    }

    #[test]
    fn test_unknown_node_type() {
        let result = NodeValidator::validate(&Node::new("mystery"), &rules());
        assert_eq!(result.errors, vec!["mystery: unknown node type 'mystery'"]);
    }
}
