//! Rule set validation utilities.

use std::collections::HashSet;

use crate::models::{ContentRule, Rule};
use crate::provider::RuleProvider;

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for rule definitions.
pub struct RuleValidator;

impl RuleValidator {
    /// Validate every rule a provider knows about, including cross references.
    pub fn validate_provider(rules: &dyn RuleProvider) -> ValidationResult {
        let mut result = ValidationResult::new();

        for name in rules.node_type_names() {
            match rules.rule(&name) {
                Ok(rule) => result.merge(Self::validate_rule(&rule, rules)),
                Err(e) => result.add_error(format!("Rule '{}' cannot be resolved: {}", name, e)),
            }
        }

        result
    }

    /// Validate one rule against the provider it belongs to.
    pub fn validate_rule(rule: &Rule, rules: &dyn RuleProvider) -> ValidationResult {
        let mut result = ValidationResult::new();

        let mut seen = HashSet::new();
        for attribute in &rule.attributes {
            if attribute.name.is_empty() {
                result.add_error(format!("Rule '{}' has an attribute with an empty name", rule.name));
            } else if !seen.insert(attribute.name.as_str()) {
                result.add_error(format!(
                    "Rule '{}' declares attribute '{}' more than once",
                    rule.name, attribute.name
                ));
            }
        }

        let content = &rule.content;
        if content.rules.contains(&ContentRule::EmptyContent) {
            if content.rules.contains(&ContentRule::NonEmptyContent) {
                result.add_error(format!(
                    "Rule '{}' marks content as both empty and non-empty",
                    rule.name
                ));
            }
            if !content.allowed_values.is_empty() {
                result.add_error(format!(
                    "Rule '{}' forbids content but enumerates content values",
                    rule.name
                ));
            }
        }

        if rule.content_required() && !rule.children.is_empty() {
            result.add_warning(format!(
                "Rule '{}' requires content and also declares child groups",
                rule.name
            ));
        }

        for (index, group) in rule.children.iter().enumerate() {
            if group.names.is_empty() {
                result.add_error(format!(
                    "Rule '{}' child group {} has no candidate node types",
                    rule.name, index
                ));
            }

            for child in &group.names {
                if !rules.has_node_type(child) {
                    result.add_error(format!(
                        "Rule '{}' refers to unknown child node type '{}'",
                        rule.name, child
                    ));
                }
            }

            match group.bounds() {
                Ok(bounds) if bounds.max == Some(0) => result.add_warning(format!(
                    "Rule '{}' child group {} can never hold a child",
                    rule.name, index
                )),
                Ok(_) => {}
                Err(message) => result.add_error(format!(
                    "Rule '{}' child group {}: {}",
                    rule.name, index, message
                )),
            }
        }

        result
    }
}
