//! Rule providers: lookup of rules by node-type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::models::Rule;

/// Capability for resolving rules by node-type name.
///
/// The construction engine receives a provider by reference so it can be
/// driven by any schema source, including test doubles.
#[cfg_attr(test, mockall::automock)]
pub trait RuleProvider {
    /// All known node-type names, in a stable order.
    fn node_type_names(&self) -> Vec<String>;

    /// Check whether a rule exists for the given node type.
    fn has_node_type(&self, name: &str) -> bool;

    /// Get the rule for a node type.
    fn rule(&self, name: &str) -> SchemaResult<Arc<Rule>>;
}

/// An in-memory set of rules keyed by node-type name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Arc<Rule>>,
}

impl RuleSet {
    /// Create a new empty rule set.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Register a rule under its `name`.
    ///
    /// A rule with the same name is replaced.
    pub fn register(&mut self, rule: Rule) {
        let name = rule.name.clone();
        if self.rules.insert(name.clone(), Arc::new(rule)).is_some() {
            debug!("Replaced rule: {}", name);
        } else {
            debug!("Registered rule: {}", name);
        }
    }

    /// Builder-style registration.
    pub fn with(mut self, rule: Rule) -> Self {
        self.register(rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<Rule>> {
        self.rules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(|s| s.as_str()).collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Move every rule of `other` into this set.
    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.register(rule);
        }
        set
    }
}

impl RuleProvider for RuleSet {
    fn node_type_names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    fn has_node_type(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn rule(&self, name: &str) -> SchemaResult<Arc<Rule>> {
        self.get(name)
            .ok_or_else(|| SchemaError::UnknownNodeType(name.to_string()))
    }
}
