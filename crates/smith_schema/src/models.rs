//! Data models for node rules.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// Marker flags constraining the content of a node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ContentRule {
    /// No content is permitted.
    EmptyContent,
    /// Content is mandatory.
    NonEmptyContent,
    /// Any text, including none.
    AnyContent,
    /// A marker this engine does not interpret.
    #[serde(other)]
    Other,
}

/// Specification of a single attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    /// Enumerated values; empty means unconstrained.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            allowed_values: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_enumerated(&self) -> bool {
        !self.allowed_values.is_empty()
    }
}

/// Content constraints of a rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ContentRule>,
    /// Enumerated content values; empty means free text.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

/// Maximum occurrence count in the form the rule source declared it.
///
/// Text is resolved lazily so that a bad value surfaces as a
/// [`SchemaError::MalformedRule`] when the group is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MaxOccurrences {
    #[default]
    Unbounded,
    Count(u64),
    Text(String),
    /// Any other value, such as a negative or fractional number.
    Other(serde_json::Value),
}

impl MaxOccurrences {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, MaxOccurrences::Unbounded)
    }

    /// Resolve to a numeric limit, `None` meaning no limit.
    pub fn resolve(&self) -> Result<Option<usize>, String> {
        match self {
            MaxOccurrences::Unbounded => Ok(None),
            MaxOccurrences::Count(n) => usize::try_from(*n)
                .map(Some)
                .map_err(|_| format!("max occurrences out of range: {}", n)),
            MaxOccurrences::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<usize>()
                    .map(Some)
                    .map_err(|_| format!("max occurrences must be an integer or absent: {:?}", text))
            }
            MaxOccurrences::Other(value) => Err(format!(
                "max occurrences must be an integer or absent: {}",
                value
            )),
        }
    }
}

impl From<usize> for MaxOccurrences {
    fn from(n: usize) -> Self {
        MaxOccurrences::Count(n as u64)
    }
}

impl From<Option<usize>> for MaxOccurrences {
    fn from(n: Option<usize>) -> Self {
        n.map_or(MaxOccurrences::Unbounded, MaxOccurrences::from)
    }
}

/// Resolved occurrence bounds of a child group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceBounds {
    pub min: usize,
    pub max: Option<usize>,
}

impl OccurrenceBounds {
    pub fn admits(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    pub fn is_capped(&self, count: usize) -> bool {
        self.max.map_or(false, |max| count >= max)
    }
}

/// A clause naming which node types may appear as children, and how often.
///
/// A group with more than one candidate is a choice group: every
/// occurrence picks exactly one of the names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildGroup {
    pub names: Vec<String>,
    #[serde(default)]
    pub min: usize,
    #[serde(default, skip_serializing_if = "MaxOccurrences::is_unbounded")]
    pub max: MaxOccurrences,
}

impl ChildGroup {
    pub fn new<I, S>(names: I, min: usize, max: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            min,
            max: max.into(),
        }
    }

    /// Replace the declared maximum with a raw value.
    pub fn with_max(mut self, max: MaxOccurrences) -> Self {
        self.max = max;
        self
    }

    pub fn is_choice(&self) -> bool {
        self.names.len() > 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Resolve the declared bounds.
    pub fn bounds(&self) -> Result<OccurrenceBounds, String> {
        let max = self.max.resolve()?;
        if let Some(max) = max {
            if max < self.min {
                return Err(format!(
                    "max occurrences {} is below min occurrences {}",
                    max, self.min
                ));
            }
        }
        Ok(OccurrenceBounds { min: self.min, max })
    }
}

/// The schema definition for one node type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    /// Filled from the rule document key when omitted.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeSpec>,
    #[serde(default)]
    pub content: ContentSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildGroup>,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_content_rule(mut self, rule: ContentRule) -> Self {
        self.content.rules.push(rule);
        self
    }

    pub fn with_content_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children(mut self, group: ChildGroup) -> Self {
        self.children.push(group);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn is_required_attribute(&self, name: &str) -> bool {
        self.attribute(name).map_or(false, |a| a.required)
    }

    pub fn allowed_attribute_values(&self, name: &str) -> &[String] {
        self.attribute(name)
            .map_or(&[][..], |a| a.allowed_values.as_slice())
    }

    pub fn content_forbidden(&self) -> bool {
        self.content.rules.contains(&ContentRule::EmptyContent)
    }

    pub fn content_required(&self) -> bool {
        self.content.rules.contains(&ContentRule::NonEmptyContent)
            || !self.content.allowed_values.is_empty()
    }

    /// Resolve the bounds of every child group, failing on the first malformed one.
    pub fn child_bounds(&self) -> SchemaResult<Vec<OccurrenceBounds>> {
        self.children
            .iter()
            .map(|group| {
                group.bounds().map_err(|message| SchemaError::MalformedRule {
                    rule: self.name.clone(),
                    message,
                })
            })
            .collect()
    }
}
