//! Specification documents.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::rule::Rule;

/// A named acceptance policy: a frame satisfies it when every rule matches.
///
/// An empty rule list accepts every frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    /// Human-readable name, used in diagnostics.
    pub name: String,

    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
}

impl Specification {
    /// Creates a specification with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Builder method to append a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Parses a specification from a JSON string.
    ///
    /// Malformed rule data fails here with [`SpecError::InvalidRule`], before
    /// any frame is evaluated.
    ///
    /// # Example
    /// ```
    /// use framecull_spec::Specification;
    ///
    /// let spec = Specification::from_json(r#"{
    ///     "name": "daylight",
    ///     "rules": [{"type": "size", "name": "hd", "width": 1920, "height": 1080}]
    /// }"#).unwrap();
    /// assert_eq!(spec.rules.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a specification from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SpecError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parses a specification from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the specification to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Counts every rule node, including those nested in `or` rules.
    pub fn rule_count(&self) -> usize {
        self.rules.iter().map(Rule::node_count).sum()
    }
}
