//! The rule tree.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// One predicate over a frame.
///
/// Rules are an owned tree: an [`Rule::Or`] owns its sub-rules and nothing is
/// shared. The JSON form uses a `type` discriminator, for example:
///
/// ```json
/// {"type": "pixel_colour", "name": "sky", "x": 10, "y": 10, "colour": "#87ceeb"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Matches when the frame is exactly `width` x `height`.
    Size {
        name: String,
        width: u32,
        height: u32,
    },

    /// Matches when the pixel at (`x`, `y`) equals `color`.
    /// An out-of-bounds coordinate never matches.
    #[serde(rename = "pixel_colour", alias = "pixel_color")]
    PixelColor {
        name: String,
        x: u32,
        y: u32,
        #[serde(rename = "colour", alias = "color")]
        color: Color,
    },

    /// Matches when the pixel at (`x`, `y`) differs from `color`.
    /// An out-of-bounds coordinate always matches.
    #[serde(rename = "pixel_not_colour", alias = "pixel_not_color")]
    PixelNotColor {
        name: String,
        x: u32,
        y: u32,
        #[serde(rename = "colour", alias = "color")]
        color: Color,
    },

    /// Matches when any sub-rule matches. Empty never matches.
    Or { name: String, rules: Vec<Rule> },
}

/// The variant of a [`Rule`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Size,
    #[serde(rename = "pixel_colour")]
    PixelColor,
    #[serde(rename = "pixel_not_colour")]
    PixelNotColor,
    Or,
}

impl RuleKind {
    /// Returns the `type` discriminator used in rule documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Size => "size",
            RuleKind::PixelColor => "pixel_colour",
            RuleKind::PixelNotColor => "pixel_not_colour",
            RuleKind::Or => "or",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Rule {
    /// Creates a size rule.
    pub fn size(name: impl Into<String>, width: u32, height: u32) -> Self {
        Rule::Size {
            name: name.into(),
            width,
            height,
        }
    }

    /// Creates a pixel color rule.
    pub fn pixel_color(name: impl Into<String>, x: u32, y: u32, color: Color) -> Self {
        Rule::PixelColor {
            name: name.into(),
            x,
            y,
            color,
        }
    }

    /// Creates a pixel not-color rule.
    pub fn pixel_not_color(name: impl Into<String>, x: u32, y: u32, color: Color) -> Self {
        Rule::PixelNotColor {
            name: name.into(),
            x,
            y,
            color,
        }
    }

    /// Creates an `or` rule over the given sub-rules.
    pub fn or(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Rule::Or {
            name: name.into(),
            rules,
        }
    }

    /// Returns the rule's name.
    pub fn name(&self) -> &str {
        match self {
            Rule::Size { name, .. }
            | Rule::PixelColor { name, .. }
            | Rule::PixelNotColor { name, .. }
            | Rule::Or { name, .. } => name,
        }
    }

    /// Returns the rule's kind.
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Size { .. } => RuleKind::Size,
            Rule::PixelColor { .. } => RuleKind::PixelColor,
            Rule::PixelNotColor { .. } => RuleKind::PixelNotColor,
            Rule::Or { .. } => RuleKind::Or,
        }
    }

    /// Returns the sub-rules of an `or` rule, or an empty slice for leaves.
    pub fn sub_rules(&self) -> &[Rule] {
        match self {
            Rule::Or { rules, .. } => rules,
            _ => &[],
        }
    }

    /// Counts this rule and all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self.sub_rules().iter().map(Rule::node_count).sum::<usize>()
    }

    /// Returns a one-line summary, e.g. `size "hd" 1920x1080`.
    pub fn summary(&self) -> String {
        match self {
            Rule::Size {
                name,
                width,
                height,
            } => format!("size \"{}\" {}x{}", name, width, height),
            Rule::PixelColor { name, x, y, color } => {
                format!("pixel_colour \"{}\" ({}, {}) == {}", name, x, y, color)
            }
            Rule::PixelNotColor { name, x, y, color } => {
                format!("pixel_not_colour \"{}\" ({}, {}) != {}", name, x, y, color)
            }
            Rule::Or { name, rules } => format!("or \"{}\" ({} sub-rules)", name, rules.len()),
        }
    }
}
