//! framecull specification library
//!
//! Types, parsing, and validation for framecull rule documents. A rule
//! document is a JSON object naming one acceptance policy:
//!
//! ```json
//! {
//!     "name": "daylight",
//!     "rules": [
//!         {"type": "size", "name": "hd", "width": 1920, "height": 1080},
//!         {"type": "pixel_not_colour", "name": "lens-cap", "x": 960, "y": 540, "colour": "#000000"}
//!     ]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use framecull_spec::{Color, Rule, Specification};
//! use framecull_spec::validation::validate_specification;
//!
//! let spec = Specification::new("daylight")
//!     .with_rule(Rule::size("hd", 1920, 1080))
//!     .with_rule(Rule::pixel_not_color("lens-cap", 960, 540, Color::black()));
//!
//! assert!(validate_specification(&spec).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`color`]: Rule colors and the colour-string parser
//! - [`error`]: Error and warning types
//! - [`rule`]: The rule tree
//! - [`spec`]: Specification documents
//! - [`validation`]: Advisory checks over parsed specifications

pub mod color;
pub mod error;
pub mod rule;
pub mod spec;
pub mod validation;

pub use color::{Color, ColorParseError};
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use rule::{Rule, RuleKind};
pub use spec::Specification;
