//! Rule evaluation engine for framecull.
//!
//! Classifies decoded frames against specifications. Evaluation is a pure
//! function of the rule tree and the frame's pixels: rules are AND-ed within
//! a specification, specifications are OR-ed into the verdict, and both folds
//! stop at the first decisive result.
//!
//! # Example
//!
//! ```
//! use framecull_engine::{EvalOptions, SpecificationSet};
//! use framecull_spec::{Color, Rule, Specification};
//! use image::{Rgb, RgbImage};
//!
//! let mut set = SpecificationSet::new();
//! set.register(Specification::new("hd").with_rule(Rule::size("hd", 1920, 1080)));
//! set.register(
//!     Specification::new("white-corner")
//!         .with_rule(Rule::pixel_color("corner", 0, 0, Color::white())),
//! );
//!
//! let frame = RgbImage::from_pixel(1280, 720, Rgb([255, 255, 255]));
//! let verdict = set.classify(&frame, &EvalOptions::default());
//! assert!(verdict.accepted);
//! ```

pub mod diagnostics;
pub mod frame;
pub mod registry;
pub mod rules;
pub mod verdict;

pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, Subject};
pub use frame::{open_frame, Frame, FrameError, OutOfBounds};
pub use registry::SpecificationSet;
pub use rules::evaluate_rule;
pub use verdict::{classify, evaluate_specification, first_accepting, EvalOptions, Verdict};
