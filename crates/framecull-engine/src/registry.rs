//! The set of specifications a run classifies frames against.

use framecull_spec::validation::validate_specification;
use framecull_spec::{Specification, ValidationResult};
use std::path::Path;

use crate::frame::{open_frame, Frame, FrameError};
use crate::verdict::{classify, EvalOptions, Verdict};

/// Ordered collection of specifications; a frame is kept if any one accepts it.
#[derive(Debug, Clone, Default)]
pub struct SpecificationSet {
    specifications: Vec<Specification>,
}

impl SpecificationSet {
    /// Creates an empty set. An empty set rejects every frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a specification after those already present.
    pub fn register(&mut self, specification: Specification) {
        self.specifications.push(specification);
    }

    /// Returns the registered specifications in evaluation order.
    pub fn specifications(&self) -> &[Specification] {
        &self.specifications
    }

    /// Returns the specification names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.specifications.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns the number of registered specifications.
    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    /// Returns true if no specifications are registered.
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    /// Validates every specification, pairing each result with its name.
    pub fn validate(&self) -> Vec<(&str, ValidationResult)> {
        self.specifications
            .iter()
            .map(|s| (s.name.as_str(), validate_specification(s)))
            .collect()
    }

    /// Classifies a decoded frame.
    pub fn classify<F>(&self, frame: &F, options: &EvalOptions) -> Verdict
    where
        F: Frame + ?Sized,
    {
        classify(&self.specifications, frame, options)
    }

    /// Decodes the frame at `path` and classifies it.
    pub fn classify_path(&self, path: &Path, options: &EvalOptions) -> Result<Verdict, FrameError> {
        let frame = open_frame(path)?;
        Ok(self.classify(&frame, options))
    }
}

impl From<Vec<Specification>> for SpecificationSet {
    fn from(specifications: Vec<Specification>) -> Self {
        Self { specifications }
    }
}

impl FromIterator<Specification> for SpecificationSet {
    fn from_iter<I: IntoIterator<Item = Specification>>(iter: I) -> Self {
        Self {
            specifications: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecull_spec::{Color, Rule};
    use image::{Rgb, RgbImage};

    #[test]
    fn test_empty_set() {
        let set = SpecificationSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        let frame = RgbImage::new(1, 1);
        assert!(set.classify(&frame, &EvalOptions::default()).is_rejected());
    }

    #[test]
    fn test_register_keeps_order() {
        let mut set = SpecificationSet::new();
        set.register(Specification::new("first"));
        set.register(Specification::new("second"));
        assert_eq!(set.names(), vec!["first", "second"]);
    }

    #[test]
    fn test_classify_delegates() {
        let set: SpecificationSet = vec![
            Specification::new("dark").with_rule(Rule::pixel_color("p", 0, 0, Color::black())),
            Specification::new("light").with_rule(Rule::pixel_color("p", 0, 0, Color::white())),
        ]
        .into();
        let frame = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        let verdict = set.classify(&frame, &EvalOptions::default());
        assert_eq!(verdict.matched_specification.as_deref(), Some("light"));
    }

    #[test]
    fn test_classify_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        RgbImage::new(16, 9).save(&path).unwrap();

        let set: SpecificationSet =
            std::iter::once(Specification::new("wide").with_rule(Rule::size("s", 16, 9))).collect();
        assert!(set.classify_path(&path, &EvalOptions::default()).unwrap().accepted);
        assert!(set
            .classify_path(&dir.path().join("missing.png"), &EvalOptions::default())
            .is_err());
    }

    #[test]
    fn test_validate_reports_per_specification() {
        let set: SpecificationSet = vec![
            Specification::new("ok").with_rule(Rule::size("hd", 1920, 1080)),
            Specification::new("broken").with_rule(Rule::size("zero", 0, 0)),
        ]
        .into();
        let results = set.validate();
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, "broken");
        assert!(!results[1].1.is_ok());
    }
}
