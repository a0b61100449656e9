//! Rule evaluation.

use framecull_spec::{Color, Rule, RuleKind};

use crate::diagnostics::{Diagnostic, DiagnosticSink, Subject};
use crate::frame::Frame;

/// Evaluates one rule against a frame.
///
/// Total over well-formed rule trees: an out-of-bounds pixel lookup becomes
/// a non-match for `pixel_colour` and a match for `pixel_not_colour`.
/// `or` rules evaluate their sub-rules in declared order and stop at the
/// first match, so sub-rules after the match are neither evaluated nor
/// reported. Every rule that fails is reported to `sink`; an `or` reports
/// itself after its sub-rules.
pub fn evaluate_rule<F>(rule: &Rule, frame: &F, sink: &mut dyn DiagnosticSink) -> bool
where
    F: Frame + ?Sized,
{
    match rule {
        Rule::Size {
            name,
            width,
            height,
        } => {
            let matched = frame.width() == *width && frame.height() == *height;
            if !matched && sink.enabled() {
                sink.report(
                    Diagnostic::new(Subject::Rule(RuleKind::Size), name, "Size rule broken")
                        .with_actual_value(format!("({}, {})", frame.width(), frame.height()))
                        .with_expected_value(format!("({}, {})", width, height)),
                );
            }
            matched
        }

        Rule::PixelColor { name, x, y, color } => {
            let matched = match frame.pixel(*x, *y) {
                Ok(pixel) => color.matches(pixel.0),
                Err(_) => false,
            };
            if !matched && sink.enabled() {
                report_pixel(
                    sink,
                    frame,
                    RuleKind::PixelColor,
                    name,
                    (*x, *y),
                    color.to_string(),
                );
            }
            matched
        }

        Rule::PixelNotColor { name, x, y, color } => {
            let matched = match frame.pixel(*x, *y) {
                Ok(pixel) => !color.matches(pixel.0),
                Err(_) => true,
            };
            if !matched && sink.enabled() {
                report_pixel(
                    sink,
                    frame,
                    RuleKind::PixelNotColor,
                    name,
                    (*x, *y),
                    format!("anything but {}", color),
                );
            }
            matched
        }

        Rule::Or { name, rules } => {
            let matched = rules.iter().any(|sub_rule| evaluate_rule(sub_rule, frame, sink));
            if !matched && sink.enabled() {
                sink.report(
                    Diagnostic::new(Subject::Rule(RuleKind::Or), name, "Or rule broken")
                        .with_actual_value(format!("none of {} sub-rule(s) matched", rules.len()))
                        .with_expected_value("at least one match"),
                );
            }
            matched
        }
    }
}

fn report_pixel<F>(
    sink: &mut dyn DiagnosticSink,
    frame: &F,
    kind: RuleKind,
    name: &str,
    (x, y): (u32, u32),
    expected: String,
) where
    F: Frame + ?Sized,
{
    let message = match kind {
        RuleKind::PixelNotColor => "Inverse colour rule broken",
        _ => "Colour rule broken",
    };
    let actual = match frame.pixel(x, y) {
        Ok(pixel) => Color::from_pixel(pixel.0).to_string(),
        Err(oob) => oob.to_string(),
    };
    sink.report(
        Diagnostic::new(Subject::Rule(kind), name, message)
            .with_location(format!("({}, {})", x, y))
            .with_actual_value(actual)
            .with_expected_value(expected),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    fn eval(rule: &Rule, frame: &RgbImage) -> bool {
        evaluate_rule(rule, frame, &mut NullSink)
    }

    fn eval_with_diagnostics(rule: &Rule, frame: &RgbImage) -> (bool, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let matched = evaluate_rule(rule, frame, &mut diagnostics);
        (matched, diagnostics)
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[test]
    fn test_size_rule_exact_match() {
        let frame = solid(1920, 1080, [0, 0, 0]);
        assert!(eval(&Rule::size("hd", 1920, 1080), &frame));
    }

    #[test]
    fn test_size_rule_requires_both_dimensions() {
        let frame = solid(20, 10, [0, 0, 0]);
        assert!(!eval(&Rule::size("s", 20, 11), &frame));
        assert!(!eval(&Rule::size("s", 21, 10), &frame));
        assert!(!eval(&Rule::size("s", 10, 20), &frame));
        assert!(!eval(&Rule::size("s", 19, 9), &frame));
    }

    #[test]
    fn test_size_rule_diagnostic() {
        let frame = solid(128, 72, [0, 0, 0]);
        let (matched, diagnostics) = eval_with_diagnostics(&Rule::size("hd", 1920, 1080), &frame);
        assert!(!matched);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].subject, Subject::Rule(RuleKind::Size));
        assert_eq!(diagnostics[0].actual_value.as_deref(), Some("(128, 72)"));
        assert_eq!(diagnostics[0].expected_value.as_deref(), Some("(1920, 1080)"));
    }

    // ========================================================================
    // Pixel colour / not colour
    // ========================================================================

    #[test]
    fn test_pixel_colour_match_and_mismatch() {
        let mut frame = solid(4, 4, [255, 255, 255]);
        frame.put_pixel(2, 1, Rgb([255, 0, 0]));

        assert!(eval(&Rule::pixel_color("p", 0, 0, Color::white()), &frame));
        assert!(eval(&Rule::pixel_color("p", 2, 1, Color::rgb(255, 0, 0)), &frame));
        assert!(!eval(&Rule::pixel_color("p", 2, 1, Color::white()), &frame));
    }

    #[test]
    fn test_pixel_not_colour_match_and_mismatch() {
        let frame = solid(4, 4, [0, 0, 0]);
        assert!(!eval(&Rule::pixel_not_color("p", 1, 1, Color::black()), &frame));
        assert!(eval(&Rule::pixel_not_color("p", 1, 1, Color::white()), &frame));
    }

    #[test]
    fn test_out_of_bounds_asymmetry() {
        let frame = solid(100, 100, [0, 0, 0]);
        for (x, y) in [(100, 0), (0, 100), (500, 500), (u32::MAX, u32::MAX)] {
            assert!(!eval(&Rule::pixel_color("p", x, y, Color::black()), &frame));
            assert!(eval(&Rule::pixel_not_color("p", x, y, Color::black()), &frame));
        }
    }

    #[test]
    fn test_out_of_bounds_diagnostics() {
        let frame = solid(100, 100, [0, 0, 0]);

        let (_, diagnostics) =
            eval_with_diagnostics(&Rule::pixel_color("far", 500, 500, Color::black()), &frame);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("(500, 500)"));
        assert_eq!(
            diagnostics[0].actual_value.as_deref(),
            Some("pixel (500, 500) is outside the 100x100 frame")
        );

        // The vacuous match is not a failure, so nothing is reported.
        let (matched, diagnostics) =
            eval_with_diagnostics(&Rule::pixel_not_color("far", 500, 500, Color::black()), &frame);
        assert!(matched);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_pixel_diagnostics_name_observed_colour() {
        let frame = solid(2, 2, [1, 2, 3]);
        let (_, diagnostics) =
            eval_with_diagnostics(&Rule::pixel_not_color("cap", 0, 0, Color::rgb(1, 2, 3)), &frame);
        assert_eq!(diagnostics[0].message, "Inverse colour rule broken");
        assert_eq!(diagnostics[0].actual_value.as_deref(), Some("#010203ff"));
        assert_eq!(
            diagnostics[0].expected_value.as_deref(),
            Some("anything but #010203")
        );
    }

    #[test]
    fn test_rgb_rule_against_rgba_frame() {
        let frame = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 10]));
        let rule = Rule::pixel_color("p", 0, 0, Color::white());
        assert!(evaluate_rule(&rule, &frame, &mut NullSink));

        let exact = Rule::pixel_color("p", 0, 0, Color::rgba(255, 255, 255, 255));
        assert!(!evaluate_rule(&exact, &frame, &mut NullSink));
        let translucent = Rule::pixel_color("p", 0, 0, Color::rgba(255, 255, 255, 10));
        assert!(evaluate_rule(&translucent, &frame, &mut NullSink));
    }

    #[test]
    fn test_rgba_rule_against_rgb_frame() {
        let frame = solid(1, 1, [0, 0, 0]);
        assert!(eval(&Rule::pixel_color("p", 0, 0, Color::rgba(0, 0, 0, 255)), &frame));
        assert!(!eval(&Rule::pixel_color("p", 0, 0, Color::rgba(0, 0, 0, 0)), &frame));
    }

    // ========================================================================
    // Or
    // ========================================================================

    #[test]
    fn test_empty_or_never_matches() {
        let frame = solid(1, 1, [0, 0, 0]);
        let (matched, diagnostics) = eval_with_diagnostics(&Rule::or("none", vec![]), &frame);
        assert!(!matched);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].subject, Subject::Rule(RuleKind::Or));
    }

    #[test]
    fn test_or_with_true_branch_matches() {
        let frame = solid(10, 10, [0, 0, 0]);
        let always = Rule::size("always", 10, 10);
        let never = Rule::size("never", 1, 1);

        assert!(eval(&Rule::or("o", vec![always.clone()]), &frame));
        assert!(eval(&Rule::or("o", vec![never.clone(), always.clone()]), &frame));
        assert!(eval(&Rule::or("o", vec![always, never.clone()]), &frame));
        assert!(!eval(&Rule::or("o", vec![never.clone(), never]), &frame));
    }

    #[test]
    fn test_or_short_circuit_diagnostics() {
        let frame = solid(8, 8, [255, 255, 255]);
        let rule = Rule::or(
            "either",
            vec![
                Rule::pixel_color("first", 0, 0, Color::black()),
                Rule::pixel_color("second", 0, 0, Color::white()),
                Rule::pixel_color("third", 0, 0, Color::black()),
            ],
        );
        let (matched, diagnostics) = eval_with_diagnostics(&rule, &frame);
        assert!(matched);
        let names: Vec<&str> = diagnostics.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["first"]);
    }

    #[test]
    fn test_failed_or_reports_children_then_itself() {
        let frame = solid(8, 8, [255, 255, 255]);
        let rule = Rule::or(
            "outer",
            vec![
                Rule::size("tiny", 1, 1),
                Rule::or("inner", vec![Rule::pixel_color("dark", 0, 0, Color::black())]),
            ],
        );
        let (matched, diagnostics) = eval_with_diagnostics(&rule, &frame);
        assert!(!matched);
        let names: Vec<&str> = diagnostics.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["tiny", "dark", "inner", "outer"]);
    }

    #[test]
    fn test_diagnostics_do_not_change_results() {
        let frame = solid(3, 3, [9, 9, 9]);
        let rules = [
            Rule::size("s", 3, 3),
            Rule::size("s", 4, 3),
            Rule::pixel_color("p", 1, 1, Color::rgb(9, 9, 9)),
            Rule::pixel_not_color("p", 1, 1, Color::rgb(9, 9, 9)),
            Rule::pixel_color("p", 3, 3, Color::black()),
            Rule::or("o", vec![Rule::size("s", 1, 1)]),
        ];
        for rule in &rules {
            let (with, _) = eval_with_diagnostics(rule, &frame);
            assert_eq!(with, eval(rule, &frame), "{}", rule.summary());
        }
    }
}
