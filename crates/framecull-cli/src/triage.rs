//! The triage driver: classify each frame and dispose of the rejected ones.

use framecull_engine::{Diagnostic, EvalOptions, SpecificationSet};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use crate::interrupt::is_interrupted;

/// What happens to a rejected frame. Chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Disposal {
    /// Move the frame into `destination`, keeping its file name.
    Move { destination: PathBuf },
    /// Delete the frame.
    Delete,
}

impl Disposal {
    /// Returns "move" or "delete".
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposal::Move { .. } => "move",
            Disposal::Delete => "delete",
        }
    }
}

/// Run configuration for [`run_triage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageOptions {
    pub disposal: Disposal,
    /// Classify and report only; never touch the frames.
    pub dry_run: bool,
    /// Collect failure reasons for every rejected frame.
    pub diagnostics: bool,
}

impl TriageOptions {
    fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            diagnostics: self.diagnostics,
        }
    }
}

/// What became of one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Accepted by the named specification.
    Kept { specification: String },
    /// Rejected; `disposed` is false in dry-run mode.
    Rejected { disposed: bool },
    /// Not classified or not disposed of because of an I/O or decode error.
    Skipped { reason: String },
}

/// Per-frame record handed to the progress callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FrameOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<Diagnostic>,
}

/// A frame that could not be triaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFrame {
    pub path: PathBuf,
    pub reason: String,
}

/// Totals for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriageSummary {
    /// Frames looked at, including skipped ones.
    pub processed: usize,
    /// Rejected frames, by their path in the source directory.
    pub rejected: Vec<PathBuf>,
    /// Frames accepted by some specification.
    pub kept: usize,
    /// Frames that could not be decoded or disposed of.
    pub skipped: Vec<SkippedFrame>,
    /// The run stopped early on Ctrl+C.
    pub interrupted: bool,
}

impl TriageSummary {
    /// Returns the one-line report printed at the end of a run.
    pub fn summary_line(&self) -> String {
        format!(
            "{} frame(s) rejected of {} processed",
            self.rejected.len(),
            self.processed
        )
    }

    fn record(&mut self, record: &FrameRecord) {
        self.processed += 1;
        match &record.outcome {
            FrameOutcome::Kept { .. } => self.kept += 1,
            FrameOutcome::Rejected { .. } => self.rejected.push(record.path.clone()),
            FrameOutcome::Skipped { reason } => self.skipped.push(SkippedFrame {
                path: record.path.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Moves or deletes one frame.
pub fn dispose(frame: &Path, disposal: &Disposal) -> io::Result<()> {
    match disposal {
        Disposal::Move { destination } => {
            let file_name = frame.file_name().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' has no file name", frame.display()),
                )
            })?;
            fs::rename(frame, destination.join(file_name))
        }
        Disposal::Delete => fs::remove_file(frame),
    }
}

/// Classifies one frame and disposes of it if rejected.
pub fn triage_frame(path: &Path, set: &SpecificationSet, options: &TriageOptions) -> FrameRecord {
    let verdict = match set.classify_path(path, &options.eval_options()) {
        Ok(verdict) => verdict,
        Err(e) => {
            return FrameRecord {
                path: path.to_path_buf(),
                outcome: FrameOutcome::Skipped {
                    reason: e.to_string(),
                },
                reasons: Vec::new(),
            }
        }
    };

    let outcome = match verdict.matched_specification {
        Some(specification) => FrameOutcome::Kept { specification },
        None if options.dry_run => FrameOutcome::Rejected { disposed: false },
        None => match dispose(path, &options.disposal) {
            Ok(()) => FrameOutcome::Rejected { disposed: true },
            Err(e) => FrameOutcome::Skipped {
                reason: format!("failed to {} frame: {}", options.disposal.as_str(), e),
            },
        },
    };

    FrameRecord {
        path: path.to_path_buf(),
        outcome,
        reasons: verdict.reasons,
    }
}

/// Triages `frames` in order.
///
/// `interrupted` is checked before each frame; once raised, the remaining
/// frames are left untouched and the summary is marked as interrupted.
/// `on_frame` sees every record as soon as the frame is done.
pub fn run_triage<I, F>(
    frames: I,
    set: &SpecificationSet,
    options: &TriageOptions,
    interrupted: &AtomicBool,
    mut on_frame: F,
) -> TriageSummary
where
    I: IntoIterator<Item = PathBuf>,
    F: FnMut(&FrameRecord),
{
    let mut summary = TriageSummary::default();
    for path in frames {
        if is_interrupted(interrupted) {
            summary.interrupted = true;
            break;
        }
        let record = triage_frame(&path, set, options);
        summary.record(&record);
        on_frame(&record);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecull_spec::{Color, Rule, Specification};
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        source: PathBuf,
        destination: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let source = dir.path().join("frames");
            let destination = dir.path().join("rejected");
            fs::create_dir(&source).unwrap();
            fs::create_dir(&destination).unwrap();
            Self {
                dir,
                source,
                destination,
            }
        }

        fn frame(&self, name: &str, pixel: [u8; 3]) -> PathBuf {
            let path = self.source.join(name);
            RgbImage::from_pixel(8, 8, Rgb(pixel)).save(&path).unwrap();
            path
        }

        fn options(&self, dry_run: bool) -> TriageOptions {
            TriageOptions {
                disposal: Disposal::Move {
                    destination: self.destination.clone(),
                },
                dry_run,
                diagnostics: false,
            }
        }
    }

    fn white_only() -> SpecificationSet {
        vec![Specification::new("white").with_rule(Rule::pixel_color("p", 0, 0, Color::white()))]
            .into()
    }

    #[test]
    fn test_move_rejected_frames() {
        let fx = Fixture::new();
        let good = fx.frame("a.png", [255, 255, 255]);
        let bad = fx.frame("b.png", [0, 0, 0]);

        let flag = AtomicBool::new(false);
        let summary = run_triage(
            vec![good.clone(), bad.clone()],
            &white_only(),
            &fx.options(false),
            &flag,
            |_| {},
        );

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.rejected, vec![bad.clone()]);
        assert!(good.exists());
        assert!(!bad.exists());
        assert!(fx.destination.join("b.png").exists());
        assert_eq!(summary.summary_line(), "1 frame(s) rejected of 2 processed");
    }

    #[test]
    fn test_delete_rejected_frames() {
        let fx = Fixture::new();
        let bad = fx.frame("b.png", [0, 0, 0]);
        let options = TriageOptions {
            disposal: Disposal::Delete,
            dry_run: false,
            diagnostics: false,
        };

        let summary = run_triage(
            vec![bad.clone()],
            &white_only(),
            &options,
            &AtomicBool::new(false),
            |_| {},
        );
        assert_eq!(summary.rejected.len(), 1);
        assert!(!bad.exists());
        assert!(!fx.destination.join("b.png").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let fx = Fixture::new();
        let bad = fx.frame("b.png", [0, 0, 0]);

        let mut records = Vec::new();
        let summary = run_triage(
            vec![bad.clone()],
            &white_only(),
            &fx.options(true),
            &AtomicBool::new(false),
            |r| records.push(r.clone()),
        );
        assert_eq!(summary.rejected, vec![bad.clone()]);
        assert!(bad.exists());
        assert_eq!(records[0].outcome, FrameOutcome::Rejected { disposed: false });
    }

    #[test]
    fn test_undecodable_frame_is_skipped() {
        let fx = Fixture::new();
        let junk = fx.source.join("notes.txt");
        fs::write(&junk, b"not an image").unwrap();
        let good = fx.frame("a.png", [255, 255, 255]);

        let summary = run_triage(
            vec![junk.clone(), good],
            &white_only(),
            &fx.options(false),
            &AtomicBool::new(false),
            |_| {},
        );
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.kept, 1);
        assert!(summary.rejected.is_empty());
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].path, junk);
        assert!(junk.exists());
    }

    #[test]
    fn test_failed_disposal_is_skipped() {
        let fx = Fixture::new();
        let bad = fx.frame("b.png", [0, 0, 0]);
        let options = TriageOptions {
            disposal: Disposal::Move {
                destination: fx.dir.path().join("does-not-exist"),
            },
            dry_run: false,
            diagnostics: false,
        };

        let summary = run_triage(
            vec![bad.clone()],
            &white_only(),
            &options,
            &AtomicBool::new(false),
            |_| {},
        );
        assert!(summary.rejected.is_empty());
        assert_eq!(summary.skipped.len(), 1);
        assert!(summary.skipped[0].reason.starts_with("failed to move frame"));
        assert!(bad.exists());
    }

    #[test]
    fn test_interrupt_stops_before_next_frame() {
        let fx = Fixture::new();
        let first = fx.frame("a.png", [0, 0, 0]);
        let second = fx.frame("b.png", [0, 0, 0]);

        let flag = AtomicBool::new(false);
        let summary = run_triage(
            vec![first.clone(), second.clone()],
            &white_only(),
            &fx.options(false),
            &flag,
            |_| flag.store(true, Ordering::SeqCst),
        );
        assert!(summary.interrupted);
        assert_eq!(summary.processed, 1);
        assert!(!first.exists());
        assert!(second.exists());
    }

    #[test]
    fn test_diagnostics_attached_to_rejections() {
        let fx = Fixture::new();
        let bad = fx.frame("b.png", [0, 0, 0]);
        let mut options = fx.options(true);
        options.diagnostics = true;

        let record = triage_frame(&bad, &white_only(), &options);
        let names: Vec<&str> = record.reasons.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["p", "white"]);
    }

    #[test]
    fn test_record_serialization() {
        let record = FrameRecord {
            path: PathBuf::from("a.png"),
            outcome: FrameOutcome::Kept {
                specification: "day".to_string(),
            },
            reasons: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"path": "a.png", "outcome": "kept", "specification": "day"})
        );
    }
}
