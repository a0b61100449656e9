//! Enumerating the frames of a source directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the regular files directly inside `source`, sorted by file name.
///
/// Subdirectories are not descended into, so a destination directory nested
/// in the source is never picked up as a frame.
pub fn scan_frames(source: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut frames = Vec::new();
    for entry in WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            frames.push(entry.into_path());
        }
    }
    Ok(frames)
}
