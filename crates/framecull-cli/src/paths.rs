//! Source and destination directory checks performed before a run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A source or destination directory that cannot be used.
#[derive(Debug)]
pub enum PathError {
    /// The source directory does not exist.
    SourceMissing { path: PathBuf },

    /// The source exists but is not a directory.
    SourceNotDirectory { path: PathBuf },

    /// The destination exists but is not a directory.
    DestinationNotDirectory { path: PathBuf },

    /// The destination could not be created because its parent is missing.
    DestinationMissingParents { path: PathBuf },

    /// The destination could not be created due to permissions.
    DestinationPermissionDenied { path: PathBuf },

    /// Any other failure while creating the destination.
    DestinationCreate { path: PathBuf, source: io::Error },
}

impl PathError {
    /// Returns the directory the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            PathError::SourceMissing { path }
            | PathError::SourceNotDirectory { path }
            | PathError::DestinationNotDirectory { path }
            | PathError::DestinationMissingParents { path }
            | PathError::DestinationPermissionDenied { path }
            | PathError::DestinationCreate { path, .. } => path,
        }
    }
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::SourceMissing { .. } => write!(f, "The specified source does not exist."),
            PathError::SourceNotDirectory { .. } => {
                write!(f, "The specified source is not a directory.")
            }
            PathError::DestinationNotDirectory { .. } => {
                write!(f, "The specified destination is not a directory.")
            }
            PathError::DestinationMissingParents { .. } => write!(
                f,
                "The specified destination directory could not be created because of missing parents."
            ),
            PathError::DestinationPermissionDenied { .. } => write!(
                f,
                "The destination directory could not be created due to inadequate permissions."
            ),
            PathError::DestinationCreate { path, source } => write!(
                f,
                "The destination directory '{}' could not be created: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::DestinationCreate { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Checks that `source` exists and is a directory.
pub fn verify_source(source: &Path) -> Result<(), PathError> {
    if !source.exists() {
        return Err(PathError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(PathError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }
    Ok(())
}

/// Checks that `destination` is usable as a directory.
///
/// A missing destination is created when `create` is set (only the last
/// component; parents must already exist) and left alone otherwise. An
/// existing non-directory is always an error.
pub fn prepare_destination(destination: &Path, create: bool) -> Result<(), PathError> {
    if destination.exists() {
        if !destination.is_dir() {
            return Err(PathError::DestinationNotDirectory {
                path: destination.to_path_buf(),
            });
        }
        return Ok(());
    }

    if !create {
        return Ok(());
    }

    fs::create_dir(destination).map_err(|e| {
        let path = destination.to_path_buf();
        match e.kind() {
            io::ErrorKind::NotFound => PathError::DestinationMissingParents { path },
            io::ErrorKind::PermissionDenied => PathError::DestinationPermissionDenied { path },
            _ => PathError::DestinationCreate { path, source: e },
        }
    })
}
