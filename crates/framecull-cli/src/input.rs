//! Loading specification documents from disk.
//!
//! Every document is parsed into a rule tree up front, so a malformed rule in
//! any file stops the run before a single frame is touched.

use framecull_spec::{SpecError, Specification};
use std::path::{Path, PathBuf};

/// A specification loaded from a file.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The parsed rule tree.
    pub specification: Specification,
    /// File the specification was read from.
    pub path: PathBuf,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while loading a specification file.
#[derive(Debug)]
pub enum InputError {
    /// File does not exist.
    FileNotFound { path: PathBuf },

    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not well-formed JSON.
    JsonParse { path: PathBuf, message: String },

    /// File is JSON but not a valid rule tree.
    InvalidRule { path: PathBuf, message: String },
}

impl InputError {
    /// Returns the file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            InputError::FileNotFound { path }
            | InputError::FileRead { path, .. }
            | InputError::JsonParse { path, .. }
            | InputError::InvalidRule { path, .. } => path,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileNotFound { path } => {
                write!(
                    f,
                    "The specification file does not exist ({}).",
                    path.display()
                )
            }
            InputError::FileRead { path, source } => {
                write!(
                    f,
                    "failed to read specification file '{}': {}",
                    path.display(),
                    source
                )
            }
            InputError::JsonParse { path, message } => {
                write!(f, "JSON parse error in '{}': {}", path.display(), message)
            }
            InputError::InvalidRule { path, message } => {
                write!(f, "invalid rule in '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads and parses one specification file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use framecull_cli::input::load_specification;
///
/// let loaded = load_specification(Path::new("daylight.json")).unwrap();
/// println!("{} rule(s)", loaded.specification.rule_count());
/// ```
pub fn load_specification(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InputError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InputError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let source_hash = blake3::hash(&content).to_hex().to_string();

    let specification = Specification::from_slice(&content).map_err(|e| match e {
        SpecError::JsonParse(message) => InputError::JsonParse {
            path: path.to_path_buf(),
            message,
        },
        SpecError::Io(source) => InputError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => InputError::InvalidRule {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    Ok(LoadResult {
        specification,
        path: path.to_path_buf(),
        source_hash,
    })
}

/// Loads every file in order, stopping at the first failure.
pub fn load_specifications<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LoadResult>, InputError> {
    paths
        .iter()
        .map(|path| load_specification(path.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_specification() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "hd.json",
            r#"{"name": "hd", "rules": [{"type": "size", "name": "s", "width": 1920, "height": 1080}]}"#,
        );
        let loaded = load_specification(&path).unwrap();
        assert_eq!(loaded.specification.name, "hd");
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.source_hash.len(), 64);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_specification(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, InputError::FileNotFound { .. }));
        assert!(err.to_string().starts_with("The specification file does not exist"));
        assert!(err.path().ends_with("nope.json"));
    }

    #[test]
    fn test_syntax_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{\"name\": ");
        assert!(matches!(
            load_specification(&path),
            Err(InputError::JsonParse { .. })
        ));
    }

    #[test]
    fn test_invalid_rule() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "unknown.json",
            r#"{"name": "u", "rules": [{"type": "exposure", "name": "e"}]}"#,
        );
        let err = load_specification(&path).unwrap_err();
        assert!(matches!(err, InputError::InvalidRule { .. }));
        assert!(err.to_string().contains("exposure"));
    }

    #[test]
    fn test_load_many_stops_at_first_error() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.json", r#"{"name": "g", "rules": []}"#);
        let missing = dir.path().join("missing.json");

        let loaded = load_specifications(&[good.clone(), good.clone()]).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].source_hash, loaded[1].source_hash);

        let err = load_specifications(&[good, missing]).unwrap_err();
        assert!(matches!(err, InputError::FileNotFound { .. }));
    }
}
