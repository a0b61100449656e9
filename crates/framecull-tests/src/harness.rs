//! Test harness utilities for running CLI commands against frame directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;
use tempfile::TempDir;

use image::{Rgba, RgbaImage};

/// Result of running the framecull CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }

    /// Returns the last non-empty line of stdout.
    pub fn last_line(&self) -> &str {
        self.stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
    }

    /// Parses stdout as a JSON document.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// A test harness with a scratch directory for frames and specifications.
pub struct TestHarness {
    /// Working directory for test files; also the CLI's working directory.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Creates (if needed) and returns a directory under the work dir.
    pub fn dir(&self, name: &str) -> PathBuf {
        let dir = self.path().join(name);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Writes a PNG frame filled with one colour and returns its path.
    pub fn write_frame(&self, dir: &str, name: &str, width: u32, height: u32, fill: [u8; 4]) -> PathBuf {
        self.write_frame_with(dir, name, width, height, fill, &[])
    }

    /// Writes a PNG frame filled with one colour, with some pixels overridden.
    pub fn write_frame_with(
        &self,
        dir: &str,
        name: &str,
        width: u32,
        height: u32,
        fill: [u8; 4],
        pixels: &[(u32, u32, [u8; 4])],
    ) -> PathBuf {
        let mut frame = RgbaImage::from_pixel(width, height, Rgba(fill));
        for &(x, y, colour) in pixels {
            frame.put_pixel(x, y, Rgba(colour));
        }
        let path = self.dir(dir).join(name);
        frame.save(&path).expect("Failed to write frame");
        path
    }

    /// Writes a specification document and returns its path.
    pub fn write_spec(&self, name: &str, spec: &serde_json::Value) -> PathBuf {
        let path = self.path().join(name);
        let content = serde_json::to_string_pretty(spec).expect("Failed to serialize spec");
        fs::write(&path, content).expect("Failed to write spec file");
        path
    }

    /// Lists the file names in a directory under the work dir, sorted.
    pub fn file_names(&self, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.path().join(dir)) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Run the framecull CLI with the given arguments, from the work dir.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        let manifest_path = framecull_manifest_path();

        let output = Command::new("cargo")
            .args(["run", "--quiet", "--manifest-path"])
            .arg(&manifest_path)
            .args(["-p", "framecull-cli", "--"])
            .args(args)
            .current_dir(self.path())
            .output();

        match output {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }
}

fn framecull_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque white.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Opaque black.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];
