//! Shallow post-edit syntax checks.
//!
//! These are deliberately cheap heuristics: a compile-only pass for Python and
//! delimiter counting for JavaScript/TypeScript. They exist to catch an edit
//! that left a file obviously broken, not to replace a linter.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::{IndexingConfig, ValidationConfig};
use crate::context::session::npm_scripts;
use crate::debug_event;
use crate::indexing::FileWalker;
use crate::process::CommandRunner;
use crate::utils::truncate_chars;

const STDERR_CHARS: usize = 500;
const SCRIPT_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];
const TEST_SCRIPT_KEYWORDS: &[&str] = &["test", "lint", "check", "typecheck"];

pub struct Validator<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a ValidationConfig,
}

impl<'a> Validator<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a ValidationConfig) -> Self {
        Self { runner, config }
    }

    /// Files with a skipped extension are never checked.
    pub fn should_validate(&self, file_path: &str) -> bool {
        !self
            .config
            .skip_extensions
            .iter()
            .any(|ext| file_path.ends_with(&format!(".{ext}")))
    }

    /// Check one file. `display_path` is what the findings name; `path` is
    /// where the file lives. Returns the findings, one per line, or `None`.
    pub fn check(&self, display_path: &str, path: &Path, cwd: &Path) -> Option<String> {
        if !self.should_validate(display_path) {
            return None;
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let findings = if extension == "py" {
            self.check_python(display_path, path, cwd)
        } else if SCRIPT_EXTENSIONS.contains(&extension) {
            check_delimiters(display_path, path)
        } else {
            Vec::new()
        };

        (!findings.is_empty()).then(|| findings.join("\n"))
    }

    fn check_python(&self, display_path: &str, path: &Path, cwd: &Path) -> Vec<String> {
        let path_arg = path.to_string_lossy();
        let output = match self.runner.run(
            &self.config.python,
            &["-m", "py_compile", &path_arg],
            cwd,
            Some(Duration::from_secs(self.config.timeout_secs)),
        ) {
            Ok(output) => output,
            Err(e) => {
                debug_event!("validator", "python unavailable", "{e}");
                return Vec::new();
            }
        };

        if output.timed_out || output.success() {
            return Vec::new();
        }
        vec![
            format!("⚠️ Python syntax error in {display_path}"),
            truncate_chars(&output.stderr, STDERR_CHARS).to_string(),
        ]
    }
}

fn check_delimiters(display_path: &str, path: &Path) -> Vec<String> {
    let content = match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug_event!("validator", "unreadable", "{}: {e}", path.display());
            return Vec::new();
        }
    };

    let count = |c: char| content.chars().filter(|&x| x == c).count();
    let mut findings = Vec::new();
    if count('{') != count('}') {
        findings.push(format!("⚠️ Possible bracket mismatch in {display_path}"));
    }
    if count('(') != count(')') {
        findings.push(format!("⚠️ Possible parenthesis mismatch in {display_path}"));
    }
    findings
}

/// Test and lint commands the project appears to support.
pub fn detect_test_commands(
    runner: &dyn CommandRunner,
    root: &Path,
    indexing: &IndexingConfig,
) -> Vec<String> {
    let mut commands = Vec::new();

    for script in npm_scripts(root).unwrap_or_default() {
        let lower = script.to_lowercase();
        if TEST_SCRIPT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            commands.push(format!("npm run {script}"));
        }
    }

    if root.join("Makefile").is_file()
        && runner
            .run("make", &["-n", "test"], root, None)
            .is_ok_and(|output| output.success())
    {
        commands.push("make test".to_string());
    }

    let has_pytest_files = FileWalker::new(indexing).walk(root).any(|path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("test_") && n.ends_with(".py"))
    });
    if has_pytest_files {
        commands.push("pytest".to_string());
    }

    if root.join("Cargo.toml").is_file() {
        commands.push("cargo test".to_string());
        commands.push("cargo clippy".to_string());
    }

    commands
}
