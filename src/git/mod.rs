//! Read-only git inspection.
//!
//! Every query degrades to "no information" when git is missing, the
//! directory is not a repository, or the command fails.

pub mod suggest;

use std::path::Path;

use crate::debug_event;
use crate::process::CommandRunner;

pub use suggest::{FALLBACK_SUGGESTION, suggest_commit};

/// Git queries against one working tree.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    cwd: &'a Path,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner, cwd: &'a Path) -> Self {
        Self { runner, cwd }
    }

    /// Trimmed stdout of a successful, non-empty `git <args>`.
    fn git_cmd(&self, args: &[&str]) -> Option<String> {
        match self.runner.run("git", args, self.cwd, None) {
            Ok(output) => output.stdout_if_success().map(str::to_string),
            Err(e) => {
                debug_event!("git", "unavailable", "{e}");
                None
            }
        }
    }

    pub fn is_repository(&self) -> bool {
        self.runner
            .run("git", &["rev-parse", "--git-dir"], self.cwd, None)
            .is_ok_and(|output| output.success())
    }

    pub fn current_branch(&self) -> String {
        self.git_cmd(&["branch", "--show-current"])
            .unwrap_or_default()
    }

    /// Number of entries in `git status --short`.
    pub fn uncommitted_count(&self) -> usize {
        self.git_cmd(&["status", "--short"])
            .map(|out| out.lines().filter(|l| !l.trim().is_empty()).count())
            .unwrap_or(0)
    }

    /// Up to ten one-line commits from the last seven days, newest first.
    pub fn recent_commits(&self) -> Vec<String> {
        self.git_cmd(&["log", "--oneline", "-10", "--since=7.days.ago"])
            .map(|out| out.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether `git status --porcelain` reports anything at all.
    pub fn has_changes(&self) -> bool {
        self.git_cmd(&["status", "--porcelain"]).is_some()
    }

    /// `git diff --staged --stat`, falling back to the unstaged diff.
    pub fn diff_stat(&self) -> Option<String> {
        self.git_cmd(&["diff", "--staged", "--stat"])
            .or_else(|| self.git_cmd(&["diff", "--stat"]))
    }
}

/// Repository state shown at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSnapshot {
    pub branch: String,
    pub uncommitted_files: usize,
    pub recent_commits: Vec<String>,
}

impl GitSnapshot {
    /// `None` when `cwd` is not inside a git repository.
    pub fn collect(runner: &dyn CommandRunner, cwd: &Path) -> Option<Self> {
        let git = Git::new(runner, cwd);
        if !git.is_repository() {
            return None;
        }
        Some(Self {
            branch: git.current_branch(),
            uncommitted_files: git.uncommitted_count(),
            recent_commits: git.recent_commits(),
        })
    }
}
