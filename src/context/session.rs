//! Session-start summary.

use serde_json::Value;
use std::path::Path;

use crate::config::ContextConfig;
use crate::git::GitSnapshot;
use crate::indexing::ProjectIndex;
use crate::storage::TodoState;

const TOP_TYPES: usize = 5;
const MAX_ENTRY_POINTS: usize = 10;
const MAX_COMMITS: usize = 5;
const MAX_NPM_SCRIPTS: usize = 8;

/// Build and test entry points the project advertises.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableCommands {
    /// `None` when there is no readable `package.json` with a `scripts` table
    pub npm_scripts: Option<Vec<String>>,
    pub makefile: bool,
    pub cargo: bool,
}

impl AvailableCommands {
    pub fn detect(root: &Path) -> Self {
        Self {
            npm_scripts: npm_scripts(root),
            makefile: root.join("Makefile").is_file(),
            cargo: root.join("Cargo.toml").is_file(),
        }
    }
}

/// Script names from `package.json`, in declaration order.
pub fn npm_scripts(root: &Path) -> Option<Vec<String>> {
    let text = std::fs::read_to_string(root.join("package.json")).ok()?;
    let package: Value = serde_json::from_str(&text).ok()?;
    let scripts = package.get("scripts")?.as_object()?;
    Some(scripts.keys().cloned().collect())
}

/// Everything the session summary draws on. Absent parts are skipped.
pub struct SessionContext<'a> {
    pub index: Option<&'a ProjectIndex>,
    pub git: Option<&'a GitSnapshot>,
    pub todos: Option<&'a TodoState>,
    pub commands: &'a AvailableCommands,
    /// Snapshot written before compaction, appended when resuming from one
    pub preserved: Option<&'a str>,
}

impl SessionContext<'_> {
    pub fn render(&self, limits: &ContextConfig) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(index) = self.index {
            render_index(&mut parts, index, limits);
        }

        if let Some(git) = self.git {
            parts.push("\n## 📝 Recent Git Activity".to_string());
            parts.push(format!("- Current branch: {}", git.branch));
            parts.push(format!(
                "- Uncommitted changes: {} files",
                git.uncommitted_files
            ));
            if !git.recent_commits.is_empty() {
                parts.push("- Recent commits:".to_string());
                for commit in git.recent_commits.iter().take(MAX_COMMITS) {
                    parts.push(format!("  {commit}"));
                }
            }
        }

        if let Some(todos) = self.todos {
            let pending: Vec<_> = todos.pending().take(limits.max_pending_todos).collect();
            if !pending.is_empty() {
                parts.push("\n## 📋 Pending Tasks from Last Session".to_string());
                for todo in pending {
                    parts.push(format!("- {}", todo.content));
                }
            }
        }

        parts.push("\n## 🛠️ Available Commands".to_string());
        if let Some(scripts) = &self.commands.npm_scripts {
            parts.push("NPM Scripts available:".to_string());
            for script in scripts.iter().take(MAX_NPM_SCRIPTS) {
                parts.push(format!("- npm run {script}"));
            }
        }
        if self.commands.makefile {
            parts.push("Makefile targets available - use 'make' commands".to_string());
        }
        if self.commands.cargo {
            parts.push("Rust project - use 'cargo' commands".to_string());
        }

        if let Some(preserved) = self.preserved.filter(|p| !p.trim().is_empty()) {
            parts.push(format!("\n{}", preserved.trim_end()));
        }

        parts.join("\n")
    }
}

fn render_index(parts: &mut Vec<String>, index: &ProjectIndex, limits: &ContextConfig) {
    parts.push("## 📊 Project Index Summary".to_string());
    parts.push(format!("- Total files: {}", index.stats.total_files));
    parts.push(format!("- Last indexed: {}", index.generated));

    let top = index.stats.top_types(TOP_TYPES);
    if !top.is_empty() {
        let languages: Vec<String> = top
            .iter()
            .map(|(ty, count)| format!("{ty}({count})"))
            .collect();
        parts.push(format!("- Main languages: {}", languages.join(", ")));
    }

    if !index.critical_files.is_empty() {
        parts.push("\n### 🔑 Critical Files:".to_string());
        for file in index.critical_files.iter().take(limits.max_critical_files) {
            parts.push(format!("- {file}"));
        }
    }

    if !index.entry_points.is_empty() {
        parts.push("\n### 🚀 Entry Points:".to_string());
        for file in index.entry_points.iter().take(MAX_ENTRY_POINTS) {
            parts.push(format!("- {file}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::TodoItem;
    use std::fs;
    use tempfile::TempDir;

    fn sample_index() -> ProjectIndex {
        let mut index = ProjectIndex {
            generated: "2025-01-31T09:15:02.000000".into(),
            ..ProjectIndex::default()
        };
        index.stats.total_files = 12;
        index.stats.by_type.insert("js".into(), 4);
        index.stats.by_type.insert("rs".into(), 8);
        index.critical_files = (0..15).map(|i| format!("file{i}.rs")).collect();
        index.entry_points = vec!["src/main.rs".into()];
        index
    }

    fn todo(content: &str, status: &str) -> TodoItem {
        serde_json::from_value(serde_json::json!({"content": content, "status": status})).unwrap()
    }

    #[test]
    fn test_empty_project_only_lists_commands_header() {
        let commands = AvailableCommands::default();
        let ctx = SessionContext {
            index: None,
            git: None,
            todos: None,
            commands: &commands,
            preserved: None,
        };
        assert_eq!(ctx.render(&ContextConfig::default()), "\n## 🛠️ Available Commands");
    }

    #[test]
    fn test_full_summary() {
        let index = sample_index();
        let git = GitSnapshot {
            branch: "main".into(),
            uncommitted_files: 3,
            recent_commits: (1..=7).map(|i| format!("c{i} msg")).collect(),
        };
        let todos = TodoState {
            todos: vec![todo("Write docs", "pending"), todo("Done", "completed")],
            ..TodoState::default()
        };
        let commands = AvailableCommands {
            npm_scripts: Some(vec!["test".into(), "build".into()]),
            makefile: true,
            cargo: true,
        };
        let ctx = SessionContext {
            index: Some(&index),
            git: Some(&git),
            todos: Some(&todos),
            commands: &commands,
            preserved: None,
        };

        let out = ctx.render(&ContextConfig::default());
        assert!(out.starts_with("## 📊 Project Index Summary\n- Total files: 12\n"));
        assert!(out.contains("- Main languages: rs(8), js(4)"));
        assert!(out.contains("- file9.rs"));
        assert!(!out.contains("- file10.rs"));
        assert!(out.contains("### 🚀 Entry Points:\n- src/main.rs"));
        assert!(out.contains("- Current branch: main\n- Uncommitted changes: 3 files"));
        assert!(out.contains("  c5 msg"));
        assert!(!out.contains("c6 msg"));
        assert!(out.contains("## 📋 Pending Tasks from Last Session\n- Write docs"));
        assert!(!out.contains("- Done"));
        assert!(out.contains("- npm run test\n- npm run build"));
        assert!(out.contains("Makefile targets available"));
        assert!(out.ends_with("Rust project - use 'cargo' commands"));
    }

    #[test]
    fn test_no_pending_todos_omits_section() {
        let todos = TodoState {
            todos: vec![todo("Done", "completed")],
            ..TodoState::default()
        };
        let commands = AvailableCommands::default();
        let ctx = SessionContext {
            index: None,
            git: None,
            todos: Some(&todos),
            commands: &commands,
            preserved: None,
        };
        assert!(!ctx.render(&ContextConfig::default()).contains("Pending Tasks"));
    }

    #[test]
    fn test_preserved_snapshot_appended() {
        let commands = AvailableCommands::default();
        let ctx = SessionContext {
            index: None,
            git: None,
            todos: None,
            commands: &commands,
            preserved: Some("# Context Preserved from t\n\n## Project Context to Preserve:\n"),
        };
        let out = ctx.render(&ContextConfig::default());
        assert!(out.ends_with("\n# Context Preserved from t\n\n## Project Context to Preserve:"));
    }

    #[test]
    fn test_detect_commands() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("package.json"),
            r#"{"scripts": {"dev": "vite", "test": "vitest", "lint": "eslint ."}}"#,
        )
        .unwrap();
        fs::write(root.join("Makefile"), "test:\n\ttrue\n").unwrap();

        let commands = AvailableCommands::detect(root);
        assert_eq!(
            commands.npm_scripts,
            Some(vec!["dev".to_string(), "test".to_string(), "lint".to_string()])
        );
        assert!(commands.makefile);
        assert!(!commands.cargo);
    }

    #[test]
    fn test_malformed_package_json_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), "{").unwrap();
        assert_eq!(npm_scripts(temp_dir.path()), None);
    }
}
