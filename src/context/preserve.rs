//! Snapshot of critical context written before the host compacts the
//! conversation.

use crate::config::ContextConfig;
use crate::indexing::ProjectIndex;
use crate::storage::TodoState;

const MAX_CRITICAL_FILES: usize = 5;

/// Number of shell history lines carried into the snapshot.
pub const RECENT_COMMANDS: usize = 5;

pub struct PreservedContext<'a> {
    pub index: Option<&'a ProjectIndex>,
    pub recent_commands: &'a [String],
    pub todos: Option<&'a TodoState>,
}

impl PreservedContext<'_> {
    /// Body of the snapshot, without the dated header.
    pub fn render(&self, limits: &ContextConfig) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(index) = self.index {
            parts.push("## Project Context to Preserve:".to_string());
            parts.push(format!("- Project has {} files", index.stats.total_files));
            let critical: Vec<&str> = index
                .critical_files
                .iter()
                .take(MAX_CRITICAL_FILES)
                .map(String::as_str)
                .collect();
            parts.push(format!("- Critical files: {}", critical.join(", ")));
            if !index.entry_points.is_empty() {
                parts.push(format!("- Entry points: {}", index.entry_points.join(", ")));
            }
        }

        if !self.recent_commands.is_empty() {
            parts.push("\n## Recent Commands Used:".to_string());
            let skip = self.recent_commands.len().saturating_sub(RECENT_COMMANDS);
            for command in &self.recent_commands[skip..] {
                parts.push(format!("- {command}"));
            }
        }

        if let Some(todos) = self.todos {
            let pending: Vec<_> = todos.pending().take(limits.max_pending_todos).collect();
            if !pending.is_empty() {
                parts.push("\n## Current Tasks:".to_string());
                for todo in pending {
                    parts.push(format!("- {}", todo.content));
                }
            }
        }

        parts.join("\n")
    }
}

/// Full snapshot document: dated header, blank line, body.
pub fn snapshot_document(timestamp: &str, body: &str) -> String {
    format!("# Context Preserved from {timestamp}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all_sections() {
        let mut index = ProjectIndex::default();
        index.stats.total_files = 40;
        index.critical_files = (1..=7).map(|i| format!("c{i}")).collect();
        index.entry_points = vec!["src/main.rs".into(), "src/bin/x.rs".into()];
        let commands: Vec<String> = (1..=6).map(|i| format!("cargo t{i}")).collect();
        let todos: TodoState = serde_json::from_value(serde_json::json!({
            "todos": [{"content": "wire CLI", "status": "pending"}]
        }))
        .unwrap();

        let body = PreservedContext {
            index: Some(&index),
            recent_commands: &commands,
            todos: Some(&todos),
        }
        .render(&ContextConfig::default());

        assert_eq!(
            body,
            "## Project Context to Preserve:\n\
             - Project has 40 files\n\
             - Critical files: c1, c2, c3, c4, c5\n\
             - Entry points: src/main.rs, src/bin/x.rs\n\
             \n## Recent Commands Used:\n\
             - cargo t2\n- cargo t3\n- cargo t4\n- cargo t5\n- cargo t6\n\
             \n## Current Tasks:\n\
             - wire CLI"
        );
    }

    #[test]
    fn test_nothing_available() {
        let body = PreservedContext {
            index: None,
            recent_commands: &[],
            todos: None,
        }
        .render(&ContextConfig::default());
        assert_eq!(body, "");
        assert_eq!(
            snapshot_document("2025-01-01T00:00:00", &body),
            "# Context Preserved from 2025-01-01T00:00:00\n\n"
        );
    }
}
