//! Deep project context injected when the user asks to understand the project.

use regex::{Regex, RegexBuilder};

use crate::config::ContextConfig;
use crate::indexing::ProjectIndex;
use crate::utils::truncate_chars;

/// Prefix of every readup injection.
pub const READUP_BANNER: &str = "[Automatic Project Context Loaded]";

const MAX_GRAPH_ENTRIES: usize = 20;
const MAX_IMPORTS_PER_FILE: usize = 5;

/// Decides whether a prompt asks for a project overview.
pub struct ReadupTrigger {
    patterns: Vec<Regex>,
}

impl ReadupTrigger {
    /// Compile the configured patterns case-insensitively. Invalid patterns
    /// are logged and skipped.
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!("[readup] ignoring invalid pattern '{pattern}': {e}");
                        None
                    }
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn matches(&self, prompt: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(prompt))
    }
}

/// Render the readup body (without the banner).
///
/// The index sections appear only when an index exists; the README excerpt
/// only when a README exists.
pub fn render(index: Option<&ProjectIndex>, readme: Option<&str>, limits: &ContextConfig) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(index) = index {
        parts.push("## 🗂️ Complete Project Structure Analysis\n".to_string());

        parts.push("### File Organization:".to_string());
        parts.push(serde_json::to_string_pretty(&index.structure).unwrap_or_else(|_| "{}".into()));

        parts.push("\n### Dependency Graph:".to_string());
        for (file, deps) in index.dependencies_graph.iter().take(MAX_GRAPH_ENTRIES) {
            if deps.is_empty() {
                continue;
            }
            let imports: Vec<&str> = deps
                .iter()
                .take(MAX_IMPORTS_PER_FILE)
                .map(String::as_str)
                .collect();
            parts.push(format!("- {file}: imports {}", imports.join(", ")));
        }

        parts.push("\n### Statistics:".to_string());
        parts.push(format!("- Total files: {}", index.stats.total_files));
        for (file_type, count) in &index.stats.by_type {
            parts.push(format!("  - {file_type}: {count} files"));
        }
    }

    if let Some(readme) = readme {
        parts.push("\n### README Overview:".to_string());
        parts.push(truncate_chars(readme, limits.readme_chars).to_string());
    }

    parts.join("\n")
}

/// Banner plus body, as delivered to the assistant.
pub fn with_banner(body: &str) -> String {
    format!("{READUP_BANNER}\n{body}")
}
