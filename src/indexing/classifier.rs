//! Rule-based file classification.
//!
//! The classifier is a prioritized rule table. Each [`RuleGroup`] selects files
//! (by extension or by exact file name), optionally extracts dependency and
//! export lists with regexes, and then walks its [`PurposeRule`]s in order; the
//! first matching rule decides purpose and importance. Groups are tried in
//! order and the first selecting group is the only one applied.
//!
//! Classification is a pure function of the relative path and the content,
//! so re-running it on an unchanged file always yields the same result.

use regex::{Regex, RegexBuilder};
use std::fs;
use std::path::Path;

use super::error::IndexResult;
use super::file_info::{Classification, FileInfo, Importance, Purpose};
use crate::config::IndexingConfig;
use crate::debug_event;
use crate::utils::format_system_time;

/// Type recorded for files without an extension.
pub const NO_EXTENSION: &str = "none";

/// Extension-derived file type (`"rs"`, `"json"`, or `"none"`).
pub fn file_type(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| NO_EXTENSION.to_string())
}

/// The parts of a file a rule may look at.
struct Subject<'a> {
    rel_path: &'a str,
    file_name: &'a str,
    file_stem: &'a str,
    content: &'a str,
}

/// How a rule inspects a file.
enum Matcher {
    /// Always matches; used as a group's fallback rule
    Always,
    /// Regex against the relative path
    PathPattern(Regex),
    /// Case-sensitive substring of the file name
    NameContains(&'static str),
    /// Regex against the file name
    NamePattern(Regex),
    /// Exact file name
    NameEquals(&'static str),
    /// Case-insensitive file stem (name without the last extension)
    StemEqualsIgnoreCase(&'static str),
    /// Substring of the file content
    ContentContains(&'static str),
}

impl Matcher {
    fn matches(&self, subject: &Subject<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::PathPattern(re) => re.is_match(subject.rel_path),
            Self::NameContains(needle) => subject.file_name.contains(needle),
            Self::NamePattern(re) => re.is_match(subject.file_name),
            Self::NameEquals(name) => subject.file_name == *name,
            Self::StemEqualsIgnoreCase(stem) => subject.file_stem.eq_ignore_ascii_case(stem),
            Self::ContentContains(needle) => subject.content.contains(needle),
        }
    }
}

/// A single predicate → {purpose, importance} entry.
pub struct PurposeRule {
    matcher: Matcher,
    purpose: Purpose,
    importance: Importance,
}

impl PurposeRule {
    fn new(matcher: Matcher, purpose: Purpose, importance: Importance) -> Self {
        Self {
            matcher,
            purpose,
            importance,
        }
    }
}

/// Pulls identifiers out of content.
///
/// Each match contributes its first participating capture group, with runs of
/// whitespace collapsed. Results are de-duplicated in first-seen order.
struct Extractor(Regex);

impl Extractor {
    fn multiline(pattern: &str) -> IndexResult<Self> {
        Ok(Self(RegexBuilder::new(pattern).multi_line(true).build()?))
    }

    fn extract(&self, content: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for caps in self.0.captures_iter(content) {
            let Some(group) = caps.iter().skip(1).flatten().next() else {
                continue;
            };
            let value = group.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            if !value.is_empty() && !found.contains(&value) {
                found.push(value);
            }
        }
        found
    }
}

/// Which files a group applies to.
enum Selector {
    Extensions(&'static [&'static str]),
    FileNames(Vec<String>),
}

impl Selector {
    fn selects(&self, extension: Option<&str>, file_name: &str) -> bool {
        match self {
            Self::Extensions(exts) => extension.is_some_and(|ext| exts.contains(&ext)),
            Self::FileNames(names) => names.iter().any(|name| name == file_name),
        }
    }
}

/// Rules for one family of files.
pub struct RuleGroup {
    name: &'static str,
    selector: Selector,
    dependencies: Option<Extractor>,
    exports: Option<Extractor>,
    rules: Vec<PurposeRule>,
}

impl RuleGroup {
    fn apply(&self, subject: &Subject<'_>) -> Classification {
        let mut classification = Classification {
            dependencies: self
                .dependencies
                .as_ref()
                .map(|e| e.extract(subject.content))
                .unwrap_or_default(),
            exports: self
                .exports
                .as_ref()
                .map(|e| e.extract(subject.content))
                .unwrap_or_default(),
            ..Classification::default()
        };

        if let Some(rule) = self.rules.iter().find(|r| r.matcher.matches(subject)) {
            classification.purpose = rule.purpose;
            classification.importance = rule.importance;
        }
        classification
    }
}

fn script_group() -> IndexResult<RuleGroup> {
    Ok(RuleGroup {
        name: "javascript",
        selector: Selector::Extensions(&["js", "ts", "jsx", "tsx"]),
        dependencies: Some(Extractor::multiline(
            r#"(?:import|require)\s*\(?\s*['"]([^'"]+)['"]|\bfrom\s+['"]([^'"]+)['"]"#,
        )?),
        exports: Some(Extractor::multiline(
            r"export\s+(?:default\s+)?(?:class|function|const|let|var)\s+(\w+)",
        )?),
        rules: vec![
            PurposeRule::new(
                Matcher::PathPattern(Regex::new(r"(test|spec)\.(js|ts)x?$")?),
                Purpose::Test,
                Importance::Low,
            ),
            PurposeRule::new(
                Matcher::NameContains("index"),
                Purpose::EntryPoint,
                Importance::High,
            ),
            PurposeRule::new(
                Matcher::NamePattern(Regex::new(r"(?i)(config|setup)")?),
                Purpose::Configuration,
                Importance::High,
            ),
        ],
    })
}

fn python_group() -> IndexResult<RuleGroup> {
    Ok(RuleGroup {
        name: "python",
        selector: Selector::Extensions(&["py"]),
        dependencies: Some(Extractor::multiline(r"^(?:from\s+(\S+)|import\s+(\S+))")?),
        exports: Some(Extractor::multiline(r"^(?:class|def)\s+(\w+)")?),
        rules: vec![
            PurposeRule::new(
                Matcher::ContentContains("__main__"),
                Purpose::Script,
                Importance::High,
            ),
            PurposeRule::new(Matcher::NameContains("test_"), Purpose::Test, Importance::Low),
            PurposeRule::new(Matcher::NameContains("_test"), Purpose::Test, Importance::Low),
        ],
    })
}

fn rust_group() -> IndexResult<RuleGroup> {
    Ok(RuleGroup {
        name: "rust",
        selector: Selector::Extensions(&["rs"]),
        dependencies: Some(Extractor::multiline(r"\buse\s+([^;]+);")?),
        exports: None,
        rules: vec![
            PurposeRule::new(
                Matcher::NameEquals("main.rs"),
                Purpose::EntryPoint,
                Importance::High,
            ),
            PurposeRule::new(
                Matcher::NameEquals("lib.rs"),
                Purpose::Library,
                Importance::High,
            ),
        ],
    })
}

fn config_group(config_files: &[String]) -> RuleGroup {
    RuleGroup {
        name: "configuration",
        selector: Selector::FileNames(config_files.to_vec()),
        dependencies: None,
        exports: None,
        rules: vec![PurposeRule::new(
            Matcher::Always,
            Purpose::Configuration,
            Importance::Critical,
        )],
    }
}

fn documentation_group() -> RuleGroup {
    RuleGroup {
        name: "documentation",
        selector: Selector::Extensions(&["md", "mdx"]),
        dependencies: None,
        exports: None,
        rules: vec![
            PurposeRule::new(
                Matcher::StemEqualsIgnoreCase("readme"),
                Purpose::Documentation,
                Importance::Critical,
            ),
            PurposeRule::new(Matcher::Always, Purpose::Documentation, Importance::Normal),
        ],
    }
}

/// Infers type, purpose, importance and shallow dependency/export lists.
pub struct Classifier {
    groups: Vec<RuleGroup>,
    max_file_size: u64,
}

impl Classifier {
    /// Build the builtin rule table, with configuration file names and the
    /// size guard taken from settings.
    pub fn new(config: &IndexingConfig) -> IndexResult<Self> {
        Ok(Self {
            groups: vec![
                script_group()?,
                python_group()?,
                rust_group()?,
                config_group(&config.config_files),
                documentation_group(),
            ],
            max_file_size: config.max_file_size,
        })
    }

    /// Classify already-loaded content. `rel_path` is `/`-separated.
    pub fn classify_content(&self, rel_path: &str, content: &str) -> Classification {
        let path = Path::new(rel_path);
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or(rel_path);
        let file_stem = path.file_stem().and_then(|n| n.to_str()).unwrap_or(file_name);
        let extension = path.extension().and_then(|e| e.to_str());

        let subject = Subject {
            rel_path,
            file_name,
            file_stem,
            content,
        };

        self.groups
            .iter()
            .find(|group| group.selector.selects(extension, file_name))
            .map(|group| {
                debug_event!("classifier", "group", "{} -> {}", rel_path, group.name);
                group.apply(&subject)
            })
            .unwrap_or_default()
    }

    /// Classify a file on disk.
    ///
    /// Never fails: missing metadata, oversized files and read errors all
    /// degrade to default metadata for this one file.
    pub fn classify(&self, path: &Path, rel_path: String) -> FileInfo {
        let file_type = file_type(path);

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug_event!("classifier", "stat failed", "{}: {e}", path.display());
                return FileInfo::with_defaults(rel_path, file_type, 0, String::new());
            }
        };

        let modified = metadata
            .modified()
            .map(format_system_time)
            .unwrap_or_default();
        let mut info = FileInfo::with_defaults(rel_path, file_type, metadata.len(), modified);

        if !metadata.is_file() || metadata.len() > self.max_file_size {
            return info;
        }

        match fs::read(path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                let classification = self.classify_content(&info.path, &content);
                info.apply(classification);
            }
            Err(e) => {
                debug_event!("classifier", "read failed", "{}: {e}", path.display());
            }
        }
        info
    }
}
