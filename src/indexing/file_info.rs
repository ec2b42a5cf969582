//! Per-file metadata produced by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse semantic tag for a file.
///
/// `Unspecified` serializes as the empty string, which is what the index
/// stores for files no rule claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Test,
    EntryPoint,
    Configuration,
    Documentation,
    Script,
    Library,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::EntryPoint => "entry_point",
            Self::Configuration => "configuration",
            Self::Documentation => "documentation",
            Self::Script => "script",
            Self::Library => "library",
            Self::Unspecified => "",
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal ranking: critical > high > normal > low.
///
/// Variant order matters, `Ord` is derived from it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// High or critical files are surfaced as critical files in the index.
    pub fn is_notable(&self) -> bool {
        *self >= Self::High
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the classifier derives from a file's name and content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub dependencies: Vec<String>,
    pub exports: Vec<String>,
    pub purpose: Purpose,
    pub importance: Importance,
}

/// Transient record for one indexed file. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    /// Extension without the dot, `"none"` when there is none
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: u64,
    pub modified: String,
    pub dependencies: Vec<String>,
    pub exports: Vec<String>,
    pub purpose: Purpose,
    pub importance: Importance,
}

impl FileInfo {
    /// Default metadata: type from the extension, nothing else inferred.
    pub fn with_defaults(path: String, file_type: String, size: u64, modified: String) -> Self {
        Self {
            path,
            file_type,
            size,
            modified,
            dependencies: Vec::new(),
            exports: Vec::new(),
            purpose: Purpose::Unspecified,
            importance: Importance::Normal,
        }
    }

    /// Fold a classification into the record.
    pub fn apply(&mut self, classification: Classification) {
        self.dependencies = classification.dependencies;
        self.exports = classification.exports;
        self.purpose = classification.purpose;
        self.importance = classification.importance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_ordering() {
        assert!(Importance::Critical > Importance::High);
        assert!(Importance::High > Importance::Normal);
        assert!(Importance::Normal > Importance::Low);
        assert!(Importance::Critical.is_notable());
        assert!(Importance::High.is_notable());
        assert!(!Importance::Normal.is_notable());
    }

    #[test]
    fn test_purpose_serializes_empty_when_unspecified() {
        assert_eq!(serde_json::to_string(&Purpose::Unspecified).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Purpose::EntryPoint).unwrap(), "\"entry_point\"");
        let back: Purpose = serde_json::from_str("\"\"").unwrap();
        assert!(back.is_unspecified());
    }

    #[test]
    fn test_file_info_serializes_type_field() {
        let info = FileInfo::with_defaults("a/b.rs".into(), "rs".into(), 3, String::new());
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["type"], "rs");
        assert_eq!(value["importance"], "normal");
        assert_eq!(value["purpose"], "");
    }
}
