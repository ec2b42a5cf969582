//! The project index document and the indexer that builds it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::classifier::Classifier;
use super::error::{IndexError, IndexResult};
use super::file_info::{FileInfo, Importance, Purpose};
use super::walker::FileWalker;
use crate::config::IndexingConfig;
use crate::utils::{local_timestamp, to_slash_path};
use crate::{debug_event, log_event};

/// Schema version written into every index.
pub const INDEX_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub by_type: IndexMap<String, usize>,
    #[serde(default)]
    pub by_purpose: IndexMap<String, usize>,
}

impl IndexStats {
    /// The `limit` most common file types, ties kept in first-seen order.
    pub fn top_types(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut types: Vec<(&str, usize)> = self
            .by_type
            .iter()
            .map(|(ty, count)| (ty.as_str(), *count))
            .collect();
        types.sort_by(|a, b| b.1.cmp(&a.1));
        types.truncate(limit);
        types
    }
}

/// Leaf of the structure tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLeaf {
    #[serde(rename = "type")]
    pub file_type: String,
    pub purpose: Purpose,
    pub importance: Importance,
}

/// A node of the directory tree: a file leaf or a nested directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureNode {
    File(FileLeaf),
    Dir(IndexMap<String, StructureNode>),
}

/// Snapshot of the whole project, persisted as `.claude/.index.json`.
///
/// Every map keeps enumeration order so the document diffs cleanly between
/// runs over an unchanged tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIndex {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub generated: String,
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub stats: IndexStats,
    #[serde(default)]
    pub structure: IndexMap<String, StructureNode>,
    #[serde(default)]
    pub critical_files: Vec<String>,
    #[serde(default)]
    pub entry_points: Vec<String>,
    #[serde(default)]
    pub test_files: Vec<String>,
    #[serde(default)]
    pub dependencies_graph: IndexMap<String, Vec<String>>,
}

impl ProjectIndex {
    fn empty(root: &Path) -> Self {
        Self {
            version: INDEX_VERSION.to_string(),
            generated: local_timestamp(),
            root: root.display().to_string(),
            ..Self::default()
        }
    }

    /// Fold one classified file into the aggregates.
    fn record(&mut self, info: &FileInfo) {
        self.stats.total_files += 1;
        *self.stats.by_type.entry(info.file_type.clone()).or_default() += 1;

        if info.purpose.is_unspecified() {
            return;
        }
        *self
            .stats
            .by_purpose
            .entry(info.purpose.as_str().to_string())
            .or_default() += 1;

        if info.importance.is_notable() {
            self.critical_files.push(info.path.clone());
        }
        match info.purpose {
            Purpose::EntryPoint => self.entry_points.push(info.path.clone()),
            Purpose::Test => self.test_files.push(info.path.clone()),
            _ => {}
        }
    }

    /// Insert a file leaf under its `/`-separated path.
    fn insert_leaf(&mut self, info: &FileInfo) {
        let mut parts: Vec<&str> = info.path.split('/').collect();
        let Some(name) = parts.pop() else {
            return;
        };

        let mut current = &mut self.structure;
        for part in parts {
            let node = current
                .entry(part.to_string())
                .or_insert_with(|| StructureNode::Dir(IndexMap::new()));
            if let StructureNode::File(_) = node {
                *node = StructureNode::Dir(IndexMap::new());
            }
            let StructureNode::Dir(children) = node else {
                return;
            };
            current = children;
        }

        current.insert(
            name.to_string(),
            StructureNode::File(FileLeaf {
                file_type: info.file_type.clone(),
                purpose: info.purpose,
                importance: info.importance,
            }),
        );
    }
}

/// Walks a project root and produces a [`ProjectIndex`].
pub struct ProjectIndexer {
    walker: FileWalker,
    classifier: Classifier,
}

impl ProjectIndexer {
    pub fn new(config: &IndexingConfig) -> IndexResult<Self> {
        Ok(Self {
            walker: FileWalker::new(config),
            classifier: Classifier::new(config)?,
        })
    }

    /// Build the index for `root`. Persisting it is the caller's job.
    pub fn build(&self, root: &Path) -> IndexResult<ProjectIndex> {
        check_root(root)?;

        let mut index = ProjectIndex::empty(root);
        let mut files: Vec<FileInfo> = Vec::new();

        for path in self.walker.walk(root) {
            let rel_path = path
                .strip_prefix(root)
                .map(to_slash_path)
                .unwrap_or_else(|_| to_slash_path(&path));
            let info = self.classifier.classify(&path, rel_path);
            debug_event!(
                "indexer",
                "classified",
                "{} {} {}",
                info.path,
                info.purpose,
                info.importance
            );
            index.record(&info);
            files.push(info);
        }

        for info in &files {
            index.insert_leaf(info);
        }
        for info in files {
            if !info.dependencies.is_empty() {
                index.dependencies_graph.insert(info.path, info.dependencies);
            }
        }

        log_event!(
            "indexer",
            "built",
            "{} files under {}",
            index.stats.total_files,
            root.display()
        );
        Ok(index)
    }
}

fn check_root(root: &Path) -> IndexResult<()> {
    let metadata = fs::metadata(root).map_err(|source| IndexError::RootUnreadable {
        path: PathBuf::from(root),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(IndexError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }
    fs::read_dir(root).map_err(|source| IndexError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}
