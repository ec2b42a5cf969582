//! File system walker for discovering files to index
//!
//! This module provides directory traversal with support for:
//! - Pruning excluded directories by name, wherever they appear
//! - Optional .gitignore rules
//! - Hidden files (included, unlike most source indexers)

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::IndexingConfig;
use crate::debug_event;

/// Walks directories to find files to index
pub struct FileWalker {
    excluded_dirs: Vec<String>,
    respect_gitignore: bool,
}

impl FileWalker {
    /// Create a new file walker from indexing settings
    pub fn new(config: &IndexingConfig) -> Self {
        Self {
            excluded_dirs: config.excluded_dirs.clone(),
            respect_gitignore: config.respect_gitignore,
        }
    }

    /// Walk a directory and return an iterator of files to index, including
    /// symlinks that resolve to files.
    ///
    /// Entries are yielded sorted by file name within each directory so two
    /// runs over the same tree produce identical indexes.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
        let mut builder = WalkBuilder::new(root);

        builder
            .standard_filters(false)
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let excluded = self.excluded_dirs.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && excluded.iter().any(|name| entry.file_name() == name.as_str()))
        });

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug_event!("walker", "skipped", "{e}");
                    None
                }
            })
            // Symlinks to files count; symlinked directories are not descended
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file() || (ft.is_symlink() && entry.path().is_file()))
            })
            .map(|entry| entry.into_path())
    }

    /// Count files that would be indexed
    pub fn count_files(&self, root: &Path) -> usize {
        self.walk(root).count()
    }
}
