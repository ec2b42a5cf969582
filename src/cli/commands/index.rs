//! Index command - build and save the project index.

use anyhow::Context;
use std::path::Path;

use crate::config::Settings;
use crate::hooks::index_refresh::rebuild;
use crate::indexing::FileWalker;
use crate::storage::StateStore;

/// Run the index command.
pub fn run(root: &Path, settings: &Settings, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        let count = FileWalker::new(&settings.indexing).count_files(root);
        println!("Would index {count} files under {}", root.display());
        return Ok(());
    }

    println!("Building index for: {}", root.display());
    let store = StateStore::new(root);
    let (index, path) = rebuild(settings, &store)
        .with_context(|| format!("Failed to index {}", root.display()))?;

    let types: Vec<&str> = index.stats.by_type.keys().map(String::as_str).collect();
    println!("✓ Index created: {}", path.display());
    println!("  Total files: {}", index.stats.total_files);
    println!("  File types: {}", types.join(", "));
    println!("  Critical files: {}", index.critical_files.len());
    println!("  Entry points: {}", index.entry_points.len());
    Ok(())
}
