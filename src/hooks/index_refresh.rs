//! Rebuilds the project index after file-modifying tool use.

use std::path::PathBuf;

use super::error::HookResult;
use super::types::{HookInput, HookOutput};
use super::HookContext;
use crate::config::Settings;
use crate::indexing::{ProjectIndex, ProjectIndexer};
use crate::storage::StateStore;

/// Build the index for the store's project and persist it.
pub fn rebuild(settings: &Settings, store: &StateStore) -> HookResult<(ProjectIndex, PathBuf)> {
    let index = ProjectIndexer::new(&settings.indexing)?.build(store.project_root())?;
    let path = store.save_index(&index)?;
    Ok((index, path))
}

/// `input` is `None` for a manual run (terminal stdin or a non-JSON payload),
/// which always reindexes. As a hook, only file writes trigger a rebuild.
pub fn handle(input: Option<&HookInput>, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    if input.is_some_and(|input| !input.is_file_write()) {
        return Ok(HookOutput::empty());
    }

    let (index, _) = rebuild(ctx.settings, &ctx.store)?;
    Ok(HookOutput::ok(format!(
        "✓ Updated project index: {} files indexed",
        index.stats.total_files
    )))
}
