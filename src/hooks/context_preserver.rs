//! Writes the preserved-context snapshot before compaction.

use super::error::HookResult;
use super::types::{HookEvent, HookInput, HookOutput};
use super::{HookContext, or_absent};
use crate::context::preserve::RECENT_COMMANDS;
use crate::context::{PreservedContext, snapshot_document};
use crate::log_event;
use crate::utils::local_timestamp;

pub fn handle(input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    if !input.is_event(HookEvent::PreCompact) {
        return Ok(HookOutput::empty());
    }

    let index = or_absent("project index", ctx.store.load_index());
    let todos = or_absent("todo state", ctx.store.load_todos());
    let recent_commands = ctx
        .store
        .recent_commands(RECENT_COMMANDS)
        .unwrap_or_else(|e| {
            tracing::warn!("[preserve] ignoring shell history: {e}");
            Vec::new()
        });

    let body = PreservedContext {
        index: index.as_ref(),
        recent_commands: &recent_commands,
        todos: todos.as_ref(),
    }
    .render(&ctx.settings.context);

    let path = ctx
        .store
        .save_preserved(&snapshot_document(&local_timestamp(), &body))?;
    log_event!("preserve", "saved", "{}", path.display());

    Ok(HookOutput::ok(
        "💾 Preserved critical context before compaction".to_string(),
    ))
}
