//! Injects the project summary when a session starts.

use super::error::HookResult;
use super::types::{HookEvent, HookInput, HookOutput, HookResponse};
use super::{HookContext, or_absent};
use crate::context::{AvailableCommands, SessionContext};
use crate::git::GitSnapshot;

/// Session source the host reports when resuming after compaction.
const COMPACT_SOURCE: &str = "compact";

pub fn handle(input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    if !input.is_event(HookEvent::SessionStart) {
        return Ok(HookOutput::empty());
    }

    let index = or_absent("project index", ctx.store.load_index());
    let todos = or_absent("todo state", ctx.store.load_todos());
    let preserved = if input.source.as_deref() == Some(COMPACT_SOURCE) {
        or_absent("preserved context", ctx.store.load_preserved())
    } else {
        None
    };
    let git = GitSnapshot::collect(ctx.runner, ctx.root());
    let commands = AvailableCommands::detect(ctx.root());

    let context = SessionContext {
        index: index.as_ref(),
        git: git.as_ref(),
        todos: todos.as_ref(),
        commands: &commands,
        preserved: preserved.as_deref(),
    }
    .render(&ctx.settings.context);

    Ok(HookOutput::json(&HookResponse::additional_context(
        HookEvent::SessionStart,
        context,
    ))?)
}
