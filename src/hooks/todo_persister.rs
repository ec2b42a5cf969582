//! Saves the latest todo list from the session transcript.

use std::path::Path;

use super::HookContext;
use super::error::HookResult;
use super::types::{HookInput, HookOutput};
use crate::storage::TodoState;
use crate::transcript::latest_todos;
use crate::utils::local_timestamp;
use crate::{debug_event, log_event};

pub fn handle(input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    let Some(transcript) = input.transcript_path.as_deref().filter(|p| !p.is_empty()) else {
        return Ok(HookOutput::empty());
    };

    let todos = match latest_todos(Path::new(transcript)) {
        Ok(Some(todos)) => todos,
        Ok(None) => return Ok(HookOutput::empty()),
        Err(e) => {
            debug_event!("todos", "transcript unavailable", "{transcript}: {e}");
            return Ok(HookOutput::empty());
        }
    };

    let state = TodoState {
        saved_at: local_timestamp(),
        session_id: input.session_id.clone().unwrap_or_default(),
        todos,
    };
    let path = ctx.store.save_todos(&state)?;
    log_event!("todos", "saved", "{} todos to {}", state.todos.len(), path.display());

    let pending = state.pending_count();
    if pending == 0 {
        return Ok(HookOutput::empty());
    }
    Ok(HookOutput::ok(format!(
        "💾 Saved {pending} pending tasks for next session"
    )))
}
