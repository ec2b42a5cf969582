//! Suggests a commit message when the session stops with uncommitted work.
//! Never stages or commits anything.

use super::HookContext;
use super::error::HookResult;
use super::types::{HookEvent, HookInput, HookOutput, HookResponse};
use crate::git::{Git, suggest_commit};

pub fn handle(input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    if !input.is_event(HookEvent::Stop) {
        return Ok(HookOutput::empty());
    }

    let git = Git::new(ctx.runner, ctx.root());
    if !git.has_changes() {
        return Ok(HookOutput::empty());
    }
    let Some(suggestion) = git.diff_stat().as_deref().and_then(suggest_commit) else {
        return Ok(HookOutput::empty());
    };

    Ok(HookOutput::json(&HookResponse::block(format!(
        "You have uncommitted changes. Suggested commit: '{suggestion}'. Would you like me to commit them?"
    )))?)
}
