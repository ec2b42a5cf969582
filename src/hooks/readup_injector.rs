//! Injects the full project picture when the prompt asks for an overview.

use super::error::HookResult;
use super::types::{HookEvent, HookInput, HookOutput, HookResponse};
use super::{HookContext, or_absent};
use crate::context::{ReadupTrigger, readup};

const README: &str = "README.md";

pub fn handle(input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    let prompt = input.prompt.as_deref().unwrap_or_default();
    if !ReadupTrigger::new(&ctx.settings.context.readup_patterns).matches(prompt) {
        return Ok(HookOutput::empty());
    }

    let index = or_absent("project index", ctx.store.load_index());
    let readme = or_absent("README", ctx.store.read_project_file(README));
    let body = readup::render(index.as_ref(), readme.as_deref(), &ctx.settings.context);

    Ok(HookOutput::json(&HookResponse::additional_context(
        HookEvent::UserPromptSubmit,
        readup::with_banner(&body),
    ))?)
}
