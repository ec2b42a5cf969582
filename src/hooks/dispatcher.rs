use clap::ValueEnum;

use super::error::{HookError, HookResult};
use super::types::{HookInput, HookOutput};
use super::{
    HookContext, context_preserver, git_committer, index_refresh, readup_injector, session_loader,
    test_validator, todo_persister,
};

/// The hook handlers, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Handler {
    /// Rebuild the project index after Write/Edit/MultiEdit
    Index,
    /// Inject the project summary on SessionStart
    SessionLoad,
    /// Inject the full project picture for overview prompts
    Readup,
    /// Snapshot critical context on PreCompact
    PreserveContext,
    /// Save the latest todo list from the transcript
    PersistTodos,
    /// Suggest a commit message on Stop
    SuggestCommit,
    /// Syntax-check a just-written file on PostToolUse
    Validate,
}

impl Handler {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::SessionLoad => "session-load",
            Self::Readup => "readup",
            Self::PreserveContext => "preserve-context",
            Self::PersistTodos => "persist-todos",
            Self::SuggestCommit => "suggest-commit",
            Self::Validate => "validate",
        }
    }

    /// Exit code when input is malformed or the handler fails internally.
    /// Context injectors report failure to the host; everything else stays
    /// silent and exits cleanly.
    pub fn failure_exit_code(&self) -> i32 {
        match self {
            Self::SessionLoad | Self::Readup => 1,
            _ => 0,
        }
    }
}

/// Dispatch one hook invocation.
///
/// - `stdin` is `None` when stdin is a terminal (manual run)
/// - Malformed input and handler errors are logged, then mapped to the
///   handler's failure exit code with empty stdout
/// - Never panics
pub fn dispatch(handler: Handler, stdin: Option<&str>, ctx: &HookContext<'_>) -> HookOutput {
    let input = stdin.map(|raw| serde_json::from_str::<HookInput>(raw).map_err(HookError::MalformedInput));

    let result = match (handler, input) {
        // The indexer doubles as a manual tool: no payload, or one that is
        // not JSON, means "index now"
        (Handler::Index, None | Some(Err(_))) => index_refresh::handle(None, ctx),
        (_, None) => Err(HookError::MissingInput),
        (_, Some(Err(e))) => Err(e),
        (handler, Some(Ok(input))) => route(handler, &input, ctx),
    };

    match result {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("[dispatch] {} failed: {e}", handler.name());
            HookOutput::failure(handler.failure_exit_code())
        }
    }
}

fn route(handler: Handler, input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    match handler {
        Handler::Index => index_refresh::handle(Some(input), ctx),
        Handler::SessionLoad => session_loader::handle(input, ctx),
        Handler::Readup => readup_injector::handle(input, ctx),
        Handler::PreserveContext => context_preserver::handle(input, ctx),
        Handler::PersistTodos => todo_persister::handle(input, ctx),
        Handler::SuggestCommit => git_committer::handle(input, ctx),
        Handler::Validate => test_validator::handle(input, ctx),
    }
}
