//! Hook handlers and the stdin/stdout protocol they speak.
//!
//! Each handler is a function `(&HookInput, &HookContext) -> HookResult<HookOutput>`.
//! Handlers never call one another; they share state only through the
//! documents in [`crate::storage::StateStore`].

pub mod context_preserver;
pub mod dispatcher;
pub mod error;
pub mod git_committer;
pub mod index_refresh;
pub mod readup_injector;
pub mod session_loader;
pub mod test_validator;
pub mod todo_persister;
pub mod types;

use std::path::Path;

use crate::config::Settings;
use crate::process::CommandRunner;
use crate::storage::{StateResult, StateStore};

pub use dispatcher::{Handler, dispatch};
pub use error::{HookError, HookResult};
pub use types::{HookEvent, HookInput, HookOutput, HookResponse};

/// What a handler may touch: settings, the project's state documents and a
/// way to run external commands.
pub struct HookContext<'a> {
    pub settings: &'a Settings,
    pub store: StateStore,
    pub runner: &'a dyn CommandRunner,
}

impl<'a> HookContext<'a> {
    pub fn new(settings: &'a Settings, project_root: &Path, runner: &'a dyn CommandRunner) -> Self {
        Self {
            settings,
            store: StateStore::new(project_root),
            runner,
        }
    }

    pub fn root(&self) -> &Path {
        self.store.project_root()
    }
}

/// Treat a faulty state document like a missing one, after logging it.
pub(crate) fn or_absent<T>(document: &str, loaded: StateResult<Option<T>>) -> Option<T> {
    loaded.unwrap_or_else(|e| {
        tracing::warn!("[hooks] ignoring {document}: {e}");
        None
    })
}
