pub mod cli;
pub mod config;
pub mod context;
pub mod git;
pub mod hooks;
pub mod indexing;
pub mod logging;
pub mod process;
pub mod storage;
pub mod transcript;
pub mod utils;
pub mod validation;

pub use config::Settings;
pub use hooks::{Handler, HookContext, HookOutput, dispatch};
pub use indexing::{
    Classifier, FileInfo, Importance, IndexError, IndexResult, ProjectIndex, ProjectIndexer,
    Purpose,
};
pub use process::{CommandOutput, CommandRunner, SystemRunner};
pub use storage::{StateError, StateStore, TodoState};
