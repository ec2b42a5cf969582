use thiserror::Error;

use crate::indexing::IndexError;
use crate::storage::StateError;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("No hook input on stdin")]
    MissingInput,

    #[error("Malformed hook input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("Failed to encode hook response: {0}")]
    Response(#[from] serde_json::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    State(#[from] StateError),
}

pub type HookResult<T> = Result<T, HookError>;
