pub mod error;
pub mod state;
pub mod todo;

pub use error::{StateError, StateResult};
pub use state::StateStore;
pub use todo::{TodoItem, TodoState, TodoStatus};
