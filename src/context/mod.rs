//! Context assemblers.
//!
//! Pure renderers over already-loaded state documents. Loading, git access and
//! the hook envelope live in `hooks`; nothing here touches stdin or stdout.

pub mod preserve;
pub mod readup;
pub mod session;

pub use preserve::{PreservedContext, snapshot_document};
pub use readup::{READUP_BANNER, ReadupTrigger};
pub use session::{AvailableCommands, SessionContext};
