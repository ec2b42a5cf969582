//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod hook;
pub mod index;
pub mod init;
