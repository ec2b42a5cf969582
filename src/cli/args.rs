//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::hooks::Handler;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Lifecycle hooks for an AI coding assistant
#[derive(Parser)]
#[command(
    name = "hooksmith",
    version = env!("CARGO_PKG_VERSION"),
    about = "Lifecycle hooks that keep an AI coding assistant oriented in a project",
    long_about = "Index the project, inject context at session start and on request, \
                  carry todos across sessions, check edits and suggest commits.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Quick Start:\n  $ hooksmith init          # Write .claude/hooksmith.toml and print hook registration\n  $ hooksmith index         # Build .claude/.index.json\n  $ hooksmith config        # Show effective settings"
)]
pub struct Cli {
    /// Path to a custom hooksmith.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Write .claude/hooksmith.toml and print the hook registration snippet")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Build the project index
    #[command(about = "Build .claude/.index.json for a project")]
    Index {
        /// Project root (defaults to $CLAUDE_PROJECT_DIR or the current directory)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Dry run - count the files that would be indexed
        #[arg(long)]
        dry_run: bool,
    },

    /// Run one hook handler with the host's JSON payload on stdin
    #[command(
        about = "Run a hook handler (reads the event payload from stdin)",
        after_help = "Examples:\n  echo '{\"hook_event_name\":\"SessionStart\"}' | hooksmith hook session-load\n  hooksmith hook index"
    )]
    Hook {
        /// Handler to run
        #[arg(value_enum)]
        handler: Handler,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,
}
