//! Init and Config commands.

use anyhow::anyhow;
use serde_json::{Value, json};
use std::path::Path;

use crate::config::Settings;
use crate::hooks::Handler;

fn hook_command(handler: Handler) -> Value {
    json!({
        "type": "command",
        "command": format!("hooksmith hook {}", handler.name()),
    })
}

/// Host settings fragment registering every handler on its event.
pub fn registration_snippet() -> Value {
    json!({
        "hooks": {
            "SessionStart": [
                { "hooks": [hook_command(Handler::SessionLoad)] }
            ],
            "UserPromptSubmit": [
                { "hooks": [hook_command(Handler::Readup)] }
            ],
            "PostToolUse": [
                {
                    "matcher": "Write|Edit|MultiEdit",
                    "hooks": [hook_command(Handler::Index), hook_command(Handler::Validate)]
                }
            ],
            "PreCompact": [
                { "hooks": [hook_command(Handler::PreserveContext)] }
            ],
            "Stop": [
                {
                    "hooks": [hook_command(Handler::PersistTodos), hook_command(Handler::SuggestCommit)]
                }
            ]
        }
    })
}

/// Run init command - create configuration file and print hook registration.
pub fn run_init(root: &Path, force: bool) -> anyhow::Result<()> {
    let path = Settings::init_config_file(root, force).map_err(|e| anyhow!("{e}"))?;
    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to customize your settings.");
    println!();
    println!("Add these hooks to .claude/settings.json:");
    println!("{}", serde_json::to_string_pretty(&registration_snippet())?);
    Ok(())
}

/// Run config command - display current configuration.
pub fn run_config(config: &Settings) -> anyhow::Result<()> {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
