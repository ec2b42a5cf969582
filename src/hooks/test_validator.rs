//! Runs shallow syntax checks on files the assistant just wrote.

use std::path::{Path, PathBuf};

use super::HookContext;
use super::error::HookResult;
use super::types::{HookEvent, HookInput, HookOutput, HookResponse};
use crate::log_event;
use crate::validation::{Validator, detect_test_commands};

pub fn handle(input: &HookInput, ctx: &HookContext<'_>) -> HookResult<HookOutput> {
    if !input.is_file_write() {
        return Ok(HookOutput::empty());
    }
    let Some(file_path) = input.file_path() else {
        return Ok(HookOutput::empty());
    };

    let resolved = resolve(ctx.root(), file_path);
    let validator = Validator::new(ctx.runner, &ctx.settings.validation);
    let Some(feedback) = validator.check(file_path, &resolved, ctx.root()) else {
        return Ok(HookOutput::empty());
    };
    log_event!("validator", "findings", "{file_path}");

    let mut context = format!("Please fix these issues:\n{feedback}");
    let commands = detect_test_commands(ctx.runner, ctx.root(), &ctx.settings.indexing);
    if !commands.is_empty() {
        context.push_str("\n\nProject checks available:");
        for command in &commands {
            context.push_str(&format!("\n- {command}"));
        }
    }

    Ok(HookOutput::json(
        &HookResponse::block(feedback).with_additional_context(HookEvent::PostToolUse, context),
    )?)
}

/// Relative tool paths are taken relative to the project root.
fn resolve(root: &Path, file_path: &str) -> PathBuf {
    let path = Path::new(file_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::hooks::test_support::input;
    use crate::process::fake::ScriptedRunner;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_js_mismatch_blocks_with_context() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("app.ts"), "function f() {").unwrap();
        fs::write(temp_dir.path().join("Cargo.toml"), "[package]").unwrap();
        let settings = Settings::default();
        let runner = ScriptedRunner::new();
        let ctx = HookContext::new(&settings, temp_dir.path(), &runner);

        let payload = input(json!({
            "hook_event_name": "PostToolUse",
            "tool_name": "Write",
            "tool_input": {"file_path": "app.ts", "content": "function f() {"}
        }));
        let out = handle(&payload, &ctx).unwrap();
        let value: Value = serde_json::from_str(&out.stdout).unwrap();
        assert_eq!(value["decision"], "block");
        assert_eq!(value["reason"], "⚠️ Possible bracket mismatch in app.ts");
        assert_eq!(value["hookSpecificOutput"]["hookEventName"], "PostToolUse");
        assert_eq!(
            value["hookSpecificOutput"]["additionalContext"],
            "Please fix these issues:\n⚠️ Possible bracket mismatch in app.ts\n\n\
             Project checks available:\n- cargo test\n- cargo clippy"
        );
    }

    #[test]
    fn test_clean_file_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("ok.js");
        fs::write(&file, "const f = () => { return 1; };").unwrap();
        let settings = Settings::default();
        let runner = ScriptedRunner::new();
        let ctx = HookContext::new(&settings, temp_dir.path(), &runner);

        let payload = input(json!({"tool_name": "Edit", "tool_input": {"file_path": file.to_string_lossy()}}));
        assert_eq!(handle(&payload, &ctx).unwrap(), HookOutput::empty());
    }

    #[test]
    fn test_non_write_tools_and_missing_path_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::default();
        let runner = ScriptedRunner::new();
        let ctx = HookContext::new(&settings, temp_dir.path(), &runner);

        for payload in [
            json!({"tool_name": "Read", "tool_input": {"file_path": "x.js"}}),
            json!({"tool_name": "Write", "tool_input": {}}),
            json!({"tool_name": "Write"}),
        ] {
            assert_eq!(handle(&input(payload), &ctx).unwrap(), HookOutput::empty());
        }
    }

    #[test]
    fn test_skipped_extension_never_checked() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.md"), "{{{").unwrap();
        let settings = Settings::default();
        let runner = ScriptedRunner::new();
        let ctx = HookContext::new(&settings, temp_dir.path(), &runner);

        let payload = input(json!({"tool_name": "Write", "tool_input": {"file_path": "notes.md"}}));
        assert_eq!(handle(&payload, &ctx).unwrap(), HookOutput::empty());
        assert!(runner.calls.borrow().is_empty());
    }
}
