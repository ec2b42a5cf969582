//! Hook command - run one handler against the payload on stdin.

use std::io::{self, Read};
use std::path::Path;

use crate::config::Settings;
use crate::hooks::{Handler, HookContext, dispatch};
use crate::process::SystemRunner;

/// Read the whole payload; `None` when stdin is an interactive terminal.
fn read_stdin() -> Option<String> {
    if is_terminal::is_terminal(io::stdin()) {
        return None;
    }
    let mut raw = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut raw) {
        tracing::warn!("[hook] failed to read stdin: {e}");
    }
    Some(raw)
}

/// Run the hook command, returning the process exit code.
pub fn run(handler: Handler, root: &Path, settings: &Settings) -> i32 {
    let stdin = read_stdin();
    let runner = SystemRunner;
    let ctx = HookContext::new(settings, root, &runner);

    let output = dispatch(handler, stdin.as_deref(), &ctx);
    if !output.stdout.is_empty() {
        println!("{}", output.stdout);
    }
    output.exit_code
}
