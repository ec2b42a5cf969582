//! Reading the host's newline-delimited JSON session transcript.

use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::debug_event;
use crate::storage::TodoItem;

/// Tool whose invocations carry the assistant's task list.
pub const TODO_TOOL: &str = "TodoWrite";

/// The todo list from the last `TodoWrite` call with a non-empty list.
///
/// Recognizes both flat `{"type":"tool_use","name":"TodoWrite","input":{..}}`
/// records and `tool_use` blocks nested in `message.content`. Lines that are
/// not valid JSON are skipped, as are `todos` values that are not arrays.
/// Returns `Ok(None)` when no such call exists.
pub fn latest_todos(path: &Path) -> io::Result<Option<Vec<TodoItem>>> {
    let reader = BufReader::new(File::open(path)?);
    let mut latest: Option<Vec<TodoItem>> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => return Err(e),
        };
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                debug_event!("transcript", "skipped line", "{}: {e}", line_no + 1);
                continue;
            }
        };
        for todos in todo_writes(&record) {
            latest = Some(todos);
        }
    }
    Ok(latest)
}

/// Non-empty todo lists written by `record`, in order.
fn todo_writes(record: &Value) -> Vec<Vec<TodoItem>> {
    let nested = record
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten();

    std::iter::once(record)
        .chain(nested)
        .filter(|block| is_todo_write(block))
        .filter_map(|block| block.get("input")?.get("todos"))
        .filter_map(|todos| serde_json::from_value::<Vec<TodoItem>>(todos.clone()).ok())
        .filter(|todos| !todos.is_empty())
        .collect()
}

fn is_todo_write(block: &Value) -> bool {
    block.get("type").and_then(Value::as_str) == Some("tool_use")
        && block.get("name").and_then(Value::as_str) == Some(TODO_TOOL)
}
