//! Todo snapshots carried from one session to the next.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Task status as written by the assistant's todo tool.
///
/// Unknown statuses, including non-string ones, are kept verbatim so a
/// snapshot written back out is identical to what the tool produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Other(Value),
}

impl From<Value> for TodoStatus {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("pending") => Self::Pending,
            Some("in_progress") => Self::InProgress,
            Some("completed") => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<TodoStatus> for Value {
    fn from(status: TodoStatus) -> Self {
        match status {
            TodoStatus::Pending => Value::from("pending"),
            TodoStatus::InProgress => Value::from("in_progress"),
            TodoStatus::Completed => Value::from("completed"),
            TodoStatus::Other(value) => value,
        }
    }
}

/// One task. Reading never fails: any JSON value is accepted, fields of
/// the wrong type degrade instead of rejecting the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct TodoItem {
    pub content: String,
    pub status: TodoStatus,
    /// Tool-specific fields (`id`, `activeForm`, `priority`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Value> for TodoItem {
    fn from(value: Value) -> Self {
        let mut extra = match value {
            Value::Object(map) => map,
            other => {
                return Self {
                    content: text_of(other),
                    status: TodoStatus::Other(Value::Null),
                    extra: Map::new(),
                };
            }
        };
        let content = extra.shift_remove("content").map(text_of).unwrap_or_default();
        let status = extra.shift_remove("status").map(TodoStatus::from).unwrap_or_default();
        Self {
            content,
            status,
            extra,
        }
    }
}

fn text_of(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl TodoItem {
    pub fn is_pending(&self) -> bool {
        self.status == TodoStatus::Pending
    }
}

/// Contents of `.claude/.todo_state.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TodoState {
    pub saved_at: String,
    pub session_id: String,
    pub todos: Vec<TodoItem>,
}

impl TodoState {
    pub fn pending(&self) -> impl Iterator<Item = &TodoItem> {
        self.todos.iter().filter(|todo| todo.is_pending())
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }
}

/// On-disk layouts accepted when reading: the current object form, and the
/// bare todo array older installs wrote.
#[derive(Deserialize)]
#[serde(untagged)]
enum TodoDocument {
    State {
        #[serde(default)]
        saved_at: String,
        #[serde(default)]
        session_id: String,
        #[serde(default)]
        todos: Vec<TodoItem>,
    },
    Legacy(Vec<TodoItem>),
}

impl<'de> Deserialize<'de> for TodoState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match TodoDocument::deserialize(deserializer)? {
            TodoDocument::State {
                saved_at,
                session_id,
                todos,
            } => TodoState {
                saved_at,
                session_id,
                todos,
            },
            TodoDocument::Legacy(todos) => TodoState {
                todos,
                ..TodoState::default()
            },
        })
    }
}
