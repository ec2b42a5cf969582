//! Project-local state documents under `.claude/`.
//!
//! Every document is replaced wholesale. Writes go to a temporary file in the
//! same directory and are renamed into place, so a concurrent reader sees
//! either the old or the new document, never a torn one. There is no locking:
//! the last writer wins.
//!
//! Loads return `Ok(None)` when a document does not exist and `Err` only for
//! real faults (unreadable file, malformed JSON).

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::error::{StateError, StateResult};
use super::todo::TodoState;
use crate::config::STATE_DIR;
use crate::debug_event;
use crate::indexing::ProjectIndex;

pub const INDEX_FILE: &str = ".index.json";
pub const TODO_FILE: &str = ".todo_state.json";
pub const PRESERVED_FILE: &str = ".preserved_context.md";
pub const BASH_HISTORY_FILE: &str = "bash_history.log";

/// Handle on one project's state directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    project_root: PathBuf,
    state_dir: PathBuf,
}

impl StateStore {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let state_dir = project_root.join(STATE_DIR);
        Self {
            project_root,
            state_dir,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.state_dir.join(INDEX_FILE)
    }

    pub fn todo_path(&self) -> PathBuf {
        self.state_dir.join(TODO_FILE)
    }

    pub fn preserved_path(&self) -> PathBuf {
        self.state_dir.join(PRESERVED_FILE)
    }

    pub fn bash_history_path(&self) -> PathBuf {
        self.state_dir.join(BASH_HISTORY_FILE)
    }

    pub fn load_index(&self) -> StateResult<Option<ProjectIndex>> {
        read_json(&self.index_path())
    }

    pub fn save_index(&self, index: &ProjectIndex) -> StateResult<PathBuf> {
        let path = self.index_path();
        write_json(&path, index)?;
        Ok(path)
    }

    pub fn load_todos(&self) -> StateResult<Option<TodoState>> {
        read_json(&self.todo_path())
    }

    pub fn save_todos(&self, state: &TodoState) -> StateResult<PathBuf> {
        let path = self.todo_path();
        write_json(&path, state)?;
        Ok(path)
    }

    pub fn load_preserved(&self) -> StateResult<Option<String>> {
        read_text(&self.preserved_path())
    }

    pub fn save_preserved(&self, snapshot: &str) -> StateResult<PathBuf> {
        let path = self.preserved_path();
        write_atomic(&path, snapshot.as_bytes())?;
        Ok(path)
    }

    /// The last `limit` non-blank lines of the shell history log, trimmed.
    /// An absent log yields an empty list.
    pub fn recent_commands(&self, limit: usize) -> StateResult<Vec<String>> {
        let Some(text) = read_text(&self.bash_history_path())? else {
            return Ok(Vec::new());
        };
        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let skip = lines.len().saturating_sub(limit);
        Ok(lines.into_iter().skip(skip).collect())
    }

    /// Read a file relative to the project root, if it exists.
    pub fn read_project_file(&self, name: &str) -> StateResult<Option<String>> {
        read_text(&self.project_root.join(name))
    }
}

fn read_text(path: &Path) -> StateResult<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug_event!("state", "absent", "{}", path.display());
            Ok(None)
        }
        Err(source) => Err(StateError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StateResult<Option<T>> {
    let Some(text) = read_text(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StateError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> StateResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

/// Write via a sibling temporary file and rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> StateResult<()> {
    let write_err = |source: io::Error| StateError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug_event!("state", "written", "{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::todo::TodoItem;
    use tempfile::TempDir;

    #[test]
    fn test_absent_documents_are_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path());

        assert!(store.load_index().unwrap().is_none());
        assert!(store.load_todos().unwrap().is_none());
        assert!(store.load_preserved().unwrap().is_none());
        assert!(store.recent_commands(5).unwrap().is_empty());
        assert!(store.read_project_file("README.md").unwrap().is_none());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path());
        fs::create_dir_all(store.state_dir()).unwrap();
        fs::write(store.index_path(), "{ not json").unwrap();

        let err = store.load_index().unwrap_err();
        assert!(matches!(err, StateError::Parse { .. }));
    }

    #[test]
    fn test_save_creates_state_dir_and_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path());

        let mut state = TodoState {
            saved_at: "t1".into(),
            session_id: "abc".into(),
            todos: vec![TodoItem {
                content: "first".into(),
                status: Default::default(),
                extra: Default::default(),
            }],
        };
        store.save_todos(&state).unwrap();
        state.saved_at = "t2".into();
        state.todos.clear();
        store.save_todos(&state).unwrap();

        let loaded = store.load_todos().unwrap().unwrap();
        assert_eq!(loaded, state);

        // Only the final document remains, no temporary files
        let entries: Vec<_> = fs::read_dir(store.state_dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_preserved_snapshot_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path());
        store.save_preserved("# Context\n\nbody").unwrap();
        assert_eq!(store.load_preserved().unwrap().as_deref(), Some("# Context\n\nbody"));
    }

    #[test]
    fn test_recent_commands_tail() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::new(temp_dir.path());
        fs::create_dir_all(store.state_dir()).unwrap();
        let log: String = (1..=8).map(|i| format!("cmd {i}\n")).collect();
        fs::write(store.bash_history_path(), format!("{log}\n  \n")).unwrap();

        let recent = store.recent_commands(5).unwrap();
        assert_eq!(recent, vec!["cmd 4", "cmd 5", "cmd 6", "cmd 7", "cmd 8"]);
    }
}
