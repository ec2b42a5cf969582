//! Common utilities shared across modules.

use std::path::{Component, Path};
use std::time::SystemTime;

use chrono::{DateTime, Local};

const ISO_LOCAL: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time as a naive ISO-8601 string (`2025-01-31T09:15:02.123456`).
///
/// State documents carry local wall-clock time without an offset so they read
/// the same way in the assistant's context as in a shell.
pub fn local_timestamp() -> String {
    Local::now().format(ISO_LOCAL).to_string()
}

/// Format a filesystem modification time the same way as [`local_timestamp`].
pub fn format_system_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(ISO_LOCAL).to_string()
}

/// Render a relative path with `/` separators regardless of platform.
///
/// Only normal components are kept, so `./src/lib.rs` becomes `src/lib.rs`.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Take at most `max` characters from `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_local_timestamp_shape() {
        let ts = local_timestamp();
        // 2025-01-31T09:15:02.123456
        assert_eq!(ts.len(), 26);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn test_to_slash_path() {
        let path: PathBuf = ["src", "indexing", "walker.rs"].iter().collect();
        assert_eq!(to_slash_path(&path), "src/indexing/walker.rs");
        assert_eq!(to_slash_path(Path::new("./README.md")), "README.md");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
