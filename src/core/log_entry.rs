//! Log entry structure

use super::priority::Priority;
use serde::{Deserialize, Serialize};

/// One log occurrence: a priority, ordered fields and a message.
///
/// Field names are not required to be unique and insertion order is kept.
/// Once handed to the logger an entry is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub priority: Priority,
    pub fields: Vec<(String, String)>,
    pub message: String,
}

impl LogEntry {
    pub fn new(priority: Priority, message: impl Into<String>) -> Self {
        Self {
            priority,
            fields: Vec::new(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Record the call site using the journal's `CODE_*` field names
    #[must_use]
    pub fn with_location(self, file: &str, line: u32, function: &str) -> Self {
        self.with_field("CODE_FILE", file)
            .with_field("CODE_LINE", line)
            .with_field("CODE_FUNC", function)
    }
}

/// Shorten a source path to the part after `anchor`.
///
/// `anchor` is a directory name such as `"src"`; both `/` and `\` separators
/// are recognised. The path is returned unchanged when the anchor is absent.
///
/// ```
/// use rust_journal_logger::core::log_entry::trim_source_path;
///
/// assert_eq!(trim_source_path("/home/ci/app/src/net/conn.rs", "src"), "net/conn.rs");
/// assert_eq!(trim_source_path("lib.rs", "src"), "lib.rs");
/// ```
pub fn trim_source_path<'a>(path: &'a str, anchor: &str) -> &'a str {
    if anchor.is_empty() {
        return path;
    }
    for sep in ['/', '\\'] {
        let needle = format!("{anchor}{sep}");
        let found = path
            .match_indices(&needle)
            .find(|(idx, _)| *idx == 0 || path[..*idx].ends_with(['/', '\\']));
        if let Some((idx, _)) = found {
            return &path[idx + needle.len()..];
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_insertion_order_and_duplicates() {
        let entry = LogEntry::new(Priority::Info, "hello")
            .with_field("B", "2")
            .with_field("A", "1")
            .with_field("B", "3");

        assert_eq!(
            entry.fields,
            vec![
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_location() {
        let entry = LogEntry::new(Priority::Debug, "x").with_location("net/conn.rs", 42, "connect");
        assert_eq!(entry.fields[0], ("CODE_FILE".into(), "net/conn.rs".into()));
        assert_eq!(entry.fields[1], ("CODE_LINE".into(), "42".into()));
        assert_eq!(entry.fields[2], ("CODE_FUNC".into(), "connect".into()));
    }

    #[test]
    fn test_trim_source_path() {
        assert_eq!(trim_source_path("C:\\work\\app\\src\\main.rs", "src"), "main.rs");
        assert_eq!(trim_source_path("/x/mysrc/a.rs", "src"), "/x/mysrc/a.rs");
        assert_eq!(trim_source_path("src/lib.rs", "src"), "lib.rs");
        assert_eq!(trim_source_path("/a/b.rs", ""), "/a/b.rs");
    }
}
