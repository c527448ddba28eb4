//! Field formatter: turns an entry plus constant context into `KEY=VALUE` strings
//!
//! Order is fixed: `PRIORITY=<n>`, the entry's own fields in insertion
//! order, then the constant fields. Entry fields come before constant
//! fields so a sink that keeps the first occurrence sees the entry's value.
//!
//! Values are concatenated verbatim. Nothing is escaped or quoted; callers
//! must keep characters the destination treats specially out of names.

use super::constant_fields::ConstantFields;
use super::log_entry::LogEntry;

pub const PRIORITY_FIELD: &str = "PRIORITY";
pub const MESSAGE_FIELD: &str = "MESSAGE";

/// An entry rendered into ordered field strings and its message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    pub fields: Vec<String>,
    pub message: String,
}

impl FormattedRecord {
    /// Fields followed by a trailing `MESSAGE=<text>` record
    pub fn journal_records(&self) -> Vec<String> {
        let mut records = self.fields.clone();
        records.push(message_field(&self.message));
        records
    }

    /// `[A=1][B=2]...`
    pub fn bracketed_line(&self) -> String {
        bracketed_line(&self.fields)
    }
}

pub struct FieldFormatter;

impl FieldFormatter {
    pub fn format(entry: &LogEntry, constants: &ConstantFields) -> FormattedRecord {
        let mut fields = Vec::with_capacity(1 + entry.fields.len() + constants.len());
        fields.push(format!("{}={}", PRIORITY_FIELD, entry.priority.as_u8()));
        fields.extend(
            entry
                .fields
                .iter()
                .map(|(name, value)| format!("{}={}", name, value)),
        );
        fields.extend(
            constants
                .iter()
                .map(|(name, value)| format!("{}={}", name, value)),
        );

        FormattedRecord {
            fields,
            message: entry.message.clone(),
        }
    }
}

pub fn message_field(message: &str) -> String {
    format!("{}={}", MESSAGE_FIELD, message)
}

pub fn bracketed_line(fields: &[String]) -> String {
    let mut line = String::with_capacity(fields.iter().map(|f| f.len() + 2).sum());
    for field in fields {
        line.push('[');
        line.push_str(field);
        line.push(']');
    }
    line
}
