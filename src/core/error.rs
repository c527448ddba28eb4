//! Error types for the journal logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (configuration) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The journal socket could not be reached
    #[error("Journal socket '{path}' unavailable: {message}")]
    JournalUnavailable { path: String, message: String },

    /// A record set exceeded what a single journal datagram can carry
    #[error("Journal datagram too large: {size} bytes")]
    DatagramTooLarge { size: usize },

    /// A field record without a `NAME=` prefix
    #[error("Invalid field record '{record}': expected NAME=VALUE")]
    InvalidField { record: String },

    /// Priority outside the syslog range 0..=7
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Dispatcher error (generic)
    #[error("Dispatcher error ({dispatcher}): {message}")]
    DispatcherError { dispatcher: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a journal-unavailable error
    pub fn journal_unavailable(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::JournalUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(record: impl Into<String>) -> Self {
        LoggerError::InvalidField {
            record: record.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a dispatcher error
    pub fn dispatcher(dispatcher: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DispatcherError {
            dispatcher: dispatcher.into(),
            message: message.into(),
        }
    }}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::journal_unavailable("/run/systemd/journal/socket", "not found");
        assert!(matches!(err, LoggerError::JournalUnavailable { .. }));

        let err = LoggerError::config("LoggerConfig", "unknown backend");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::invalid_field("NOEQUALS");
        assert!(matches!(err, LoggerError::InvalidField { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::DatagramTooLarge { size: 300_000 };
        assert_eq!(err.to_string(), "Journal datagram too large: 300000 bytes");

        let err = LoggerError::invalid_field("BROKEN");
        assert_eq!(
            err.to_string(),
            "Invalid field record 'BROKEN': expected NAME=VALUE"
        );

        let err = LoggerError::dispatcher("plain", "stdout closed");
        assert_eq!(err.to_string(), "Dispatcher error (plain): stdout closed");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("sending journal datagram", "socket refused", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("sending journal datagram"));
        assert!(err.to_string().contains("socket refused"));
    }
}
