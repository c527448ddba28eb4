//! Logging macros for ergonomic log message formatting.
//!
//! Every macro records the call site as `CODE_FILE`, `CODE_LINE` and
//! `CODE_FUNC` fields. An optional `{ "NAME" => value, ... }` block adds
//! entry fields ahead of the location fields.
//!
//! # Examples
//!
//! ```
//! use rust_journal_logger::prelude::*;
//! use rust_journal_logger::{info, warning};
//!
//! let capture = CaptureDispatcher::new();
//! let logger = Logger::with_dispatcher(capture.clone());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments and fields
//! let port = 8080;
//! warning!(logger, { "PORT" => port }, "Port {} already bound, retrying", port);
//!
//! assert_eq!(capture.records()[1].field("PORT"), Some("8080"));
//! ```

/// Log a message at an explicit priority.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::log;
/// log!(logger, Priority::Info, "Simple message");
/// log!(logger, Priority::Error, { "CODE" => 500 }, "Request failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $priority:expr, { $($name:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.submit(
            $crate::LogEntry::new($priority, format!($($arg)+))
                $(.with_field($name, $value))*
                .with_location(
                    $crate::core::log_entry::trim_source_path(file!(), "src"),
                    line!(),
                    module_path!(),
                ),
        )
    };
    ($logger:expr, $priority:expr, $($arg:tt)+) => {
        $logger.submit(
            $crate::LogEntry::new($priority, format!($($arg)+)).with_location(
                $crate::core::log_entry::trim_source_path(file!(), "src"),
                line!(),
                module_path!(),
            ),
        )
    };
}

/// Log an emergency-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::emerg;
/// emerg!(logger, "System is unusable");
/// emerg!(logger, "Kernel watchdog fired on cpu {}", 3);
/// ```
#[macro_export]
macro_rules! emerg {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Emergency, $($arg)+)
    };
}

/// Log an alert-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::alert;
/// alert!(logger, "Database replica lost");
/// alert!(logger, "Replica {} unreachable", "db-2");
/// ```
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Alert, $($arg)+)
    };
}

/// Log a critical-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::crit;
/// crit!(logger, "Hardware fault detected");
/// crit!(logger, "Disk {} failing", "sda");
/// ```
#[macro_export]
macro_rules! crit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Critical, $($arg)+)
    };
}

/// Log an error-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Error, $($arg)+)
    };
}

/// Log a warning-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Warning, $($arg)+)
    };
}

/// Log a notice-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::notice;
/// notice!(logger, "Configuration reloaded");
/// notice!(logger, "Listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Notice, $($arg)+)
    };
}

/// Log an info-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Info, $($arg)+)
    };
}

/// Log a debug-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journal_logger::prelude::*;
/// # let logger = Logger::with_dispatcher(CaptureDispatcher::new());
/// use rust_journal_logger::debug;
/// debug!(logger, "Cache miss");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Debug, $($arg)+)
    };
}
