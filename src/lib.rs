//! # Rust Journal Logger
//!
//! A structured-logging buffer. Entries carry a syslog priority, ordered
//! `NAME=VALUE` fields and a message; the logger adds session-wide constant
//! fields and hands each record to one dispatcher picked at startup:
//! the systemd journal, a color terminal, or plain stdout.
//!
//! ## Features
//!
//! - **Deferred Mode**: Buffer entries and flush them in submission order
//! - **Retroactive Discard**: Drop buffered low-severity entries before they are ever sent
//! - **Constant Fields**: Context appended to every record after its own fields
//! - **Thread Safe**: Dispatch runs outside the buffer lock
//!
//! ```
//! use rust_journal_logger::prelude::*;
//!
//! let capture = CaptureDispatcher::new();
//! let logger = Logger::builder()
//!     .dispatcher(capture.clone())
//!     .deferred(true)
//!     .constant_field("SERVICE", "checkout")
//!     .build();
//!
//! logger.debug("loading cart");
//! logger.log(Priority::Error, [("CART", "c-17")], "payment declined");
//! logger.discard(Priority::Debug);
//! logger.flush();
//!
//! assert_eq!(capture.messages(), vec!["payment declined"]);
//! ```

pub mod core;
pub mod dispatchers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Backend, BackendChoice, CapabilityProbe, ConstantFields, Dispatcher, LogEntry, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Priority, Result, StaticProbe,
        SystemProbe,
    };
    pub use crate::dispatchers::{CaptureDispatcher, PlainDispatcher, TerminalDispatcher};
}

pub use crate::core::{
    Backend, BackendChoice, BackendOptions, Batch, CapabilityProbe, ConstantFields,
    DeferredLogBuffer, Dispatcher, FieldFormatter, FormattedRecord, LogEntry, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Priority, Result, StaticProbe,
    SystemProbe,
};
pub use crate::dispatchers::{CaptureDispatcher, PlainDispatcher, TerminalDispatcher};
#[cfg(all(unix, feature = "journal"))]
pub use crate::dispatchers::JournalDispatcher;
