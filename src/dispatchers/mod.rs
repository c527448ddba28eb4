//! Dispatcher implementations

pub mod capture;
#[cfg(all(unix, feature = "journal"))]
pub mod journal;
pub mod plain;
pub mod terminal;

pub use capture::{CaptureDispatcher, CapturedRecord, SharedWriter};
#[cfg(all(unix, feature = "journal"))]
pub use journal::JournalDispatcher;
pub use plain::PlainDispatcher;
pub use terminal::TerminalDispatcher;

pub use crate::core::Dispatcher;
