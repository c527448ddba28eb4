//! Core logger types and traits

pub mod backend;
pub mod buffer;
pub mod config;
pub mod constant_fields;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod priority;

pub use backend::{Backend, BackendChoice, BackendOptions, CapabilityProbe, StaticProbe, SystemProbe};
pub use buffer::{Batch, DeferredLogBuffer};
pub use config::LoggerConfig;
pub use constant_fields::ConstantFields;
pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use formatter::{FieldFormatter, FormattedRecord};
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use priority::Priority;
