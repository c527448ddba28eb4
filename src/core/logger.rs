//! Logger facade
//!
//! Entries go through the [`DeferredLogBuffer`]; whatever it hands back is
//! formatted and dispatched here, always after the buffer lock has been
//! released. A second lock orders batches: whoever detaches a batch holds it
//! until that batch has reached the sink, so batches arrive in detach order
//! while deferred submission, discard and constant-field updates never wait
//! on I/O. Sink errors and sink panics are contained per entry and only show
//! up in [`LoggerMetrics`].

use super::{
    backend::{BackendChoice, BackendOptions, CapabilityProbe},
    buffer::{Batch, DeferredLogBuffer},
    config::LoggerConfig,
    constant_fields::ConstantFields,
    dispatcher::Dispatcher,
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    priority::Priority,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct Logger {
    buffer: DeferredLogBuffer,
    dispatch_order: Mutex<()>,
    dispatcher: Box<dyn Dispatcher>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger on the process-wide probed backend, immediate mode
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    #[must_use]
    pub fn with_dispatcher<D: Dispatcher + 'static>(dispatcher: D) -> Self {
        LoggerBuilder::new().dispatcher(dispatcher).build()
    }

    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        LoggerBuilder::from_config(config).build()
    }

    /// Submit an entry built from its parts
    pub fn log<I, K, V>(&self, priority: Priority, fields: I, message: impl Into<String>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.submit(LogEntry::new(priority, message).with_fields(fields));
    }

    /// Submit a prepared entry
    pub fn submit(&self, entry: LogEntry) {
        self.metrics.record_submitted();
        if self.buffer.is_deferred() {
            // Usually just queued; a concurrent disable_defer can still turn
            // this into an immediate batch, which then waits its turn
            if let Some(batch) = self.buffer.submit(entry) {
                let _order = self.dispatch_order.lock();
                self.dispatch_batch(batch);
            }
            return;
        }

        let _order = self.dispatch_order.lock();
        if let Some(batch) = self.buffer.submit(entry) {
            self.dispatch_batch(batch);
        }
    }

    /// Detach every pending entry and dispatch it in submission order
    pub fn flush(&self) {
        let _order = self.dispatch_order.lock();
        let batch = self.buffer.detach();
        if !batch.is_empty() {
            self.metrics.record_flush();
            self.dispatch_batch(batch);
        }
    }

    /// Drop pending entries whose priority value is `>= threshold`.
    ///
    /// `discard(Priority::Info)` drops buffered info and debug entries and
    /// keeps notices, warnings and anything more severe. No I/O happens.
    pub fn discard(&self, threshold: Priority) -> usize {
        let removed = self.buffer.discard(threshold);
        if removed > 0 {
            self.metrics.record_discarded(removed);
        }
        removed
    }

    /// Start buffering entries until the next [`flush`](Self::flush)
    pub fn enable_defer(&self) {
        self.buffer.set_deferred(true);
    }

    /// Flush whatever is pending, then dispatch each new entry immediately
    pub fn disable_defer(&self) {
        let _order = self.dispatch_order.lock();
        if let Some(batch) = self.buffer.set_deferred(false) {
            if !batch.is_empty() {
                self.metrics.record_flush();
                self.dispatch_batch(batch);
            }
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.buffer.is_deferred()
    }

    pub fn pending_count(&self) -> usize {
        self.buffer.len()
    }

    /// Add or overwrite one constant field
    pub fn add_constant_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.buffer.add_constant_field(name, value);
    }

    /// Replace all constant fields
    pub fn set_constant_fields(&self, fields: BTreeMap<String, String>) {
        self.buffer.set_constant_fields(fields);
    }

    pub fn remove_constant_field(&self, name: &str) -> Option<String> {
        self.buffer.remove_constant_field(name)
    }

    pub fn constant_fields(&self) -> ConstantFields {
        self.buffer.constant_fields()
    }

    pub fn dispatcher_name(&self) -> &str {
        self.dispatcher.name()
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use rust_journal_logger::prelude::*;
    ///
    /// let capture = CaptureDispatcher::new();
    /// let logger = Logger::with_dispatcher(capture.clone());
    /// logger.info("ready");
    ///
    /// assert_eq!(logger.metrics().dispatched(), 1);
    /// assert_eq!(logger.metrics().dispatch_failures(), 0);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn dispatch_batch(&self, batch: Batch) {
        for record in batch.records() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                self.dispatcher.dispatch(&record.fields, &record.message)
            }));

            match result {
                Ok(Ok(())) => {
                    self.metrics.record_dispatched();
                }
                Ok(Err(_)) => {
                    self.metrics.record_dispatch_failure();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Dispatcher '{}' panicked: {}. \
                         Remaining entries are still dispatched.",
                        self.dispatcher.name(),
                        panic_msg
                    );
                    self.metrics.record_dispatch_failure();
                }
            }
        }
    }

    #[inline]
    pub fn emergency(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Emergency, message));
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Alert, message));
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Critical, message));
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Error, message));
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Warning, message));
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Notice, message));
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Info, message));
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.submit(LogEntry::new(Priority::Debug, message));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Final flush; a stalled sink delays drop
        self.flush();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_journal_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .backend(BackendChoice::Plain)
///     .deferred(true)
///     .constant_field("SERVICE", "checkout")
///     .build();
///
/// assert!(logger.is_deferred());
/// assert_eq!(logger.dispatcher_name(), "plain");
/// ```
pub struct LoggerBuilder {
    backend: BackendChoice,
    dispatcher: Option<Box<dyn Dispatcher>>,
    probe: Option<Box<dyn CapabilityProbe>>,
    deferred: bool,
    constants: ConstantFields,
    options: BackendOptions,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            backend: BackendChoice::Auto,
            dispatcher: None,
            probe: None,
            deferred: false,
            constants: ConstantFields::new(),
            options: BackendOptions::default(),
        }
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            backend: config.backend,
            dispatcher: None,
            probe: None,
            deferred: config.deferred,
            constants: ConstantFields::from(config.constant_fields.clone()),
            options: config.backend_options(),
        }
    }

    /// Choose the backend; ignored when an explicit dispatcher is set
    #[must_use = "builder methods return a new value"]
    pub fn backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }

    /// Use this dispatcher instead of a probed backend
    #[must_use = "builder methods return a new value"]
    pub fn dispatcher<D: Dispatcher + 'static>(mut self, dispatcher: D) -> Self {
        self.dispatcher = Some(Box::new(dispatcher));
        self
    }

    /// Probe used to resolve [`BackendChoice::Auto`] instead of the
    /// process-wide cached result
    #[must_use = "builder methods return a new value"]
    pub fn probe<P: CapabilityProbe + 'static>(mut self, probe: P) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn constant_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.insert(name, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn constant_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.constants.replace(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn journal_socket(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.journal_socket = path.into();
        self
    }

    /// Mirror the bracketed field line to stderr on the terminal backend
    #[must_use = "builder methods return a new value"]
    pub fn debug_mirror(mut self, enable: bool) -> Self {
        self.options.debug_mirror = enable;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let dispatcher = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => {
                let backend = match self.probe {
                    Some(ref probe) => self.backend.resolve_with(&**probe),
                    None => self.backend.resolve(),
                };
                backend.into_dispatcher(&self.options)
            }
        };

        Logger {
            buffer: DeferredLogBuffer::with_constants(self.deferred, self.constants),
            dispatch_order: Mutex::new(()),
            dispatcher,
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
