//! In-memory dispatcher and writer for tests and embedding
//!
//! `CaptureDispatcher` stores every record it is handed. Clones share the
//! same storage, so one clone can be moved into a logger while another is
//! kept for inspection.

use crate::core::formatter::PRIORITY_FIELD;
use crate::core::{Dispatcher, LoggerError, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One record as the dispatcher received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub fields: Vec<String>,
    pub message: String,
}

impl CapturedRecord {
    /// Numeric value of the leading `PRIORITY=` field
    pub fn priority(&self) -> Option<u8> {
        self.field(PRIORITY_FIELD)?.parse().ok()
    }

    /// Value of the first field named `name`
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| {
            f.split_once('=')
                .filter(|(n, _)| *n == name)
                .map(|(_, v)| v)
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureDispatcher {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
    failing: Arc<AtomicBool>,
}

impl CaptureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent dispatch fail without recording
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Dispatcher for CaptureDispatcher {
    fn dispatch(&self, fields: &[String], message: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LoggerError::dispatcher("capture", "simulated failure"));
        }
        self.records.lock().push(CapturedRecord {
            fields: fields.to_vec(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// A `Write` target whose bytes can be read back from any clone
#[derive(Debug, Clone, Default)]
pub struct SharedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
