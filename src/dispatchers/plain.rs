//! Plain dispatcher: message text only, one line per record

use crate::core::{Dispatcher, LoggerError, Result};
use parking_lot::Mutex;
use std::io::Write;

pub struct PlainDispatcher {
    out: Mutex<Box<dyn Write + Send>>,
}

impl PlainDispatcher {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl Dispatcher for PlainDispatcher {
    fn dispatch(&self, _fields: &[String], message: &str) -> Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{}", message)
            .and_then(|_| out.flush())
            .map_err(|e| LoggerError::io_operation("writing plain record", "output closed", e))
    }

    fn name(&self) -> &str {
        "plain"
    }
}
