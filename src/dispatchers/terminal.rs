//! Terminal dispatcher with rotating field colors

use crate::core::formatter::bracketed_line;
use crate::core::{Dispatcher, LoggerError, Result};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

/// Field colors, picked by field position modulo the palette size
pub const FIELD_PALETTE: [(u8, u8, u8); 7] = [
    (255, 0, 0),
    (255, 127, 0),
    (255, 255, 0),
    (0, 255, 0),
    (0, 0, 255),
    (75, 0, 130),
    (148, 0, 211),
];

/// Renders `[NAME=VALUE]` fields in color, then the message on its own line.
///
/// # Example
///
/// ```
/// use rust_journal_logger::dispatchers::{SharedWriter, TerminalDispatcher};
/// use rust_journal_logger::Dispatcher;
///
/// let out = SharedWriter::new();
/// let terminal = TerminalDispatcher::new(out.clone()).with_colors(false);
/// terminal.dispatch(&["PRIORITY=6".to_string()], "ready").unwrap();
/// assert_eq!(out.contents(), "[PRIORITY=6]\nready\n");
/// ```
pub struct TerminalDispatcher {
    out: Mutex<Box<dyn Write + Send>>,
    debug_mirror: Option<Mutex<Box<dyn Write + Send>>>,
    use_colors: bool,
}

impl TerminalDispatcher {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            debug_mirror: None,
            use_colors: true,
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Also write the uncolored bracketed field line to `writer`
    #[must_use]
    pub fn with_debug_mirror<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.debug_mirror = Some(Mutex::new(Box::new(writer)));
        self
    }

    fn render(&self, fields: &[String], message: &str) -> String {
        let mut line = String::new();
        for (idx, field) in fields.iter().enumerate() {
            let bracketed = format!("[{}]", field);
            if self.use_colors {
                let (r, g, b) = FIELD_PALETTE[idx % FIELD_PALETTE.len()];
                line.push_str(&bracketed.truecolor(r, g, b).to_string());
            } else {
                line.push_str(&bracketed);
            }
        }
        line.push('\n');
        line.push_str(message);
        line.push('\n');
        line
    }
}

impl Dispatcher for TerminalDispatcher {
    fn dispatch(&self, fields: &[String], message: &str) -> Result<()> {
        if let Some(ref mirror) = self.debug_mirror {
            let mut mirror = mirror.lock();
            // Best effort: the mirror never decides the outcome
            let _ = writeln!(mirror, "{}", bracketed_line(fields));
        }

        let rendered = self.render(fields, message);
        let mut out = self.out.lock();
        out.write_all(rendered.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| LoggerError::io_operation("writing terminal record", "output closed", e))
    }

    fn name(&self) -> &str {
        "terminal"
    }
}
