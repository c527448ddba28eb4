//! Deferred log buffer
//!
//! Pending entries, constant fields and the deferral flag live behind one
//! mutex and are always read and written together. Nothing in here performs
//! I/O: operations that need to deliver entries hand back a [`Batch`] which
//! the caller dispatches after the lock is released.

use super::constant_fields::ConstantFields;
use super::formatter::{FieldFormatter, FormattedRecord};
use super::log_entry::LogEntry;
use super::priority::Priority;
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Entries detached from the buffer together with the constant fields that
/// were current at the moment of detachment.
#[derive(Debug, Default)]
pub struct Batch {
    entries: Vec<LogEntry>,
    constants: ConstantFields,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn constants(&self) -> &ConstantFields {
        &self.constants
    }

    /// Format the entries in submission order
    pub fn records(&self) -> impl Iterator<Item = FormattedRecord> + '_ {
        self.entries
            .iter()
            .map(move |entry| FieldFormatter::format(entry, &self.constants))
    }
}

#[derive(Debug)]
struct BufferState {
    pending: Vec<LogEntry>,
    constants: ConstantFields,
    deferred: bool,
}

#[derive(Debug)]
pub struct DeferredLogBuffer {
    state: Mutex<BufferState>,
}

impl DeferredLogBuffer {
    pub fn new(deferred: bool) -> Self {
        Self::with_constants(deferred, ConstantFields::new())
    }

    pub fn with_constants(deferred: bool, constants: ConstantFields) -> Self {
        Self {
            state: Mutex::new(BufferState {
                pending: Vec::new(),
                constants,
                deferred,
            }),
        }
    }

    /// Queue `entry`, or in immediate mode return it as a one-entry batch
    /// that must be dispatched right away.
    pub fn submit(&self, entry: LogEntry) -> Option<Batch> {
        let mut state = self.state.lock();
        if state.deferred {
            state.pending.push(entry);
            None
        } else {
            Some(Batch {
                entries: vec![entry],
                constants: state.constants.snapshot(),
            })
        }
    }

    /// Drop every pending entry whose priority value is `>= threshold`,
    /// i.e. entries at least as trivial as the threshold. Returns how many
    /// entries were removed.
    pub fn discard(&self, threshold: Priority) -> usize {
        let mut state = self.state.lock();
        let before = state.pending.len();
        state
            .pending
            .retain(|entry| entry.priority.as_u8() < threshold.as_u8());
        before - state.pending.len()
    }

    /// Swap the pending sequence out for an empty one
    pub fn detach(&self) -> Batch {
        let mut state = self.state.lock();
        Batch {
            entries: std::mem::take(&mut state.pending),
            constants: state.constants.snapshot(),
        }
    }

    /// Change the deferral mode. Leaving deferred mode detaches whatever is
    /// pending in the same critical section, so the returned batch must be
    /// dispatched before anything submitted afterwards is considered sent.
    pub fn set_deferred(&self, deferred: bool) -> Option<Batch> {
        let mut state = self.state.lock();
        let was_deferred = std::mem::replace(&mut state.deferred, deferred);
        if was_deferred && !deferred {
            Some(Batch {
                entries: std::mem::take(&mut state.pending),
                constants: state.constants.snapshot(),
            })
        } else {
            None
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.state.lock().deferred
    }

    pub fn add_constant_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.state.lock().constants.insert(name, value);
    }

    pub fn set_constant_fields(&self, fields: BTreeMap<String, String>) {
        self.state.lock().constants.replace(fields);
    }

    pub fn remove_constant_field(&self, name: &str) -> Option<String> {
        self.state.lock().constants.remove(name)
    }

    pub fn constant_fields(&self) -> ConstantFields {
        self.state.lock().constants.snapshot()
    }

    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().pending.is_empty()
    }
}

impl Default for DeferredLogBuffer {
    fn default() -> Self {
        Self::new(false)
    }
}
