//! Journal dispatcher speaking the systemd native protocol
//!
//! One datagram per record. Every field goes out as `NAME=VALUE\n`, except
//! values containing a newline, which use the length-prefixed form
//! `NAME\n<u64 little-endian length><value>\n`. `MESSAGE=` is always last.
//!
//! A record too large for one datagram is written to a sealed memfd on Linux
//! and the descriptor is passed to the journal with `SCM_RIGHTS`; the journal
//! reads the record from it as if it had arrived inline.

use crate::core::formatter::message_field;
use crate::core::{Dispatcher, LoggerError, Result};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};

#[cfg(target_os = "linux")]
const EMSGSIZE: i32 = 90;
#[cfg(not(target_os = "linux"))]
const EMSGSIZE: i32 = 40;

/// Journal dispatcher
///
/// # Example
///
/// ```no_run
/// use rust_journal_logger::dispatchers::JournalDispatcher;
/// use rust_journal_logger::prelude::*;
///
/// let journal = JournalDispatcher::connect("/run/systemd/journal/socket")
///     .expect("journal socket not reachable");
///
/// let logger = Logger::builder().dispatcher(journal).build();
/// logger.log(Priority::Notice, [("UNIT_STATE", "ready")], "service ready");
/// ```
#[derive(Debug)]
pub struct JournalDispatcher {
    socket: UnixDatagram,
    path: PathBuf,
}

impl JournalDispatcher {
    /// Connect to the journal socket at `path`
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::JournalUnavailable`] if the socket cannot be
    /// created or nothing listens at `path`.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let socket = UnixDatagram::unbound()
            .map_err(|e| LoggerError::journal_unavailable(path.display().to_string(), e.to_string()))?;
        socket
            .connect(path)
            .map_err(|e| LoggerError::journal_unavailable(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            socket,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize fields and message into one native-protocol datagram
    pub fn encode(fields: &[String], message: &str) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(
            fields.iter().map(|f| f.len() + 1).sum::<usize>() + message.len() + 9,
        );
        for field in fields {
            encode_record(&mut payload, field)?;
        }
        encode_record(&mut payload, &message_field(message))?;
        Ok(payload)
    }
}

fn encode_record(payload: &mut Vec<u8>, record: &str) -> Result<()> {
    let (name, value) = record
        .split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| LoggerError::invalid_field(record))?;

    if value.contains('\n') {
        payload.extend_from_slice(name.as_bytes());
        payload.push(b'\n');
        payload.extend_from_slice(&(value.len() as u64).to_le_bytes());
        payload.extend_from_slice(value.as_bytes());
    } else {
        payload.extend_from_slice(record.as_bytes());
    }
    payload.push(b'\n');
    Ok(())
}

impl JournalDispatcher {
    fn io_error(&self, operation: &str, source: std::io::Error) -> LoggerError {
        LoggerError::io_operation(operation, self.path.display().to_string(), source)
    }

    #[cfg(target_os = "linux")]
    fn send_oversized(&self, payload: &[u8]) -> Result<()> {
        use rustix::fs::{fcntl_add_seals, memfd_create, MemfdFlags, SealFlags};
        use rustix::net::{sendmsg, SendAncillaryBuffer, SendAncillaryMessage, SendFlags};
        use std::io::Write;
        use std::mem::MaybeUninit;
        use std::os::fd::AsFd;

        let memfd = memfd_create(
            "journal-record",
            MemfdFlags::CLOEXEC | MemfdFlags::ALLOW_SEALING,
        )
        .map_err(|e| self.io_error("creating journal memfd", e.into()))?;
        let mut file = std::fs::File::from(memfd);
        file.write_all(payload)
            .map_err(|e| self.io_error("writing journal memfd", e))?;
        fcntl_add_seals(
            &file,
            SealFlags::SEAL | SealFlags::SHRINK | SealFlags::GROW | SealFlags::WRITE,
        )
        .map_err(|e| self.io_error("sealing journal memfd", e.into()))?;

        let fds = [file.as_fd()];
        let mut space = [MaybeUninit::uninit(); rustix::cmsg_space!(ScmRights(1))];
        let mut control = SendAncillaryBuffer::new(&mut space);
        if !control.push(SendAncillaryMessage::ScmRights(&fds)) {
            return Err(LoggerError::dispatcher("journal", "SCM_RIGHTS does not fit"));
        }
        sendmsg(&self.socket, &[], &mut control, SendFlags::empty())
            .map_err(|e| self.io_error("passing journal memfd", e.into()))?;
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn send_oversized(&self, payload: &[u8]) -> Result<()> {
        Err(LoggerError::DatagramTooLarge {
            size: payload.len(),
        })
    }
}

impl Dispatcher for JournalDispatcher {
    fn dispatch(&self, fields: &[String], message: &str) -> Result<()> {
        let payload = Self::encode(fields, message)?;
        match self.socket.send(&payload) {
            Ok(_) => Ok(()),
            Err(e) if e.raw_os_error() == Some(EMSGSIZE) => self.send_oversized(&payload),
            Err(e) => Err(self.io_error("sending journal datagram", e)),
        }
    }

    fn name(&self) -> &str {
        "journal"
    }
}
