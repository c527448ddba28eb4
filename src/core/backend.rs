//! Backend selection
//!
//! The platform is probed once: a running journal wins, then a
//! color-capable terminal, then plain stdout. The process-wide result is
//! computed on first use and never changes afterwards; loggers can still be
//! built with an explicit backend or dispatcher.

use super::dispatcher::Dispatcher;
use crate::dispatchers::{PlainDispatcher, TerminalDispatcher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default path of the journal's native-protocol socket
pub const DEFAULT_JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// Directory whose presence means the system was booted with systemd
pub const SYSTEMD_RUNTIME_DIR: &str = "/run/systemd/system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Structured records to the systemd journal
    Journal,
    /// Bracketed, colored fields on an interactive terminal
    ColorTerminal,
    /// Message text only
    Plain,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Journal => write!(f, "journal"),
            Backend::ColorTerminal => write!(f, "color_terminal"),
            Backend::Plain => write!(f, "plain"),
        }
    }
}

/// Answers the two capability questions backend selection depends on
pub trait CapabilityProbe: Send + Sync {
    fn journal_available(&self) -> bool;
    fn color_terminal(&self) -> bool;
}

/// Probes the real platform
#[derive(Debug, Clone)]
pub struct SystemProbe {
    journal_socket: PathBuf,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            journal_socket: PathBuf::from(DEFAULT_JOURNAL_SOCKET),
        }
    }

    #[must_use]
    pub fn with_journal_socket(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal_socket = path.into();
        self
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityProbe for SystemProbe {
    #[cfg(all(unix, feature = "journal"))]
    fn journal_available(&self) -> bool {
        Path::new(SYSTEMD_RUNTIME_DIR).is_dir() && self.journal_socket.exists()
    }

    #[cfg(not(all(unix, feature = "journal")))]
    fn journal_available(&self) -> bool {
        false
    }

    fn color_terminal(&self) -> bool {
        if !std::io::stdout().is_terminal() {
            return false;
        }
        if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
            return false;
        }
        #[cfg(windows)]
        {
            colored::control::set_virtual_terminal(true).is_ok()
        }
        #[cfg(not(windows))]
        {
            true
        }
    }
}

/// Probe with fixed answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticProbe {
    pub journal: bool,
    pub color_terminal: bool,
}

impl CapabilityProbe for StaticProbe {
    fn journal_available(&self) -> bool {
        self.journal
    }

    fn color_terminal(&self) -> bool {
        self.color_terminal
    }
}

/// Options consulted when turning a [`Backend`] into a dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOptions {
    pub journal_socket: PathBuf,
    pub debug_mirror: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            journal_socket: PathBuf::from(DEFAULT_JOURNAL_SOCKET),
            debug_mirror: false,
        }
    }
}

static PROCESS_BACKEND: OnceLock<Backend> = OnceLock::new();

impl Backend {
    pub fn detect(probe: &dyn CapabilityProbe) -> Backend {
        if probe.journal_available() {
            Backend::Journal
        } else if probe.color_terminal() {
            Backend::ColorTerminal
        } else {
            Backend::Plain
        }
    }

    /// Backend for this process, probed on first call only
    pub fn process() -> Backend {
        *PROCESS_BACKEND.get_or_init(|| Backend::detect(&SystemProbe::default()))
    }

    /// Build the dispatcher for this backend. A journal that cannot be
    /// opened degrades to the plain dispatcher.
    pub fn into_dispatcher(self, options: &BackendOptions) -> Box<dyn Dispatcher> {
        match self {
            Backend::Journal => journal_dispatcher(&options.journal_socket)
                .unwrap_or_else(|| Box::new(PlainDispatcher::stdout()) as Box<dyn Dispatcher>),
            Backend::ColorTerminal => {
                let terminal = TerminalDispatcher::stdout();
                if options.debug_mirror {
                    Box::new(terminal.with_debug_mirror(std::io::stderr())) as Box<dyn Dispatcher>
                } else {
                    Box::new(terminal)
                }
            }
            Backend::Plain => Box::new(PlainDispatcher::stdout()),
        }
    }
}

#[cfg(all(unix, feature = "journal"))]
fn journal_dispatcher(socket: &Path) -> Option<Box<dyn Dispatcher>> {
    crate::dispatchers::JournalDispatcher::connect(socket)
        .ok()
        .map(|d| Box::new(d) as Box<dyn Dispatcher>)
}

#[cfg(not(all(unix, feature = "journal")))]
fn journal_dispatcher(_socket: &Path) -> Option<Box<dyn Dispatcher>> {
    None
}

/// Backend requested by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendChoice {
    /// Use the process-wide probed backend
    #[default]
    Auto,
    Journal,
    ColorTerminal,
    Plain,
}

impl BackendChoice {
    /// Resolve against the process-wide probe result
    pub fn resolve(self) -> Backend {
        match self {
            BackendChoice::Auto => Backend::process(),
            other => other.forced().unwrap_or(Backend::Plain),
        }
    }

    /// Resolve against a specific probe instead of the cached result
    pub fn resolve_with(self, probe: &dyn CapabilityProbe) -> Backend {
        match self {
            BackendChoice::Auto => Backend::detect(probe),
            other => other.forced().unwrap_or(Backend::Plain),
        }
    }

    fn forced(self) -> Option<Backend> {
        match self {
            BackendChoice::Auto => None,
            BackendChoice::Journal => Some(Backend::Journal),
            BackendChoice::ColorTerminal => Some(Backend::ColorTerminal),
            BackendChoice::Plain => Some(Backend::Plain),
        }
    }
}
