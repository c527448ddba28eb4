//! Syslog-style priority definitions
//!
//! Lower numeric values are more severe: `0` is an emergency, `7` is debug
//! output. The numeric value is what ends up in the `PRIORITY=` field.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Priority {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
}

impl Priority {
    pub const ALL: [Priority; 8] = [
        Priority::Emergency,
        Priority::Alert,
        Priority::Critical,
        Priority::Error,
        Priority::Warning,
        Priority::Notice,
        Priority::Info,
        Priority::Debug,
    ];

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Priority::Emergency => "EMERG",
            Priority::Alert => "ALERT",
            Priority::Critical => "CRIT",
            Priority::Error => "ERR",
            Priority::Warning => "WARNING",
            Priority::Notice => "NOTICE",
            Priority::Info => "INFO",
            Priority::Debug => "DEBUG",
        }
    }

    /// True when `self` is as severe as `other` or more (numerically lower or equal)
    #[inline]
    pub fn is_at_least_as_severe_as(self, other: Priority) -> bool {
        self.as_u8() <= other.as_u8()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<u8> for Priority {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        Priority::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| LoggerError::InvalidPriority(value.to_string()))
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.as_u8()
    }
}

impl FromStr for Priority {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Priority::try_from(n);
        }
        match trimmed.to_uppercase().as_str() {
            "EMERG" | "EMERGENCY" | "PANIC" => Ok(Priority::Emergency),
            "ALERT" => Ok(Priority::Alert),
            "CRIT" | "CRITICAL" => Ok(Priority::Critical),
            "ERR" | "ERROR" => Ok(Priority::Error),
            "WARN" | "WARNING" => Ok(Priority::Warning),
            "NOTICE" => Ok(Priority::Notice),
            "INFO" => Ok(Priority::Info),
            "DEBUG" => Ok(Priority::Debug),
            _ => Err(LoggerError::InvalidPriority(s.to_string())),
        }
    }
}
