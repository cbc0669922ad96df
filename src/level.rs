//! Write levels controlling which lines reach the console.
//!
//! Levels form a strict order: `Debug < Info < Warning < Error`. A line is
//! emitted to the normal sink when its level ranks at or above the writer's
//! configured minimum. `Error` bypasses the comparison entirely and goes to
//! the dedicated error sink.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when configuring an unrecognized write level. The prior level is
/// left untouched by the failed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown write level '{0}'. Valid values are 'DEBUG', 'INFO', 'WARNING', and 'ERROR'")]
pub struct InvalidLevelError(pub String);

/// Verbosity tier for a single write.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl WriteLevel {
    /// Look up a level by its canonical name.
    ///
    /// Returns `None` for anything outside the four recognized names.
    /// Comparison sites treat `None` as hidden rather than failing; only
    /// configuration sites reject unknown names loudly.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Canonical name for serialization and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for WriteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteLevel {
    type Err = InvalidLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| InvalidLevelError(s.to_string()))
    }
}
