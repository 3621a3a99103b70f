//! Simulator error definitions.
//!
//! The cycle engine itself never fails: hazards stall, bad operands fall back
//! to defined values. This module covers the few contract violations that can
//! still reach a caller:
//! 1. **Lifecycle:** Stepping or inspecting a machine that was never initialized.
//! 2. **Configuration:** Unreadable, unparsable, or inconsistent configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the simulator's public API.
#[derive(Debug, Error)]
pub enum SimError {
    /// `advance_cycle` (or a snapshot) was requested before `initialize`.
    ///
    /// Without an allocated station pool there is nothing to operate on, so
    /// this is reported instead of silently doing nothing.
    #[error("simulator has not been initialized; call `initialize` first")]
    NotInitialized,

    /// Configuration text was not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    ConfigRead {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Configuration parsed but describes an unusable machine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;
