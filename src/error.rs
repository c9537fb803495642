//! Domain errors callers may want to match on
//!
//! Pipeline code carries these inside `anyhow::Error`; use
//! `err.downcast_ref::<AuralError>()` to inspect them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuralError {
    #[error("audio file decoded to zero samples: {0:?}")]
    EmptyAudio(PathBuf),

    #[error("audio too short for analysis: {samples} samples at {sample_rate}Hz")]
    AudioTooShort { samples: usize, sample_rate: u32 },

    #[error("no cosmic alignment matches '{0}'")]
    AlignmentNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("session file missing: {0:?}")]
    MissingSessionFile(PathBuf),
}
