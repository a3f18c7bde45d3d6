//! Error taxonomy shared by every engine operation.
//!
//! All variants are local and recoverable: callers surface them and retry.
//! Any operation that returns one of these leaves vehicle, inventory and
//! session state exactly as it was before the call.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the simulation core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("invalid part {name:?}: {reason}")]
    InvalidPart { name: String, reason: &'static str },
    #[error("index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown rarity {key:?}")]
    UnknownRarity { key: String },
    #[error("difficulty must be between 1 and {max} (got {difficulty})")]
    InvalidDifficulty { difficulty: u32, max: u32 },
    #[error("removing {part:?} would overflow a vehicle stat")]
    StatOverflow { part: String },
    #[error("the vehicle is destroyed; the session is over")]
    SessionOver,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError {
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
