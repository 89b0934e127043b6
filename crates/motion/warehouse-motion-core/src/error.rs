//! Error types for the motion core.
//!
//! None of these escape `Engine::update`; a destination that cannot be resolved
//! degrades to a fade-out instead of an error.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// Slot identifier not present in the registry.
    #[error("Location not found: {id}")]
    UnknownLocation { id: String },

    /// Scan payload rejected before an entity is spawned.
    #[error("Malformed scan payload: {reason}")]
    MalformedScan { reason: String },

    /// Scan mode outside add/remove/return.
    #[error("Unknown scan mode: {mode}")]
    UnknownMode { mode: String },
}

pub type Result<T> = std::result::Result<T, MotionError>;
