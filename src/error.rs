use thiserror::Error;

use crate::sim::GamePhase;

/// Errors surfaced by the strict engine API and tuning loading.
///
/// Gameplay itself never fails: the lenient operations treat wrong-phase
/// calls as no-ops.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("operation requires phase {expected:?}, engine is in {actual:?}")]
    InvalidPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning: {0}")]
    Tuning(#[from] serde_json::Error),
}

/// Errors from the LocalStorage persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("local storage access failed: {0}")]
    Access(String),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
