use thiserror::Error;

use crate::timer::TimerPhase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("cannot {operation} while the timer is {phase:?}")]
    InvalidState {
        operation: &'static str,
        phase: TimerPhase,
    },
    #[error("session duration must be greater than zero")]
    ZeroDuration,
    #[error("timer has no configured duration")]
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to encode or decode stored value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage worker unavailable: {0}")]
    WorkerUnavailable(String),
}

/// Failures around the durable progress record. Neither variant is fatal:
/// reads fall back to empty progress, writes keep the in-memory state.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to read pathway progress: {0}")]
    Read(#[source] StoreError),
    #[error("failed to persist pathway progress: {0}")]
    Write(#[source] StoreError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathwayError {
    #[error("stage ordinals must be contiguous from 1: expected {expected}, found {found}")]
    OrdinalGap { expected: u32, found: u32 },
    #[error("stage id {0} appears more than once")]
    DuplicateId(u32),
    #[error("stage {0} has a zero duration")]
    ZeroDuration(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs a stage number")]
    MissingStage(&'static str),
    #[error("'{0}' is not a stage number")]
    InvalidStage(String),
}
