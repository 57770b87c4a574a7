use thiserror::Error;

/// Failures raised at the boundary of the engine.
///
/// The numeric core is total and never produces one of these: they only come
/// from input validation (calendar fields, location messages, configuration)
/// and from the async ticker plumbing.
#[derive(Error, Debug)]
pub enum LunaError {
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Unknown location key: {0}")]
    UnknownLocationKey(u32),

    #[error("Invalid trigonometric backend: {0}")]
    InvalidTrigMode(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidEngineConfig(String),

    #[error("Ticker result channel closed")]
    SchedulerClosed,
}

impl PartialEq for LunaError {
    fn eq(&self, other: &Self) -> bool {
        use LunaError::*;
        match (self, other) {
            (InvalidInstant(a), InvalidInstant(b)) => a == b,
            (UnknownLocationKey(a), UnknownLocationKey(b)) => a == b,
            (InvalidTrigMode(a), InvalidTrigMode(b)) => a == b,
            (InvalidEngineConfig(a), InvalidEngineConfig(b)) => a == b,

            (SchedulerClosed, SchedulerClosed) => true,

            _ => false,
        }
    }
}
