use thiserror::Error;

/// Errors raised by the article snapshot reader.
///
/// A store failure is fatal to the whole run: the engine aborts before
/// writing any artifact so the previous run's outputs stay visible as
/// the last-known-good state. Data-sufficiency problems are never
/// errors; each analytic reports those inside its own artifact.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article store unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("article store at {path} is not a readable snapshot: {reason}")]
    Malformed { path: String, reason: String },
}
