use thiserror::Error;

/// Errors from user-facing input validation.
///
/// These are the only errors surfaced to the caller as blocking alerts;
/// everything else is recovered inside the controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("no file selected")]
    EmptyFileSelection,
}

/// Errors from the persistence layer (used by trait definitions in
/// taxmitra-core).
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Stored data exists but cannot be decoded.
    #[error("corrupt state in slot '{slot}': {detail}")]
    CorruptState { slot: String, detail: String },

    /// The backing store rejected a read or write.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
}
