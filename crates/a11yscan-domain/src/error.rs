//! Error types for trigger-event resolution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Unsupported event kind: {kind}")]
    UnsupportedEvent { kind: String },

    #[error("Event {kind} is missing revision identifiers")]
    MissingRevisions { kind: String },

    #[error("Malformed event payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Invalid repository coordinates: {value} (expected owner/repo)")]
    InvalidRepository { value: String },
}

/// Result type for trigger-event resolution
pub type Result<T> = std::result::Result<T, TriggerError>;
