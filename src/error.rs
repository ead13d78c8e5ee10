//! Error types for notify-relay.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Malformed message input, raised at construction or parse time.
///
/// These never reach the pipeline — a `Message` that exists is valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Message recipient cannot be empty")]
    EmptyRecipient,

    #[error("Message channel cannot be empty")]
    EmptyChannel,

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Message priority cannot be empty")]
    EmptyPriority,

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration overrides: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures inside a pipeline invocation.
///
/// Recovered at the `send` boundary and converted into a
/// `processing_error` outcome — they never propagate to callers.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Packaging failed: {0}")]
    Packaging(String),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] TransportError),

    #[error("Delivery timed out on channel {channel} after {secs}s")]
    DeliveryTimeout { channel: String, secs: u64 },
}

/// Transport collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Send failed on channel {channel}: {reason}")]
    SendFailed { channel: String, reason: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
