//! Error taxonomy for the fallible edges of the engine.
//!
//! Scoring operations themselves never fail; malformed inputs degrade to
//! fallback values. Errors only arise when loading or validating
//! configuration and session files, or when canonicalizing a report.

/// Errors produced while loading, validating or digesting scoring data.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid points table: {0}")]
    InvalidPointsTable(String),

    #[error("invalid age group: {0}")]
    InvalidAgeGroup(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("value cannot be canonicalized: {0}")]
    NonCanonical(String),

    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Result type for scoring operations that touch configuration or files.
pub type Result<T> = std::result::Result<T, ScoringError>;
