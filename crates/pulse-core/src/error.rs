//! Shared error type across pulse crates.

use thiserror::Error;

/// Stable error codes (used in HTTP error bodies and logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Name collision with an incompatible descriptor.
    DuplicateMetric,
    /// Label keys do not match the descriptor.
    InvalidLabelSet,
    /// Negative counter delta or NaN observation.
    InvalidValue,
    /// Metric or label name outside the allowed charset.
    InvalidName,
    /// Histogram bounds are empty, unordered or NaN.
    InvalidBuckets,
    /// Configuration rejected.
    BadConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Internal failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DuplicateMetric => "DUPLICATE_METRIC",
            ErrorCode::InvalidLabelSet => "INVALID_LABEL_SET",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::InvalidBuckets => "INVALID_BUCKETS",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PulseError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("duplicate metric {name}: {detail}")]
    DuplicateMetric { name: String, detail: String },
    #[error("invalid label set for {metric}: expected {expected:?}, got {got:?}")]
    InvalidLabelSet {
        metric: String,
        expected: Vec<String>,
        got: Vec<String>,
    },
    #[error("invalid value for {metric}: {detail}")]
    InvalidValue { metric: String, detail: String },
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid buckets: {0}")]
    InvalidBuckets(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl PulseError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PulseError::DuplicateMetric { .. } => ErrorCode::DuplicateMetric,
            PulseError::InvalidLabelSet { .. } => ErrorCode::InvalidLabelSet,
            PulseError::InvalidValue { .. } => ErrorCode::InvalidValue,
            PulseError::InvalidName(_) => ErrorCode::InvalidName,
            PulseError::InvalidBuckets(_) => ErrorCode::InvalidBuckets,
            PulseError::BadConfig(_) => ErrorCode::BadConfig,
            PulseError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            PulseError::Internal(_) => ErrorCode::Internal,
        }
    }
}
