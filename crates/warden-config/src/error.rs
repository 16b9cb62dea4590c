use thiserror::Error;

/// Startup configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("unsupported signing algorithm {0:?}; expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}
