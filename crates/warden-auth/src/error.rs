use thiserror::Error;

/// The only verification failure. Malformed input, signature mismatch,
/// algorithm mismatch, wrong claims shape, missing or elapsed expiry all
/// collapse into this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid credential")]
pub struct InvalidCredential;

/// Issuance failures. These indicate a programming or configuration error,
/// never a bad request.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("failed to encode credential: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("credential expiry is outside the representable time range")]
    ExpiryOutOfRange,

    #[error("claim {0:?} is NaN or infinite and cannot be encoded")]
    NonFiniteClaim(String),
}
