//! # Warden Auth
//!
//! Issuance and verification of signed, time-bounded credentials.
//!
//! - [`claims`]: The claims set carried by a credential
//! - [`signer`]: The signing capability and its JWT implementation
//! - [`token`]: [`TokenCore`], which stamps expiry on issue and enforces it on verify
//! - [`error`]: [`InvalidCredential`] and [`SigningError`]
//!
//! Credentials are compact JWTs (`header.payload.signature`, base64url)
//! signed with an HMAC algorithm pinned by configuration. Verification
//! reports every failure as the single [`InvalidCredential`] value: callers
//! cannot learn whether the signature, the algorithm, the structure or the
//! expiry was at fault.
//!
//! # Example
//!
//! ```ignore
//! use warden_auth::{Claims, TokenCore};
//! use warden_config::JwtConfig;
//!
//! let core = TokenCore::from_config(&JwtConfig::from_env()?)?;
//!
//! let token = core.issue(&Claims::with_subject("a@example.com"), None)?;
//! let claims = core.verify(&token)?;
//! assert_eq!(claims.subject(), Some("a@example.com"));
//! ```

pub mod claims;
pub mod error;
pub mod signer;
pub mod token;

// Re-export commonly used types at crate root
pub use claims::{ClaimValue, Claims, EXPIRY_CLAIM, SUBJECT_CLAIM};
pub use error::{InvalidCredential, SigningError};
pub use signer::{JwtSigner, TokenSigner};
pub use token::TokenCore;
