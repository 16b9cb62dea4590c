//! Credential issuance and verification.
//!
//! [`TokenCore`] is a stateless pair of operations over an injected
//! [`TokenSigner`]:
//!
//! - [`TokenCore::issue`] copies the caller's claims, stamps
//!   `exp = now + ttl` (overwriting any caller-supplied `exp`) and signs.
//! - [`TokenCore::verify`] checks the signature, then requires `exp` to be
//!   present and strictly later than now.
//!
//! Both have `_at` variants taking the current time explicitly. The core
//! holds no mutable state and is safe to share across threads.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::Algorithm;
use warden_config::{ConfigError, JwtConfig};

use crate::claims::{Claims, EXPIRY_CLAIM};
use crate::error::{InvalidCredential, SigningError};
use crate::signer::{JwtSigner, TokenSigner};

#[derive(Debug, Clone)]
pub struct TokenCore<S = JwtSigner> {
    signer: S,
    default_ttl: Duration,
}

impl TokenCore<JwtSigner> {
    /// Builds a core from process configuration. Key and algorithm are fixed
    /// for the lifetime of the returned value.
    ///
    /// Fails when the configured lifetime is not a usable duration.
    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        let default_ttl = config.access_token_ttl()?;
        Ok(Self::new(JwtSigner::from_config(config), default_ttl))
    }
}

impl<S: TokenSigner> TokenCore<S> {
    pub fn new(signer: S, default_ttl: Duration) -> Self {
        Self {
            signer,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn algorithm(&self) -> Algorithm {
        self.signer.algorithm()
    }

    /// Issues a credential valid for `ttl` (or the default lifetime) from now.
    pub fn issue(&self, claims: &Claims, ttl: Option<Duration>) -> Result<String, SigningError> {
        self.issue_at(claims, ttl, Utc::now())
    }

    /// A non-positive `ttl` yields a credential that never verifies.
    pub fn issue_at(
        &self,
        claims: &Claims,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, SigningError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(SigningError::ExpiryOutOfRange)?;

        if let Some(key) = claims.non_finite_claim() {
            return Err(SigningError::NonFiniteClaim(key.to_string()));
        }

        let mut stamped = claims.clone();
        stamped.insert(EXPIRY_CLAIM, expires_at.timestamp());

        self.signer.sign(&stamped)
    }

    pub fn verify(&self, credential: &str) -> Result<Claims, InvalidCredential> {
        self.verify_at(credential, Utc::now())
    }

    pub fn verify_at(
        &self,
        credential: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, InvalidCredential> {
        let claims = self.signer.verify(credential)?;

        match claims.expires_at() {
            Some(exp) if exp > now.timestamp() => Ok(claims),
            _ => Err(InvalidCredential),
        }
    }
}
