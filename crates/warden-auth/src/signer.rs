//! Signing capability.
//!
//! [`TokenSigner`] binds a claims set to a signature and checks it again,
//! without any notion of time. Expiry policy lives in
//! [`TokenCore`](crate::TokenCore), so it can be exercised against any signer.

use std::collections::HashSet;
use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use warden_config::JwtConfig;

use crate::claims::Claims;
use crate::error::{InvalidCredential, SigningError};

pub trait TokenSigner: Send + Sync {
    /// The algorithm every credential must carry.
    fn algorithm(&self) -> Algorithm;

    fn sign(&self, claims: &Claims) -> Result<String, SigningError>;

    /// Checks signature, algorithm and claims shape. Does not look at expiry.
    fn verify(&self, credential: &str) -> Result<Claims, InvalidCredential>;
}

/// HMAC-signed compact JWTs.
#[derive(Clone)]
pub struct JwtSigner {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        // The header's `alg` must equal the configured algorithm. `exp` is
        // checked by TokenCore, and audience is an ordinary caller claim.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes(), config.algorithm)
    }
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenSigner for JwtSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, claims: &Claims) -> Result<String, SigningError> {
        Ok(encode(
            &Header::new(self.algorithm),
            claims,
            &self.encoding_key,
        )?)
    }

    fn verify(&self, credential: &str) -> Result<Claims, InvalidCredential> {
        decode::<Claims>(credential, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidCredential)
    }
}
