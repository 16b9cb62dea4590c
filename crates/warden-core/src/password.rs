//! Password hashing.
//!
//! Hashing is exposed as the [`PasswordHasher`] capability so the HTTP layer
//! can be handed a cheaper hasher in tests. [`BcryptHasher`] is the production
//! implementation.

use std::fmt::Debug;

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes passwords and checks candidates against stored hashes.
pub trait PasswordHasher: Debug + Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Returns `Ok(false)` on mismatch. A hash that cannot be parsed is an
    /// error, not a mismatch.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify(password, hash)
            .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    BcryptHasher::default().hash(password)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    BcryptHasher::default().verify(password, hash)
}
