//! # Warden Core
//!
//! Core types shared by the Warden crates:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing capability backed by bcrypt
//!
//! # Example
//!
//! ```ignore
//! use warden_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! if !verify_password("secure_password", &hash)? {
//!     return Err(AppError::unauthorized(anyhow::anyhow!("Incorrect email or password")));
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{BcryptHasher, PasswordHasher, hash_password, verify_password};
