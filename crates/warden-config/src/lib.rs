//! # Warden Config
//!
//! Configuration types for the Warden auth service, loaded once at startup
//! from environment variables and immutable afterwards:
//!
//! - [`jwt`]: Credential signing key, algorithm and default lifetime
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`google`]: Google OAuth2 client configuration
//! - [`server`]: Bind address
//!
//! Every type offers `from_env()` plus a `from_lookup()` variant that takes a
//! key lookup function, so tests never touch the process environment.
//!
//! # Example
//!
//! ```ignore
//! use warden_config::{CorsConfig, GoogleOAuthConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let google_config = GoogleOAuthConfig::from_env();
//! let server_config = ServerConfig::from_env()?;
//! ```

pub mod cors;
pub mod error;
pub mod google;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use google::GoogleOAuthConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default` when
/// the key is absent. A present but unparsable value is an error.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}
