//! Credential signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC secret (default: a development placeholder)
//! - `JWT_ALGORITHM`: `HS256` (default), `HS384` or `HS512`
//! - `JWT_ACCESS_EXPIRY`: default credential lifetime in seconds (default: 1800)
//!
//! Rotating the secret or the algorithm invalidates every credential issued
//! before the change.

use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;

use crate::error::ConfigError;
use crate::parse_or;

/// Placeholder secret used when `JWT_SECRET` is not set.
pub const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Default credential lifetime: 30 minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 30 * 60;

#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    /// Default credential lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// HS256 with the default lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_token_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_SECRET.to_string());
        if secret.is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        let algorithm = match lookup("JWT_ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let config = Self {
            secret,
            algorithm,
            access_token_expiry: parse_or(
                &lookup,
                "JWT_ACCESS_EXPIRY",
                DEFAULT_ACCESS_TOKEN_EXPIRY,
            )?,
        };
        config.access_token_ttl()?;

        Ok(config)
    }

    /// The default lifetime as a duration. It must be positive, and a
    /// credential issued now must have an expiry inside chrono's range.
    pub fn access_token_ttl(&self) -> Result<Duration, ConfigError> {
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::NotPositive("JWT_ACCESS_EXPIRY"));
        }

        Duration::try_seconds(self.access_token_expiry)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "JWT_ACCESS_EXPIRY",
                value: self.access_token_expiry.to_string(),
            })
    }

    /// True when the development placeholder secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

/// Only the symmetric HMAC family is accepted.
pub fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = Algorithm::from_str(raw.trim().to_uppercase().as_str())
        .map_err(|_| ConfigError::UnsupportedAlgorithm(raw.to_string()))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(ConfigError::UnsupportedAlgorithm(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = JwtConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.secret, DEFAULT_SECRET);
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expiry, 1800);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_reads_all_values() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "hs512"),
            ("JWT_ACCESS_EXPIRY", "600"),
        ]))
        .unwrap();

        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.access_token_expiry, 600);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let err = JwtConfig::from_lookup(lookup_from(&[("JWT_ALGORITHM", "RS256")])).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedAlgorithm("RS256".to_string()));
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        assert!(parse_algorithm("none").is_err());
        assert!(parse_algorithm("HS1024").is_err());
    }

    #[test]
    fn test_rejects_bad_expiry() {
        let err =
            JwtConfig::from_lookup(lookup_from(&[("JWT_ACCESS_EXPIRY", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "JWT_ACCESS_EXPIRY", .. }));

        let err = JwtConfig::from_lookup(lookup_from(&[("JWT_ACCESS_EXPIRY", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::NotPositive("JWT_ACCESS_EXPIRY"));
    }

    #[test]
    fn test_rejects_unrepresentable_expiry() {
        let err = JwtConfig::from_lookup(lookup_from(&[(
            "JWT_ACCESS_EXPIRY",
            "9223372036854775807",
        )]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "JWT_ACCESS_EXPIRY",
                value: "9223372036854775807".to_string(),
            }
        );

        // Fits in a Duration, but now + ttl is past chrono's last date.
        let ten_million_years = 10_000_000 * 365 * 24 * 3600_i64;
        let config = JwtConfig::new("k").with_access_token_expiry(ten_million_years);
        assert!(config.access_token_ttl().is_err());
    }

    #[test]
    fn test_access_token_ttl() {
        let config = JwtConfig::new("k").with_access_token_expiry(90);
        assert_eq!(config.access_token_ttl().unwrap(), Duration::seconds(90));

        let config = JwtConfig::new("k").with_access_token_expiry(-5);
        assert_eq!(
            config.access_token_ttl().unwrap_err(),
            ConfigError::NotPositive("JWT_ACCESS_EXPIRY")
        );
    }

    #[test]
    fn test_rejects_empty_secret() {
        let err = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty("JWT_SECRET"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_builders() {
        let config = JwtConfig::new("k")
            .with_algorithm(Algorithm::HS384)
            .with_access_token_expiry(60);

        assert_eq!(config.algorithm, Algorithm::HS384);
        assert_eq!(config.access_token_expiry, 60);
    }
}
