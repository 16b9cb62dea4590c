//! Google OAuth2 client configuration.
//!
//! # Environment Variables
//!
//! - `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`: OAuth client credentials
//! - `GOOGLE_REDIRECT_URI`: callback URL registered with Google
//!   (default: `http://localhost:8000/auth/google/callback`)
//!
//! The endpoint URLs default to Google's and are only overridden in tests.

use std::env;
use std::fmt;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/auth/google/callback";

#[derive(Clone, PartialEq, Eq)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl GoogleOAuthConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            client_id: lookup("GOOGLE_CLIENT_ID").unwrap_or_default(),
            client_secret: lookup("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: lookup("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        }
    }

    /// Client id and secret are both present.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl fmt::Debug for GoogleOAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = GoogleOAuthConfig::from_lookup(|_| None);

        assert!(config.client_id.is_empty());
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(config.auth_url, GOOGLE_AUTH_URL);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_configured() {
        let config = GoogleOAuthConfig::from_lookup(|key| match key {
            "GOOGLE_CLIENT_ID" => Some("client".into()),
            "GOOGLE_CLIENT_SECRET" => Some("shh".into()),
            _ => None,
        });

        assert!(config.is_configured());
        assert!(!format!("{:?}", config).contains("shh"));
    }
}
