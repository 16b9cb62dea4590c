//! Google OAuth2 authorization-code client.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use warden_config::GoogleOAuthConfig;
use warden_models::GoogleUserInfo;

pub const GOOGLE_SCOPE: &str = "openid email profile";

#[derive(Debug, Error)]
pub enum GoogleAuthError {
    #[error("request to Google failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid OAuth endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    config: GoogleOAuthConfig,
    http: Client,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig) -> Result<Self, GoogleAuthError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GoogleOAuthConfig {
        &self.config
    }

    /// URL the browser is sent to in order to start the consent flow.
    pub fn authorization_url(&self) -> Result<Url, GoogleAuthError> {
        Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", GOOGLE_SCOPE),
                ("access_type", "offline"),
            ],
        )
        .map_err(|e| GoogleAuthError::InvalidEndpoint(e.to_string()))
    }

    /// Exchanges an authorization code for an access token and fetches the
    /// signed-in user's profile with it.
    pub async fn fetch_user_info(&self, code: &str) -> Result<GoogleUserInfo, GoogleAuthError> {
        let token: TokenExchangeResponse = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let user_info = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(user_info)
    }
}
