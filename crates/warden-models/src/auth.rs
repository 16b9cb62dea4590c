//! Authentication request and response payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Email/password signup.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    #[schema(example = "Test User")]
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Issued credential plus the identity it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user_id: Uuid,
    pub email: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user_id: Uuid, email: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            user_id,
            email,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GoogleAuthUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GoogleCallbackQuery {
    /// Authorization code returned by Google.
    pub code: String,
}

/// Subset of Google's userinfo response.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// The v2 endpoint names the subject `id`; OpenID Connect names it `sub`.
    #[serde(default, alias = "sub")]
    pub id: Option<String>,
}
