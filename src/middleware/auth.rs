use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;
use warden_auth::Claims;
use warden_core::AppError;

use crate::metrics::track_credential_verification;
use crate::state::AppState;

/// Extractor that verifies the bearer credential and yields its claims.
///
/// Verification failures are reported to the client as a bare
/// `401 Invalid token`, whatever the underlying cause.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    /// The `sub` claim, if present and a string.
    pub fn subject(&self) -> Option<&str> {
        self.0.subject()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AppError::unauthorized(anyhow!("Missing authorization header"))
                    } else {
                        AppError::unauthorized(anyhow!("Invalid authorization header format"))
                    }
                })?;

        let claims = state.tokens.verify(bearer.token()).map_err(|_| {
            debug!(path = %parts.uri.path(), "Rejected bearer credential");
            track_credential_verification(false);
            AppError::unauthorized(anyhow!("Invalid token"))
        })?;

        track_credential_verification(true);
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_auth::EXPIRY_CLAIM;

    #[test]
    fn test_subject() {
        let auth_user = AuthUser(Claims::with_subject("a@example.com").with(EXPIRY_CLAIM, 1));
        assert_eq!(auth_user.subject(), Some("a@example.com"));
    }

    #[test]
    fn test_subject_missing() {
        let auth_user = AuthUser(Claims::new().with(EXPIRY_CLAIM, 1));
        assert_eq!(auth_user.subject(), None);
    }

    #[test]
    fn test_subject_not_a_string() {
        let auth_user = AuthUser(Claims::new().with("sub", 42));
        assert_eq!(auth_user.subject(), None);
        assert_eq!(auth_user.claims().len(), 1);
    }
}
