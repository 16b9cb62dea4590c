use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use warden_auth::{Claims, TokenCore};
use warden_core::AppError;
use warden_models::{LoginRequest, SignupRequest, TokenResponse, User, UserProfile};

use crate::metrics::{track_credential_issued, track_login, track_user_created};
use crate::state::AppState;

const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";

/// Emails are stored and looked up trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn signup(state: &AppState, dto: SignupRequest) -> Result<TokenResponse, AppError> {
        let email = normalize_email(&dto.email);

        if Self::find_by_email(&state.db, &email).await?.is_some() {
            return Err(AppError::bad_request(anyhow!("Email already registered")));
        }

        let hasher = state.password_hasher.clone();
        let password = dto.password;
        let hashed_password =
            tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, hashed_password, full_name)
             VALUES ($1, $2, $3)
             RETURNING id, email, hashed_password, full_name, google_id, is_active, created_at, updated_at",
        )
        .bind(&email)
        .bind(&hashed_password)
        .bind(dto.full_name.trim())
        .fetch_one(&state.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::bad_request(anyhow!("Email already registered"))
            }
            other => AppError::from(other),
        })?;

        info!(user_id = %user.id, "User registered");
        track_user_created("password");

        Self::issue_for(&state.tokens, &user)
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<TokenResponse, AppError> {
        let email = normalize_email(&dto.email);

        let Some(user) = Self::find_by_email(&state.db, &email).await? else {
            track_login("unknown_user");
            return Err(AppError::unauthorized(anyhow!(INCORRECT_CREDENTIALS)));
        };

        // OAuth-only accounts have no password to check against.
        let Some(hashed_password) = user.hashed_password.clone() else {
            track_login("no_password");
            return Err(AppError::unauthorized(anyhow!(INCORRECT_CREDENTIALS)));
        };

        let hasher = state.password_hasher.clone();
        let password = dto.password;
        let is_valid =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed_password))
                .await??;

        if !is_valid {
            track_login("wrong_password");
            return Err(AppError::unauthorized(anyhow!(INCORRECT_CREDENTIALS)));
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login attempt for inactive user");
            track_login("inactive");
            return Err(AppError::forbidden(anyhow!("Inactive user")));
        }

        track_login("success");
        Self::issue_for(&state.tokens, &user)
    }

    /// Completes the authorization-code flow, creating the user on first
    /// sign-in and linking the Google id to an existing account otherwise.
    #[instrument(skip(state, code))]
    pub async fn google_login(state: &AppState, code: &str) -> Result<TokenResponse, AppError> {
        let user_info = state
            .google
            .fetch_user_info(code)
            .await?;

        let email = normalize_email(&user_info.email);
        let existing = Self::find_by_email(&state.db, &email).await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, full_name, google_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO UPDATE
                SET google_id = COALESCE(users.google_id, EXCLUDED.google_id),
                    updated_at = NOW()
             RETURNING id, email, hashed_password, full_name, google_id, is_active, created_at, updated_at",
        )
        .bind(&email)
        .bind(user_info.name.as_deref().unwrap_or_default())
        .bind(user_info.id.as_deref())
        .fetch_one(&state.db)
        .await?;

        if existing.is_none() {
            info!(user_id = %user.id, "User registered via Google");
            track_user_created("google");
        }

        Self::issue_for(&state.tokens, &user)
    }

    /// Resolves the verified claims' subject to a stored user.
    #[instrument(skip(db, claims))]
    pub async fn current_user(db: &PgPool, claims: &Claims) -> Result<UserProfile, AppError> {
        let email = claims
            .subject()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid token")))?;

        let user = Self::find_by_email(db, email)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!("User not found")))?;

        Ok(user.into())
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password, full_name, google_id, is_active, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Issues a default-lifetime credential whose subject is the user's email.
    pub fn issue_for(tokens: &TokenCore, user: &User) -> Result<TokenResponse, AppError> {
        let access_token = tokens.issue(&Claims::with_subject(user.email.as_str()), None)?;
        track_credential_issued();

        Ok(TokenResponse::bearer(access_token, user.id, user.email.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
        assert_eq!(normalize_email("plain@example.com"), "plain@example.com");
    }
}
