use anyhow::anyhow;
use axum::Json;
use axum::extract::{Query, State, rejection::QueryRejection};
use tracing::{instrument, warn};
use utoipa::ToSchema;
use warden_core::AppError;
use warden_models::{
    GoogleAuthUrlResponse, GoogleCallbackQuery, LoginRequest, SignupRequest, TokenResponse,
    UserProfile, VerifyResponse,
};

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register with email and password
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered and signed in", body = TokenResponse),
        (status = 400, description = "Email already registered or malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::signup(&state, dto).await?;
    Ok(Json(response))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse),
        (status = 403, description = "Inactive user", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login(&state, dto).await?;
    Ok(Json(response))
}

/// Start Google sign-in
#[utoipa::path(
    get,
    path = "/auth/google",
    responses(
        (status = 200, description = "Google authorization URL", body = GoogleAuthUrlResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "OAuth"
)]
#[instrument(skip(state))]
pub async fn google_auth_url(
    State(state): State<AppState>,
) -> Result<Json<GoogleAuthUrlResponse>, AppError> {
    if !state.google.config().is_configured() {
        warn!("Google sign-in requested but the OAuth client is not configured");
    }

    let auth_url = state.google.authorization_url()?;
    Ok(Json(GoogleAuthUrlResponse {
        auth_url: auth_url.to_string(),
    }))
}

/// Complete Google sign-in
#[utoipa::path(
    get,
    path = "/auth/google/callback",
    params(GoogleCallbackQuery),
    responses(
        (status = 200, description = "Signed in with Google", body = TokenResponse),
        (status = 400, description = "Missing code or Google authentication failed", body = ErrorResponse)
    ),
    tag = "OAuth"
)]
#[instrument(skip(state, query))]
pub async fn google_callback(
    State(state): State<AppState>,
    query: Result<Query<GoogleCallbackQuery>, QueryRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::bad_request(anyhow!(
            "Google authentication failed: {}",
            rejection.body_text()
        ))
    })?;

    let response = AuthService::google_login(&state, &query.code)
        .await
        .map_err(|e| {
            warn!(error = %e.message(), "Google sign-in failed");
            AppError::bad_request(anyhow!("Google authentication failed: {}", e.message()))
        })?;

    Ok(Json(response))
}

/// Get the signed-in user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Invalid token or user not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = AuthService::current_user(&state.db, auth_user.claims()).await?;
    Ok(Json(profile))
}

/// Check that a bearer credential is valid
#[utoipa::path(
    get,
    path = "/auth/verify",
    responses(
        (status = 200, description = "Credential is valid", body = VerifyResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(auth_user))]
pub async fn verify_access_token(auth_user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user_email: auth_user.subject().map(str::to_string),
    })
}
