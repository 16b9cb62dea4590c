//! # Warden Models
//!
//! Domain models and request/response DTOs for the Warden auth service.
//!
//! - [`users`]: The stored user record and its public profile
//! - [`auth`]: Signup, login, token and OAuth payloads

pub mod auth;
pub mod users;

pub use auth::{
    GoogleAuthUrlResponse, GoogleCallbackQuery, GoogleUserInfo, LoginRequest, SignupRequest,
    TOKEN_TYPE_BEARER, TokenResponse, VerifyResponse,
};
pub use users::{User, UserProfile};
