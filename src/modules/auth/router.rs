use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    get_current_user, google_auth_url, google_callback, login, signup, verify_access_token,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/google", get(google_auth_url))
        .route("/google/callback", get(google_callback))
        .route("/me", get(get_current_user))
        .route("/verify", get(verify_access_token))
}
