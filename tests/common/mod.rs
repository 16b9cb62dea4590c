use axum::body::Body;
use axum::extract::Form;
use axum::http::{HeaderMap, Request, Response, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use warden::router::init_router;
use warden::state::AppState;
use warden_auth::TokenCore;
use warden_config::{CorsConfig, GoogleOAuthConfig, JwtConfig};
use warden_core::{BcryptHasher, PasswordHasher};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Lowest bcrypt cost, to keep the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

/// Core sharing the app's key, for minting credentials in tests.
#[allow(dead_code)]
pub fn test_token_core() -> TokenCore {
    TokenCore::from_config(&test_jwt_config()).unwrap()
}

/// Google endpoints point at a closed local port so no test reaches the network.
pub fn test_google_config() -> GoogleOAuthConfig {
    let mut config = GoogleOAuthConfig::from_lookup(|key| match key {
        "GOOGLE_CLIENT_ID" => Some("test-client-id".to_string()),
        "GOOGLE_CLIENT_SECRET" => Some("test-client-secret".to_string()),
        _ => None,
    });
    config.token_url = "http://127.0.0.1:9/token".to_string();
    config.userinfo_url = "http://127.0.0.1:9/userinfo".to_string();
    config
}

const STUB_ACCESS_TOKEN: &str = "stub-google-access-token";

/// Serves Google's token and userinfo endpoints on an ephemeral local port.
/// Any non-empty authorization code is exchanged for a fixed access token,
/// and that token returns `userinfo`. Returns a config pointing at the stub.
pub async fn spawn_google_stub(userinfo: serde_json::Value) -> GoogleOAuthConfig {
    let app = Router::new()
        .route(
            "/token",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                let field = |name: &str| form.get(name).map(String::as_str).unwrap_or_default();
                let valid = field("grant_type") == "authorization_code"
                    && !field("code").is_empty()
                    && field("client_id") == "test-client-id";
                if !valid {
                    return Err(StatusCode::BAD_REQUEST);
                }
                Ok(Json(serde_json::json!({
                    "access_token": STUB_ACCESS_TOKEN,
                    "token_type": "Bearer",
                    "expires_in": 3599
                })))
            }),
        )
        .route(
            "/userinfo",
            get(move |headers: HeaderMap| async move {
                let expected = format!("Bearer {}", STUB_ACCESS_TOKEN);
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some(value) if value == expected => Ok(Json(userinfo)),
                    _ => Err(StatusCode::UNAUTHORIZED),
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = test_google_config();
    config.token_url = format!("http://{}/token", address);
    config.userinfo_url = format!("http://{}/userinfo", address);
    config
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_google(pool, test_google_config())
}

pub fn setup_test_app_with_google(pool: PgPool, google_config: GoogleOAuthConfig) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        google_config,
        CorsConfig::from_lookup(|_| None),
    )
    .unwrap()
    .with_password_hasher(BcryptHasher::new(TEST_BCRYPT_COST));

    init_router(state)
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> TestUser {
    let hashed = BcryptHasher::new(TEST_BCRYPT_COST).hash(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (email, hashed_password, full_name) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind("Test User")
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
