use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use warden_auth::TokenCore;
use warden_config::{CorsConfig, GoogleOAuthConfig, JwtConfig};
use warden_core::{BcryptHasher, PasswordHasher};

use crate::modules::auth::google::GoogleOAuthClient;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub tokens: Arc<TokenCore>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub google: Arc<GoogleOAuthClient>,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Fails when the credential lifetime is unusable or the outbound HTTP
    /// client cannot be built.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        google_config: GoogleOAuthConfig,
        cors_config: CorsConfig,
    ) -> anyhow::Result<Self> {
        let tokens = TokenCore::from_config(&jwt_config)?;
        info!(
            algorithm = ?tokens.algorithm(),
            ttl_seconds = tokens.default_ttl().num_seconds(),
            "Credential signing configured"
        );

        Ok(Self {
            db,
            jwt_config,
            tokens: Arc::new(tokens),
            password_hasher: Arc::new(BcryptHasher::default()),
            google: Arc::new(GoogleOAuthClient::new(google_config)?),
            cors_config,
        })
    }

    pub fn with_password_hasher(mut self, hasher: impl PasswordHasher + 'static) -> Self {
        self.password_hasher = Arc::new(hasher);
        self
    }
}

/// Loads configuration, connects to the database and applies migrations.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development placeholder secret");
    }

    let google_config = GoogleOAuthConfig::from_env();
    if !google_config.is_configured() {
        warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set; Google sign-in will fail");
    }

    let db = warden_db::init_db_pool().await?;
    warden_db::run_migrations(&db).await?;

    AppState::new(db, jwt_config, google_config, CorsConfig::from_env())
}
