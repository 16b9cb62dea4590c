use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use warden_models::{
    GoogleAuthUrlResponse, LoginRequest, SignupRequest, TokenResponse, UserProfile, VerifyResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::google_auth_url,
        crate::modules::auth::controller::google_callback,
        crate::modules::auth::controller::get_current_user,
        crate::modules::auth::controller::verify_access_token,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            TokenResponse,
            VerifyResponse,
            GoogleAuthUrlResponse,
            UserProfile,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and credential endpoints"),
        (name = "OAuth", description = "Google sign-in")
    ),
    info(
        title = "Warden API",
        version = "0.1.0",
        description = "Authentication service issuing signed, time-bounded bearer credentials.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
