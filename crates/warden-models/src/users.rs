use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Row of the `users` table.
///
/// `hashed_password` is absent for accounts created through Google sign-in.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: Option<String>,
    pub full_name: String,
    pub google_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, returned by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_omits_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            hashed_password: Some("$2b$04$hash".to_string()),
            full_name: "Test User".to_string(),
            google_id: Some("google-123".to_string()),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let serialized = serde_json::to_string(&UserProfile::from(user)).unwrap();

        assert!(serialized.contains(r#""email":"test@example.com""#));
        assert!(serialized.contains(r#""full_name":"Test User""#));
        assert!(!serialized.contains("hash"));
        assert!(!serialized.contains("google-123"));
    }
}
