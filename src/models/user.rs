//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID (also used as document ID)
    pub user_id: String,
    /// Email address (stored lowercased, unique)
    pub email: String,
    /// Display name
    pub user_name: String,
    /// Argon2 password hash (PHC string)
    pub password_hash: String,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub user_name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            user_name: user.user_name.clone(),
        }
    }
}
