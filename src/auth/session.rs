use chrono::{DateTime, Utc};

use crate::database::Record;
use crate::ids::generate_id;

use super::User;

/// A login. Holds its own copy of the user as it was at login time.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub token: String,
    pub user: User,
    pub created: DateTime<Utc>,
}

impl Record for UserSession {
    const KIND: &'static str = "Session";

    fn key(&self) -> &str {
        &self.token
    }
}

impl UserSession {
    pub fn new(user: User) -> Self {
        Self {
            token: Self::generate_token(),
            user,
            created: Utc::now(),
        }
    }

    pub fn generate_token() -> String {
        generate_id()
    }
}

/// Accepts both `Bearer <token>` and a bare token.
pub fn strip_bearer(authorization: &str) -> &str {
    authorization
        .strip_prefix("Bearer ")
        .unwrap_or(authorization)
}
