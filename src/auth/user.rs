use chrono::{DateTime, Utc};

use crate::database::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub avatar: String,
    pub created: DateTime<Utc>,
}

impl Record for User {
    const KIND: &'static str = "User";

    fn key(&self) -> &str {
        &self.id
    }
}

impl User {
    pub fn verify_password(&self, password: &str) -> bool {
        match bcrypt::verify(password, &self.password_hash) {
            Ok(matches) => matches,
            Err(err) => {
                tracing::error!(user_id = %self.id, error = %err, "Stored password hash is unreadable");
                false
            }
        }
    }
}
