use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Record;

pub const DEFAULT_FRIENDSHIP_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created: DateTime<Utc>,
    pub user_id: String,
}

impl Record for Post {
    const KIND: &'static str = "Post";

    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub post_id: String,
    pub user_id: String,
}

impl Record for Comment {
    const KIND: &'static str = "Comment";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A directed friend request from `user_id` to `friend_id`. Status is free
/// text; "pending" and "accepted" are the values clients use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: String,
    pub user_id: String,
    pub friend_id: String,
    pub status: String,
    pub created: DateTime<Utc>,
}

impl Record for Friendship {
    const KIND: &'static str = "Friendship";

    fn key(&self) -> &str {
        &self.id
    }
}
