use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::{User, UserSession};
use crate::models::{Comment, Friendship, Post};

use super::Repository;

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Repository<User>,
    pub sessions: Repository<UserSession>,
    pub posts: Repository<Post>,
    pub comments: Repository<Comment>,
    pub friendships: Repository<Friendship>,
}

impl Tables {
    pub fn reset(&mut self) {
        self.users.reset();
        self.sessions.reset();
        self.posts.reset();
        self.comments.reset();
        self.friendships.reset();
    }
}

/// All application state. Built once and handed to Rocket as managed state;
/// tests build their own.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
