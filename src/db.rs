use chrono::Utc;
use tracing::{info, instrument};

use crate::{
    auth::{User, UserSession, strip_bearer},
    database::Store,
    error::AppError,
    ids::generate_id,
    models::{Comment, DEFAULT_FRIENDSHIP_STATUS, Friendship, Post},
    recommendations::friends_of_friends,
};

#[instrument(skip(store))]
pub async fn reset_store(store: &Store) {
    info!("Resetting all repositories");
    store.write().await.reset();
}

#[instrument(skip_all, fields(username = %username))]
pub async fn create_user(
    store: &Store,
    username: &str,
    password: &str,
    avatar: &str,
    hash_cost: u32,
) -> Result<User, AppError> {
    info!("Creating new user");

    let password_hash = bcrypt::hash(password, hash_cost)?;

    let mut tables = store.write().await;

    if tables.users.find(|u| u.username == username).is_some() {
        return Err(AppError::Validation("Username already exists".to_string()));
    }

    let user = User {
        id: generate_id(),
        username: username.to_string(),
        password_hash,
        avatar: avatar.to_string(),
        created: Utc::now(),
    };

    tables.users.add(user.clone());

    Ok(user)
}

#[instrument(skip(store))]
pub async fn get_user(store: &Store, id: &str) -> Result<User, AppError> {
    info!("Fetching user by ID");
    store.read().await.users.get(id).cloned()
}

#[instrument(skip(store))]
pub async fn find_user_by_username(store: &Store, username: &str) -> Option<User> {
    store
        .read()
        .await
        .users
        .find(|u| u.username == username)
        .cloned()
}

#[instrument(skip(store))]
pub async fn get_all_users(store: &Store) -> Vec<User> {
    store.read().await.users.all().to_vec()
}

#[instrument(skip_all, fields(username = %username))]
pub async fn authenticate_user(
    store: &Store,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    info!("Authenticating user");

    let user = find_user_by_username(store, username)
        .await
        .ok_or_else(|| AppError::Validation("User not found".to_string()))?;

    if !user.verify_password(password) {
        return Err(AppError::Validation("Invalid password".to_string()));
    }

    Ok(user)
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_user_session(store: &Store, user: &User) -> UserSession {
    info!("Creating user session");

    let session = UserSession::new(user.clone());
    store.write().await.sessions.add(session.clone());

    session
}

/// Resolves a raw `Authorization` value to the session it names.
#[instrument(skip_all)]
pub async fn get_session_by_token(
    store: &Store,
    authorization: &str,
) -> Result<UserSession, AppError> {
    let token = strip_bearer(authorization);

    store
        .read()
        .await
        .sessions
        .get(token)
        .cloned()
        .map_err(|_| AppError::Authentication("Invalid session token".to_string()))
}

#[instrument(skip_all)]
pub async fn invalidate_session(store: &Store, authorization: &str) -> bool {
    info!("Invalidating session");
    store
        .write()
        .await
        .sessions
        .delete(strip_bearer(authorization))
}

#[instrument(skip(store, content))]
pub async fn create_post(
    store: &Store,
    user_id: &str,
    title: &str,
    content: &str,
    image: Option<&str>,
) -> Post {
    info!("Creating post");

    let post = Post {
        id: generate_id(),
        title: title.to_string(),
        content: content.to_string(),
        image: image.map(String::from),
        created: Utc::now(),
        user_id: user_id.to_string(),
    };

    store.write().await.posts.add(post.clone());

    post
}

#[instrument(skip(store))]
pub async fn get_post(store: &Store, id: &str) -> Result<Post, AppError> {
    store.read().await.posts.get(id).cloned()
}

/// Empty filters match everything, so `?title=` behaves like no title filter.
#[instrument(skip(store))]
pub async fn find_posts(store: &Store, title: Option<&str>, user_id: Option<&str>) -> Vec<Post> {
    let title = title.filter(|t| !t.is_empty());
    let user_id = user_id.filter(|u| !u.is_empty());

    store
        .read()
        .await
        .posts
        .filter(|post| {
            title.is_none_or(|t| post.title.contains(t))
                && user_id.is_none_or(|u| post.user_id == u)
        })
        .into_iter()
        .cloned()
        .collect()
}

#[instrument(skip(store, content))]
pub async fn create_comment(store: &Store, user_id: &str, post_id: &str, content: &str) -> Comment {
    info!("Creating comment");

    let comment = Comment {
        id: generate_id(),
        content: content.to_string(),
        created: Utc::now(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
    };

    store.write().await.comments.add(comment.clone());

    comment
}

#[instrument(skip(store))]
pub async fn get_comment(store: &Store, id: &str) -> Result<Comment, AppError> {
    store.read().await.comments.get(id).cloned()
}

#[instrument(skip(store))]
pub async fn get_comments_for_post(store: &Store, post_id: &str) -> Vec<Comment> {
    store
        .read()
        .await
        .comments
        .filter(|c| c.post_id == post_id)
        .into_iter()
        .cloned()
        .collect()
}

#[instrument(skip(store))]
pub async fn create_friendship(store: &Store, user_id: &str, friend_id: &str) -> Friendship {
    info!("Creating friendship");

    let friendship = Friendship {
        id: generate_id(),
        user_id: user_id.to_string(),
        friend_id: friend_id.to_string(),
        status: DEFAULT_FRIENDSHIP_STATUS.to_string(),
        created: Utc::now(),
    };

    store.write().await.friendships.add(friendship.clone());

    friendship
}

#[instrument(skip(store))]
pub async fn get_friendships_for_user(store: &Store, user_id: &str) -> Vec<Friendship> {
    store
        .read()
        .await
        .friendships
        .filter(|f| f.user_id == user_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Only the receiving side of a request may change its status.
#[instrument(skip(store))]
pub async fn update_friendship_status(
    store: &Store,
    id: &str,
    acting_user_id: &str,
    status: &str,
) -> Result<Friendship, AppError> {
    info!("Updating friendship status");

    let mut tables = store.write().await;
    let friendship = tables.friendships.get_mut(id)?;

    if friendship.friend_id != acting_user_id {
        return Err(AppError::Authorization(
            "Only the requested user can update this friendship".to_string(),
        ));
    }

    friendship.status = status.to_string();

    Ok(friendship.clone())
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn recommend_friends(store: &Store, user: &User) -> Vec<User> {
    info!("Computing friend recommendations");

    let tables = store.read().await;

    friends_of_friends(user, tables.users.all(), tables.friendships.all())
        .into_iter()
        .cloned()
        .collect()
}
