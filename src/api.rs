use rocket::FromForm;
use rocket::State;
use rocket::http::Status;
use rocket::serde::{Deserialize, Serialize, json::Json};
use serde_json::{Value, json};
use validator::Validate;

use crate::auth::{Authorization, User};
use crate::config::AppConfig;
use crate::database::Store;
use crate::db::{
    authenticate_user, create_comment, create_friendship, create_post, create_user,
    create_user_session, find_posts, get_all_users, get_comment, get_comments_for_post,
    get_friendships_for_user, get_post, get_user, invalidate_session, recommend_friends,
    reset_store, update_friendship_status,
};
use crate::error::AppError;
use crate::models::{Comment, Friendship, Post};
use crate::validation::{JsonValidateExt, USERNAME_PATTERN, validate_avatar};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub created: String,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar: user.avatar,
            created: user.created.to_rfc3339(),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 32, message = "Username must be 1 to 32 characters"),
        regex(path = *USERNAME_PATTERN, message = "Username must not contain whitespace")
    )]
    username: String,
    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    password: String,
    #[validate(custom(function = "validate_avatar"))]
    avatar: Option<String>,
}

#[post("/users", data = "<payload>")]
pub async fn api_create_user(
    payload: Json<CreateUserRequest>,
    store: &State<Store>,
    config: &State<AppConfig>,
) -> Result<Json<UserData>, AppError> {
    let validated = payload.validated()?;

    let user = create_user(
        store,
        &validated.username,
        &validated.password,
        validated.avatar.as_deref().unwrap_or_default(),
        config.password_hash_cost,
    )
    .await?;

    Ok(Json(UserData::from(user)))
}

#[get("/users")]
pub async fn api_get_users(store: &State<Store>) -> Json<Vec<UserData>> {
    let users = get_all_users(store).await;
    Json(users.into_iter().map(UserData::from).collect())
}

#[get("/users/<id>")]
pub async fn api_get_user(id: &str, store: &State<Store>) -> Result<Json<UserData>, AppError> {
    let user = get_user(store, id).await?;
    Ok(Json(UserData::from(user)))
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[post("/login", data = "<login>")]
pub async fn api_login(
    login: Json<LoginRequest>,
    store: &State<Store>,
) -> Result<Json<LoginResponse>, AppError> {
    let validated = login.validated()?;

    let user = authenticate_user(store, &validated.username, &validated.password).await?;
    let session = create_user_session(store, &user).await;

    Ok(Json(LoginResponse {
        token: session.token,
    }))
}

#[post("/logout")]
pub async fn api_logout(
    _user: User,
    authorization: Authorization,
    store: &State<Store>,
) -> Status {
    invalidate_session(store, &authorization.0).await;
    Status::NoContent
}

#[get("/me")]
pub async fn api_me(user: User) -> Json<UserData> {
    Json(UserData::from(user))
}

#[derive(FromForm)]
pub struct PostsQueryParams {
    title: Option<String>,
    #[field(name = "userId")]
    user_id: Option<String>,
}

#[get("/posts?<params..>")]
pub async fn api_get_posts(params: PostsQueryParams, store: &State<Store>) -> Json<Vec<Post>> {
    Json(find_posts(store, params.title.as_deref(), params.user_id.as_deref()).await)
}

#[get("/posts/<id>")]
pub async fn api_get_post(id: &str, store: &State<Store>) -> Result<Json<Post>, AppError> {
    Ok(Json(get_post(store, id).await?))
}

#[derive(Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    content: String,
    #[validate(url(message = "Image must be a URL"))]
    image: Option<String>,
}

#[post("/posts", data = "<payload>")]
pub async fn api_create_post(
    payload: Json<CreatePostRequest>,
    user: User,
    store: &State<Store>,
) -> Result<Json<Post>, AppError> {
    let validated = payload.validated()?;

    let post = create_post(
        store,
        &user.id,
        &validated.title,
        &validated.content,
        validated.image.as_deref(),
    )
    .await;

    Ok(Json(post))
}

// Any author field a client sends is ignored; ownership comes from the session.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    content: String,
    #[validate(length(min = 1, message = "Post id is required"))]
    post_id: String,
}

#[post("/comments", data = "<payload>")]
pub async fn api_create_comment(
    payload: Json<CreateCommentRequest>,
    user: User,
    store: &State<Store>,
) -> Result<Json<Comment>, AppError> {
    let validated = payload.validated()?;

    let comment = create_comment(store, &user.id, &validated.post_id, &validated.content).await;

    Ok(Json(comment))
}

#[derive(FromForm)]
pub struct CommentsQueryParams {
    #[field(name = "postId")]
    post_id: String,
}

#[get("/comments?<params..>")]
pub async fn api_get_comments(
    params: CommentsQueryParams,
    store: &State<Store>,
) -> Json<Vec<Comment>> {
    Json(get_comments_for_post(store, &params.post_id).await)
}

#[get("/comments/<id>")]
pub async fn api_get_comment(id: &str, store: &State<Store>) -> Result<Json<Comment>, AppError> {
    Ok(Json(get_comment(store, id).await?))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFriendshipRequest {
    #[validate(length(min = 1, message = "Friend id is required"))]
    friend_id: String,
}

#[post("/friendships", data = "<payload>")]
pub async fn api_create_friendship(
    payload: Json<CreateFriendshipRequest>,
    user: User,
    store: &State<Store>,
) -> Result<Json<Friendship>, AppError> {
    let validated = payload.validated()?;

    let friendship = create_friendship(store, &user.id, &validated.friend_id).await;

    Ok(Json(friendship))
}

#[derive(FromForm)]
pub struct FriendshipsQueryParams {
    #[field(name = "userId")]
    user_id: String,
}

#[get("/friendships?<params..>")]
pub async fn api_get_friendships(
    params: FriendshipsQueryParams,
    store: &State<Store>,
) -> Json<Vec<Friendship>> {
    Json(get_friendships_for_user(store, &params.user_id).await)
}

#[derive(Deserialize, Validate)]
pub struct UpdateFriendshipRequest {
    #[validate(length(min = 1, max = 32, message = "Status must be 1 to 32 characters"))]
    status: String,
}

async fn update_friendship(
    id: &str,
    payload: Json<UpdateFriendshipRequest>,
    user: User,
    store: &Store,
) -> Result<Json<Friendship>, AppError> {
    let validated = payload.validated()?;

    let friendship = update_friendship_status(store, id, &user.id, &validated.status).await?;

    Ok(Json(friendship))
}

#[put("/friendships/<id>", data = "<payload>")]
pub async fn api_put_friendship(
    id: &str,
    payload: Json<UpdateFriendshipRequest>,
    user: User,
    store: &State<Store>,
) -> Result<Json<Friendship>, AppError> {
    update_friendship(id, payload, user, store).await
}

#[post("/friendships/<id>", data = "<payload>")]
pub async fn api_post_friendship(
    id: &str,
    payload: Json<UpdateFriendshipRequest>,
    user: User,
    store: &State<Store>,
) -> Result<Json<Friendship>, AppError> {
    update_friendship(id, payload, user, store).await
}

#[get("/friendships/recommendations")]
pub async fn api_get_recommendations(user: User, store: &State<Store>) -> Json<Vec<UserData>> {
    let recommendations = recommend_friends(store, &user).await;
    Json(recommendations.into_iter().map(UserData::from).collect())
}

#[get("/reset")]
pub async fn api_reset(store: &State<Store>) -> Json<Value> {
    reset_store(store).await;
    Json(json!({}))
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
