#[cfg(test)]
pub mod test_utils {
    use crate::api::LoginResponse;
    use crate::config::AppConfig;
    use crate::database::Store;
    use crate::db::{create_friendship, create_post, create_user};
    use crate::error::AppError;
    use crate::init_rocket;
    use rocket::config::LogLevel;
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Once;

    static INIT: Once = Once::new();
    pub static STANDARD_PASSWORD: &str = "password123";
    pub const TEST_HASH_COST: u32 = 4;

    pub fn test_config() -> AppConfig {
        AppConfig {
            api_base: "/api".to_string(),
            password_hash_cost: TEST_HASH_COST,
        }
    }

    fn init_test_tracing() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    #[derive(Default)]
    pub struct TestStoreBuilder {
        users: Vec<TestUser>,
        friendships: Vec<(String, String)>,
        posts: Vec<TestPost>,
    }

    pub struct TestUser {
        pub username: String,
        pub password: String,
    }

    pub struct TestPost {
        pub author: String,
        pub title: String,
        pub content: String,
    }

    impl TestStoreBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn user(self, username: &str) -> Self {
            self.user_with_password(username, STANDARD_PASSWORD)
        }

        pub fn user_with_password(mut self, username: &str, password: &str) -> Self {
            self.users.push(TestUser {
                username: username.to_string(),
                password: password.to_string(),
            });
            self
        }

        /// A friendship requested by `from` towards `to`.
        pub fn friendship(mut self, from: &str, to: &str) -> Self {
            self.friendships.push((from.to_string(), to.to_string()));
            self
        }

        pub fn post(mut self, author: &str, title: &str, content: &str) -> Self {
            self.posts.push(TestPost {
                author: author.to_string(),
                title: title.to_string(),
                content: content.to_string(),
            });
            self
        }

        pub async fn build(self) -> Result<TestStore, AppError> {
            init_test_tracing();

            let store = Store::new();
            let mut user_id_map: HashMap<String, String> = HashMap::new();

            for user in &self.users {
                let created = create_user(
                    &store,
                    &user.username,
                    &user.password,
                    "",
                    TEST_HASH_COST,
                )
                .await?;

                user_id_map.insert(user.username.clone(), created.id);
            }

            let lookup = |username: &str| {
                user_id_map
                    .get(username)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Test user {}", username)))
            };

            for (from, to) in &self.friendships {
                create_friendship(&store, &lookup(from)?, &lookup(to)?).await;
            }

            for post in &self.posts {
                create_post(&store, &lookup(&post.author)?, &post.title, &post.content, None).await;
            }

            Ok(TestStore {
                store,
                user_id_map,
            })
        }
    }

    pub struct TestStore {
        pub store: Store,
        pub user_id_map: HashMap<String, String>,
    }

    impl TestStore {
        pub fn user_id(&self, username: &str) -> String {
            self.user_id_map
                .get(username)
                .cloned()
                .unwrap_or_else(|| panic!("Test user {} was never created", username))
        }
    }

    /// alice -> bob -> carol, plus dave with no friendships.
    pub async fn create_standard_test_store() -> TestStore {
        TestStoreBuilder::new()
            .user("alice")
            .user("bob")
            .user("carol")
            .user("dave")
            .friendship("alice", "bob")
            .friendship("bob", "carol")
            .post("alice", "Hello world", "First post")
            .post("bob", "Weekend plans", "Hiking")
            .build()
            .await
            .expect("Failed to build test store")
    }

    pub async fn setup_test_client(test_store: TestStore) -> (Client, HashMap<String, String>) {
        let figment = rocket::Config::figment().merge(("log_level", LogLevel::Off));

        let rocket = init_rocket(figment, test_store.store, test_config());

        let client = Client::tracked(rocket)
            .await
            .expect("Failed to build Rocket client");

        (client, test_store.user_id_map)
    }

    pub fn bearer(token: &str) -> Header<'static> {
        Header::new("Authorization", format!("Bearer {}", token))
    }

    pub async fn login_test_user(client: &Client, username: &str, password: &str) -> String {
        let response = client
            .post("/api/login")
            .header(ContentType::JSON)
            .body(
                json!({
                    "username": username,
                    "password": password
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok, "Login failed for {}", username);

        let body = response.into_string().await.expect("Empty login body");
        let login: LoginResponse = serde_json::from_str(&body).expect("Invalid login body");

        login.token
    }
}
