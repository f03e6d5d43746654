#[cfg(test)]
mod tests {
    use crate::api::UserData;
    use crate::models::Friendship;
    use crate::test::test_utils::{
        bearer, create_standard_test_store, login_test_user, setup_test_client,
    };
    use crate::validation::ValidationResponse;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::json;

    async fn request_friendship(client: &Client, token: &str, friend_id: &str) -> Friendship {
        let response = client
            .post("/api/friendships")
            .header(ContentType::JSON)
            .header(bearer(token))
            .body(json!({ "friendId": friend_id }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);

        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    #[rocket::async_test]
    async fn test_create_and_list_friendships() {
        let test_store = create_standard_test_store().await;
        let (client, users) = setup_test_client(test_store).await;

        let token = login_test_user(&client, "dave", "password123").await;

        let friendship = request_friendship(&client, &token, &users["alice"]).await;

        assert_eq!(friendship.user_id, users["dave"]);
        assert_eq!(friendship.friend_id, users["alice"]);
        assert_eq!(friendship.status, "pending");

        let response = client
            .get(format!("/api/friendships?userId={}", users["dave"]))
            .dispatch()
            .await;
        let listed: Vec<Friendship> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(listed, vec![friendship]);

        // Listing is by requester only; alice's list does not show dave's request.
        let response = client
            .get(format!("/api/friendships?userId={}", users["alice"]))
            .dispatch()
            .await;
        let listed: Vec<Friendship> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].friend_id, users["bob"]);
    }

    #[rocket::async_test]
    async fn test_recipient_can_accept() {
        let test_store = create_standard_test_store().await;
        let (client, users) = setup_test_client(test_store).await;

        let dave = login_test_user(&client, "dave", "password123").await;
        let alice = login_test_user(&client, "alice", "password123").await;

        let friendship = request_friendship(&client, &dave, &users["alice"]).await;

        let response = client
            .put(format!("/api/friendships/{}", friendship.id))
            .header(ContentType::JSON)
            .header(bearer(&alice))
            .body(json!({ "status": "accepted" }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);

        let updated: Friendship =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(updated.status, "accepted");
        assert_eq!(updated.id, friendship.id);

        let response = client
            .post(format!("/api/friendships/{}", friendship.id))
            .header(ContentType::JSON)
            .header(bearer(&alice))
            .body(json!({ "status": "blocked" }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok, "POST works like PUT");

        let updated: Friendship =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(updated.status, "blocked", "Status is free text");
    }

    #[rocket::async_test]
    async fn test_requester_cannot_accept_own_request() {
        let test_store = create_standard_test_store().await;
        let (client, users) = setup_test_client(test_store).await;

        let dave = login_test_user(&client, "dave", "password123").await;
        let carol = login_test_user(&client, "carol", "password123").await;

        let friendship = request_friendship(&client, &dave, &users["alice"]).await;

        for token in [&dave, &carol] {
            let response = client
                .put(format!("/api/friendships/{}", friendship.id))
                .header(ContentType::JSON)
                .header(bearer(token))
                .body(json!({ "status": "accepted" }).to_string())
                .dispatch()
                .await;

            assert_eq!(response.status(), Status::Unauthorized);

            let body: ValidationResponse =
                serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
            assert!(body.errors.contains_key("authorization"));
        }

        let response = client
            .get(format!("/api/friendships?userId={}", users["dave"]))
            .dispatch()
            .await;
        let listed: Vec<Friendship> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(listed[0].status, "pending");
    }

    #[rocket::async_test]
    async fn test_update_unknown_friendship_is_not_found() {
        let test_store = create_standard_test_store().await;
        let (client, _) = setup_test_client(test_store).await;

        let alice = login_test_user(&client, "alice", "password123").await;

        let response = client
            .put("/api/friendships/missing")
            .header(ContentType::JSON)
            .header(bearer(&alice))
            .body(json!({ "status": "accepted" }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn test_recommendations_api() {
        let test_store = create_standard_test_store().await;
        let (client, users) = setup_test_client(test_store).await;

        let alice = login_test_user(&client, "alice", "password123").await;

        let response = client
            .get("/api/friendships/recommendations")
            .header(bearer(&alice))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let recommended: Vec<UserData> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].id, users["carol"]);

        // Once alice asks carol directly, carol is no longer a suggestion.
        request_friendship(&client, &alice, &users["carol"]).await;

        let response = client
            .get("/api/friendships/recommendations")
            .header(bearer(&alice))
            .dispatch()
            .await;
        let recommended: Vec<UserData> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert!(recommended.is_empty());
    }
}
