//! Integration tests per auth moderatore e join tramite link

mod common;

#[cfg(test)]
mod join_tests {
    use super::common::*;
    use serde_json::{Value, json};

    // ============================================================
    // POST /auth/moderator
    // ============================================================

    #[tokio::test]
    async fn test_moderator_login() {
        let (server, _state, _) = setup().await;

        let response = server
            .post("/auth/moderator")
            .json(&json!({ "password": TEST_MODERATOR_PASSWORD }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let token = body["token"].as_str().unwrap().to_string();

        // il token ottenuto apre le route del moderatore
        server
            .post("/projects")
            .add_header(bearer(), format!("Bearer {}", token))
            .json(&json!({ "name": "P" }))
            .await
            .assert_status(axum_test::http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_moderator_login_wrong_password() {
        let (server, _state, _) = setup().await;
        server
            .post("/auth/moderator")
            .json(&json!({ "password": "nope" }))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_moderator_routes_require_bearer() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "respondent").await;

        server
            .get(&format!("/chats/{}/links", chat_id))
            .await
            .assert_status_unauthorized();
        // un link token non apre le route del moderatore
        server
            .get(&format!("/chats/{}/links", chat_id))
            .add_header(link_token_header(), link["token"].as_str().unwrap().to_string())
            .await
            .assert_status_unauthorized();
        server
            .get(&format!("/chats/{}/links", chat_id))
            .add_header(bearer(), "Bearer not.a.jwt")
            .await
            .assert_status_unauthorized();
    }

    // ============================================================
    // POST /chats/{chat_id}/join
    // ============================================================

    #[tokio::test]
    async fn test_join_with_valid_token() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "respondent").await;
        let token = link["token"].as_str().unwrap();

        let participant = join(&server, chat_id, token, "respondent", "Petr").await;
        assert_eq!(participant["role"], "respondent");
        assert_eq!(participant["nickname"], "Petr");
        assert_eq!(participant["link_id"], link["link_id"]);
        assert_eq!(participant["multi"], false);
    }

    #[tokio::test]
    async fn test_join_with_bad_token_is_not_found() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;

        server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({ "token": "badtoken", "role": "respondent", "nickname": "X" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_join_with_wrong_role_is_forbidden() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "client").await;

        server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({ "token": link["token"], "role": "respondent", "nickname": "X" }))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_join_other_chat_is_forbidden() {
        let (server, _state, jwt) = setup().await;
        let chat_a = create_chat(&server, &jwt).await;
        let chat_b = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_a, "respondent").await;

        server
            .post(&format!("/chats/{}/join", chat_b))
            .json(&json!({ "token": link["token"], "nickname": "X" }))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_join_respondent_requires_nickname() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "respondent").await;

        server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({ "token": link["token"], "role": "respondent" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_join_shared_client_link_without_nickname() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "client").await;
        assert_eq!(link["multi"], true);

        let response = server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({ "token": link["token"], "role": "client" }))
            .await;
        response.assert_status_ok();
        let participant: Value = response.json();
        assert_eq!(participant["role"], "client");
    }

    #[tokio::test]
    async fn test_links_disabled_blocks_participants_not_moderator() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "respondent").await;
        let token = link["token"].as_str().unwrap().to_string();

        server
            .patch(&format!("/chats/{}/links_disabled", chat_id))
            .add_header(bearer(), format!("Bearer {}", jwt))
            .json(&json!({ "links_disabled": true }))
            .await
            .assert_status_ok();

        server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({ "token": token, "role": "respondent", "nickname": "Petr" }))
            .await
            .assert_status_forbidden();
        // anche le richieste successive con il token vengono rifiutate
        server
            .get(&format!("/chats/{}/messages", chat_id))
            .add_header(link_token_header(), token.clone())
            .await
            .assert_status_forbidden();

        let response = server
            .post(&format!("/chats/{}/join", chat_id))
            .add_header(bearer(), format!("Bearer {}", jwt))
            .json(&json!({}))
            .await;
        response.assert_status_ok();
        let participant: Value = response.json();
        assert_eq!(participant["role"], "moderator");
        assert_eq!(participant["link_id"], Value::Null);
    }

    #[tokio::test]
    async fn test_tokenless_join_requires_moderator() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;

        server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({ "role": "respondent" }))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_join_records_consent() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "respondent").await;

        server
            .post(&format!("/chats/{}/join", chat_id))
            .json(&json!({
                "token": link["token"],
                "role": "respondent",
                "nickname": "Petr",
                "consent": { "agreed_dpa": true, "agreed_study": true }
            }))
            .await
            .assert_status_ok();

        let response = server
            .get(&format!("/links/{}/consents", link["link_id"]))
            .add_header(bearer(), format!("Bearer {}", jwt))
            .await;
        response.assert_status_ok();
        let consents: Vec<Value> = response.json();
        assert_eq!(consents.len(), 1);
        assert_eq!(consents[0]["nickname"], "Petr");
        assert_eq!(consents[0]["agreed_study"], true);
    }

    #[tokio::test]
    async fn test_join_by_url() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "client").await;

        let response = server
            .post("/join")
            .json(&json!({ "url": link["join_url"], "nickname": "Team" }))
            .await;
        response.assert_status_ok();
        let participant: Value = response.json();
        assert_eq!(participant["chat_id"], chat_id);
        assert_eq!(participant["role"], "client");
        assert_eq!(participant["link_id"], link["link_id"]);

        server
            .post("/join")
            .json(&json!({ "url": "https://pods.example.org/join?type=client" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_join_by_url_with_encoded_values() {
        let (server, _state, jwt) = setup().await;
        let chat_id = create_chat(&server, &jwt).await;
        let link = create_link(&server, &jwt, chat_id, "respondent").await;
        let token = link["token"].as_str().unwrap();

        // every character of the token percent-encoded
        let encoded: String = token.bytes().map(|b| format!("%{:02X}", b)).collect();
        let url = format!("https://pods.example.org/join?type=respondent&chat={}&l={}", chat_id, encoded);

        let response = server
            .post("/join")
            .json(&json!({ "url": url, "nickname": "Petr" }))
            .await;
        response.assert_status_ok();
        let participant: Value = response.json();
        assert_eq!(participant["link_id"], link["link_id"]);
        assert_eq!(participant["nickname"], "Petr");
    }
}
