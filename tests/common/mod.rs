#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::http::HeaderName;
use chatpod::core::{AppState, Config, database, encode_jwt};
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";
pub const TEST_MODERATOR_PASSWORD: &str = "moderatore-di-prova";

/// Crea un AppState per i test su un database SQLite in memoria
pub async fn create_test_state() -> Arc<AppState> {
    let pool = database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    let config = Config {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        moderator_password: TEST_MODERATOR_PASSWORD.to_string(),
        public_base_url: "https://pods.example.org".to_string(),
        ..Config::default()
    };
    Arc::new(AppState::new(pool, &config))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = chatpod::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// JWT del moderatore valido per 24 ore
pub fn moderator_jwt() -> String {
    encode_jwt("moderator", TEST_JWT_SECRET).expect("Failed to create JWT token")
}

pub fn bearer() -> HeaderName {
    HeaderName::from_static("authorization")
}

pub fn link_token_header() -> HeaderName {
    HeaderName::from_static("x-link-token")
}

/// Server, stato e token del moderatore pronti all'uso
pub async fn setup() -> (TestServer, Arc<AppState>, String) {
    let state = create_test_state().await;
    let server = create_test_server(state.clone());
    (server, state, moderator_jwt())
}

/// Crea progetto e chat window via HTTP; ritorna il chat_id
pub async fn create_chat(server: &TestServer, jwt: &str) -> i32 {
    let project: Value = server
        .post("/projects")
        .add_header(bearer(), format!("Bearer {}", jwt))
        .json(&json!({ "name": "Usability study" }))
        .await
        .json();
    let project_id = project["project_id"].as_i64().expect("project_id");

    let chat: Value = server
        .post(&format!("/projects/{}/chats", project_id))
        .add_header(bearer(), format!("Bearer {}", jwt))
        .json(&json!({ "title": "Session A" }))
        .await
        .json();
    chat["chat_id"].as_i64().expect("chat_id") as i32
}

/// Crea un link via HTTP e ritorna il LinkDTO
pub async fn create_link(server: &TestServer, jwt: &str, chat_id: i32, role: &str) -> Value {
    let response = server
        .post(&format!("/chats/{}/links", chat_id))
        .add_header(bearer(), format!("Bearer {}", jwt))
        .json(&json!({ "role": role, "internal_name": format!("{} link", role) }))
        .await;
    response.assert_status(axum_test::http::StatusCode::CREATED);
    response.json()
}

/// Join con nickname; ritorna il ParticipantDTO
pub async fn join(server: &TestServer, chat_id: i32, token: &str, role: &str, nickname: &str) -> Value {
    let response = server
        .post(&format!("/chats/{}/join", chat_id))
        .json(&json!({ "token": token, "role": role, "nickname": nickname }))
        .await;
    response.assert_status_ok();
    response.json()
}

pub async fn moderator_send(server: &TestServer, jwt: &str, chat_id: i32, content: &str, recipient: Option<i64>) -> Value {
    let response = server
        .post(&format!("/chats/{}/messages", chat_id))
        .add_header(bearer(), format!("Bearer {}", jwt))
        .json(&json!({ "content": content, "recipient_link_id": recipient }))
        .await;
    response.assert_status(axum_test::http::StatusCode::CREATED);
    response.json()
}

pub async fn visible_contents(server: &TestServer, chat_id: i32, token: &str) -> Vec<String> {
    let response = server
        .get(&format!("/chats/{}/messages", chat_id))
        .add_header(link_token_header(), token.to_string())
        .await;
    response.assert_status_ok();
    let messages: Vec<Value> = response.json();
    messages
        .iter()
        .map(|m| m["content"].as_str().unwrap_or_default().to_string())
        .collect()
}
