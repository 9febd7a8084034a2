//! Integration tests per il fan-out realtime via WebSocket
//!
//! Il server gira su una porta TCP reale; i client usano tokio-tungstenite.

mod common;

#[cfg(test)]
mod ws_tests {
    use super::common::*;
    use chatpod::core::AppState;
    use chatpod::dtos::{CreateChatWindowDTO, CreateProjectDTO, WsEventDTO};
    use chatpod::entities::LinkRole;
    use chatpod::pod::{Participant, identity, messaging, registry};
    use chatpod::repositories::Create;
    use futures_util::{SinkExt, StreamExt};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::{TcpListener, TcpStream};
    use tokio::time::{Duration, sleep, timeout};
    use tokio_tungstenite::tungstenite::Message;
    use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

    type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn spawn_server(state: Arc<AppState>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = chatpod::create_router(state);
        tokio::spawn(async move { axum::serve(listener, app).await });
        addr
    }

    async fn new_chat(state: &AppState) -> i32 {
        let project = state
            .project
            .create(&CreateProjectDTO {
                name: "WS".to_string(),
                settings: None,
            })
            .await
            .unwrap();
        state
            .chat
            .create(&CreateChatWindowDTO {
                project_id: project.project_id,
                title: "Live".to_string(),
                scheduled_at: None,
            })
            .await
            .unwrap()
            .chat_id
    }

    async fn wait_for_viewers(state: &AppState, chat_id: i32, n: usize) {
        for _ in 0..100 {
            if state.chats_online.viewer_count(&chat_id) == n {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("viewers never reached {}", n);
    }

    async fn next_event(client: &mut Client) -> WsEventDTO {
        loop {
            let frame = timeout(Duration::from_secs(5), client.next())
                .await
                .expect("timed out waiting for frame")
                .expect("stream ended")
                .expect("websocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(&text).expect("invalid event");
            }
        }
    }

    #[tokio::test]
    async fn test_live_messages_follow_visibility() {
        let state = create_test_state().await;
        let chat_id = new_chat(&state).await;
        registry::create_link_with(&state, chat_id, LinkRole::Respondent, "A", false, || {
            "tokA".to_string()
        })
        .await
        .unwrap();
        let other = registry::create_link_with(&state, chat_id, LinkRole::Respondent, "B", false, || {
            "tokB".to_string()
        })
        .await
        .unwrap();
        let addr = spawn_server(state.clone()).await;

        let (mut client, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokA", addr, chat_id))
            .await
            .unwrap();
        wait_for_viewers(&state, chat_id, 1).await;

        let moderator = Participant::moderator(chat_id);
        messaging::send(&state, &moderator, "only for B", Some(other.link_id))
            .await
            .unwrap();
        messaging::send(&state, &moderator, "for everyone", None)
            .await
            .unwrap();

        match next_event(&mut client).await {
            WsEventDTO::NewMessage(m) => assert_eq!(m.content, "for everyone"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_over_websocket() {
        let state = create_test_state().await;
        let chat_id = new_chat(&state).await;
        let link = registry::create_link_with(&state, chat_id, LinkRole::Client, "", true, || {
            "tokC".to_string()
        })
        .await
        .unwrap();
        let addr = spawn_server(state.clone()).await;

        let (mut client, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokC", addr, chat_id))
            .await
            .unwrap();
        wait_for_viewers(&state, chat_id, 1).await;

        let send = serde_json::to_string(&WsEventDTO::Send {
            content: "ciao".to_string(),
            recipient_link_id: None,
        })
        .unwrap();
        client.send(Message::Text(send.into())).await.unwrap();

        match next_event(&mut client).await {
            WsEventDTO::NewMessage(m) => {
                assert_eq!(m.content, "ciao");
                assert_eq!(m.sender_name, "Client");
            }
            other => panic!("unexpected event {:?}", other),
        }

        // i participant non possono indirizzare messaggi privati
        let private = serde_json::to_string(&WsEventDTO::Send {
            content: "psst".to_string(),
            recipient_link_id: Some(link.link_id),
        })
        .unwrap();
        client.send(Message::Text(private.into())).await.unwrap();

        match next_event(&mut client).await {
            WsEventDTO::Error { code, .. } => assert_eq!(code, 403),
            other => panic!("unexpected event {:?}", other),
        }

        // il messaggio rifiutato non è stato salvato
        let history = messaging::list_visible(&state, chat_id, &Participant::moderator(chat_id))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    /// Waits for the server to close the socket; no message may arrive first.
    async fn expect_closed(client: &mut Client) {
        loop {
            let frame = timeout(Duration::from_secs(5), client.next())
                .await
                .expect("socket was not closed");
            match frame {
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => return,
                Some(Ok(Message::Text(text))) => panic!("unexpected frame {}", text),
                Some(Ok(_)) => {}
            }
        }
    }

    #[tokio::test]
    async fn test_revoked_link_is_disconnected() {
        let state = create_test_state().await;
        let chat_id = new_chat(&state).await;
        let revoked = registry::create_link_with(&state, chat_id, LinkRole::Respondent, "", false, || {
            "tokR".to_string()
        })
        .await
        .unwrap();
        registry::create_link_with(&state, chat_id, LinkRole::Respondent, "", false, || {
            "tokK".to_string()
        })
        .await
        .unwrap();
        let addr = spawn_server(state.clone()).await;

        let (mut gone, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokR", addr, chat_id))
            .await
            .unwrap();
        let (mut kept, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokK", addr, chat_id))
            .await
            .unwrap();
        wait_for_viewers(&state, chat_id, 2).await;

        registry::revoke_link(&state, revoked.link_id).await.unwrap();
        messaging::send(&state, &Participant::moderator(chat_id), "after revoke", None)
            .await
            .unwrap();

        expect_closed(&mut gone).await;
        match next_event(&mut kept).await {
            WsEventDTO::NewMessage(m) => assert_eq!(m.content, "after revoke"),
            other => panic!("unexpected event {:?}", other),
        }
        wait_for_viewers(&state, chat_id, 1).await;
    }

    #[tokio::test]
    async fn test_kill_switch_disconnects_participants_only() {
        let (server, state, jwt) = setup().await;
        let chat_id = new_chat(&state).await;
        registry::create_link_with(&state, chat_id, LinkRole::Client, "", true, || {
            "tokS".to_string()
        })
        .await
        .unwrap();
        let addr = spawn_server(state.clone()).await;

        let (mut client, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokS", addr, chat_id))
            .await
            .unwrap();
        wait_for_viewers(&state, chat_id, 1).await;
        let mut moderator = state.chats_online.subscribe(Participant::moderator(chat_id));

        server
            .patch(&format!("/chats/{}/links_disabled", chat_id))
            .add_header(bearer(), format!("Bearer {}", jwt))
            .json(&serde_json::json!({ "links_disabled": true }))
            .await
            .assert_status_ok();

        expect_closed(&mut client).await;
        messaging::send(&state, &Participant::moderator(chat_id), "still here", None)
            .await
            .unwrap();
        assert_eq!(moderator.recv().await.unwrap().content, "still here");
    }

    #[tokio::test]
    async fn test_websocket_send_uses_current_nickname() {
        let state = create_test_state().await;
        let chat_id = new_chat(&state).await;
        registry::create_link_with(&state, chat_id, LinkRole::Respondent, "", false, || {
            "tokN".to_string()
        })
        .await
        .unwrap();
        identity::enter(&state, chat_id, Some("tokN"), None, Some("Petr"), None)
            .await
            .unwrap();
        let addr = spawn_server(state.clone()).await;

        let (mut client, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokN", addr, chat_id))
            .await
            .unwrap();
        wait_for_viewers(&state, chat_id, 1).await;

        identity::enter(&state, chat_id, Some("tokN"), None, Some("Pavel"), None)
            .await
            .unwrap();
        let send = serde_json::to_string(&WsEventDTO::Send {
            content: "renamed".to_string(),
            recipient_link_id: None,
        })
        .unwrap();
        client.send(Message::Text(send.into())).await.unwrap();

        match next_event(&mut client).await {
            WsEventDTO::NewMessage(m) => assert_eq!(m.sender_name, "Pavel"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upgrade_with_bad_token_is_refused() {
        let state = create_test_state().await;
        let chat_id = new_chat(&state).await;
        let addr = spawn_server(state.clone()).await;

        let result = connect_async(format!("ws://{}/chats/{}/ws?l=nope", addr, chat_id)).await;
        assert!(result.is_err());
        assert_eq!(state.chats_online.viewer_count(&chat_id), 0);
    }

    #[tokio::test]
    async fn test_disconnect_removes_viewer() {
        let state = create_test_state().await;
        let chat_id = new_chat(&state).await;
        registry::create_link_with(&state, chat_id, LinkRole::Respondent, "", false, || {
            "tokD".to_string()
        })
        .await
        .unwrap();
        let addr = spawn_server(state.clone()).await;

        let (mut client, _) = connect_async(format!("ws://{}/chats/{}/ws?l=tokD", addr, chat_id))
            .await
            .unwrap();
        wait_for_viewers(&state, chat_id, 1).await;

        client.close(None).await.unwrap();
        wait_for_viewers(&state, chat_id, 0).await;
    }
}
