//! WebSocket Connection Management - Gestione connessioni WebSocket

use crate::core::{AppError, AppState};
use crate::dtos::{MessageDTO, WsEventDTO};
use crate::pod::{Participant, PodError, identity, messaging};
use crate::ws::subscription::Subscription;
use crate::ws::{RATE_LIMITER_MILLIS, TIMEOUT_DURATION_SECONDS};
use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{Duration, interval, timeout};
use tracing::{debug, error, info, instrument, warn};

/// Segnali dal task di lettura a quello di scrittura
#[derive(Debug)]
pub enum InternalSignal {
    Shutdown,
    Error(WsEventDTO),
}

#[instrument(skip(ws, state, participant), fields(chat_id = participant.chat_id(), link_id = ?participant.link_id()))]
pub async fn handle_socket(ws: WebSocket, state: Arc<AppState>, participant: Participant) {
    info!("WebSocket connection established");

    // subscribe before anything else: the client fetches history afterwards
    // and de-duplicates by message_id
    let subscription = state.chats_online.subscribe(participant.clone());

    // Dividiamo il WebSocket in due metà: sender e receiver
    let (ws_tx, ws_rx) = ws.split();

    // canale unbounded per comunicazione interna, per non perdere eventuali segnali
    let (int_tx, int_rx) = unbounded_channel::<InternalSignal>();

    let listen_task = tokio::spawn(listen_ws(participant, ws_rx, int_tx, state));
    write_ws(ws_tx, subscription, int_rx).await;

    // the subscription may end first (revoked link, links disabled)
    listen_task.abort();
    info!("WebSocket connection closed");
}

#[instrument(skip_all, fields(chat_id = subscription.viewer().chat_id()))]
pub async fn write_ws(
    mut websocket_tx: SplitSink<WebSocket, Message>,
    subscription: Subscription,
    mut internal_rx: UnboundedReceiver<InternalSignal>,
) {
    info!("Write task started");

    // dropping the stream at the end of the task is the unsubscribe
    let mut live = pin!(subscription.into_stream());

    loop {
        let event = tokio::select! {
            received = StreamExt::next(&mut live) => match received {
                Some(message) => WsEventDTO::NewMessage(MessageDTO::from(message.as_ref())),
                None => {
                    info!("Subscription ended");
                    break;
                }
            },
            signal = internal_rx.recv() => match signal {
                Some(InternalSignal::Error(event)) => event,
                Some(InternalSignal::Shutdown) | None => {
                    info!("Shutdown signal received");
                    break;
                }
            },
        };

        if send_event(&mut websocket_tx, &event).await.is_err() {
            warn!("Failed to write to socket, closing connection");
            break;
        }
    }

    let _ = websocket_tx.close().await;
    info!("Write task terminated");
}

async fn send_event(
    websocket_tx: &mut SplitSink<WebSocket, Message>,
    event: &WsEventDTO,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(event).map_err(|e| {
        error!("Failed to serialize event: {:?}", e);
        axum::Error::new(e)
    })?;
    websocket_tx.send(Message::Text(Utf8Bytes::from(json))).await
}

#[instrument(skip_all, fields(chat_id = participant.chat_id()))]
pub async fn listen_ws(
    participant: Participant,
    mut websocket_rx: SplitStream<WebSocket>,
    internal_tx: UnboundedSender<InternalSignal>,
    state: Arc<AppState>,
) {
    info!("Listen task started");

    let mut rate_limiter = interval(Duration::from_millis(RATE_LIMITER_MILLIS));
    let timeout_duration = Duration::from_secs(TIMEOUT_DURATION_SECONDS);

    loop {
        match timeout(timeout_duration, StreamExt::next(&mut websocket_rx)).await {
            Ok(Some(msg_result)) => {
                rate_limiter.tick().await;

                let msg = match msg_result {
                    Ok(m) => m,
                    Err(e) => {
                        warn!("WebSocket error: {:?}", e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        if let Some(err) = process_event(&state, &participant, &text).await {
                            let _ = internal_tx.send(InternalSignal::Error(err));
                        }
                    }
                    Message::Close(_) => {
                        info!("Close message received");
                        break;
                    }
                    _ => {}
                }
            }
            Ok(None) => {
                info!("WebSocket stream ended");
                break;
            }
            Err(_) => {
                warn!(timeout_secs = TIMEOUT_DURATION_SECONDS, "Connection timeout");
                break;
            }
        }
    }

    let _ = internal_tx.send(InternalSignal::Shutdown);
    info!("Listen task terminated");
}

/// Handles one inbound frame; returns the error event to report, if any.
///
/// The sender is re-resolved first, so a nickname changed after the upgrade
/// is the one stamped on the message. Accepted messages come back to this
/// client through its own subscription.
async fn process_event(state: &AppState, participant: &Participant, text: &str) -> Option<WsEventDTO> {
    let event = match serde_json::from_str::<WsEventDTO>(text) {
        Ok(event) => event,
        Err(e) => {
            warn!("Failed to deserialize event: {}", e);
            return Some(WsEventDTO::Error {
                code: 400,
                message: "Malformed event".to_string(),
            });
        }
    };

    match event {
        WsEventDTO::Send {
            content,
            recipient_link_id,
        } => match send(state, participant, &content, recipient_link_id).await {
            Ok(message) => {
                debug!(message_id = message.message_id, "Message sent over websocket");
                None
            }
            Err(e) => {
                let err = AppError::from(e);
                Some(WsEventDTO::Error {
                    code: err.status().as_u16(),
                    message: err.message().to_string(),
                })
            }
        },
        _ => {
            warn!("Unexpected event from client");
            Some(WsEventDTO::Error {
                code: 400,
                message: "Only Send events are accepted".to_string(),
            })
        }
    }
}

async fn send(
    state: &AppState,
    participant: &Participant,
    content: &str,
    recipient_link_id: Option<i32>,
) -> Result<crate::entities::Message, PodError> {
    let sender = identity::refresh(state, participant).await?;
    messaging::send(state, &sender, content, recipient_link_id).await
}
