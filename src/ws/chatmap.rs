use crate::entities::Message;
use crate::pod::Participant;
use crate::ws::BROADCAST_CHANNEL_CAPACITY;
use crate::ws::subscription::Subscription;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast::{self, Sender};
use tracing::{debug, info, instrument};

/// What travels on a chat's channel.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Message(Arc<Message>),
    /// Viewers holding this link are cut off
    LinkRevoked(i32),
    /// Kill-switch turned on, every link viewer is cut off
    LinksDisabled,
}

/// Live channels of the chats that currently have at least one viewer.
pub struct ChatMap {
    /// Attribute to retrieve the tx head of a broadcast channel by chat_id field
    channels: DashMap<i32, Sender<ChatEvent>>,
}

impl ChatMap {
    pub fn new() -> Self {
        ChatMap {
            channels: DashMap::new(),
        }
    }

    /// Registers `viewer` on its chat's channel, creating the channel if needed.
    ///
    /// The subscription only sees messages published after this call.
    #[instrument(skip(self, viewer), fields(chat_id = viewer.chat_id()))]
    pub fn subscribe(&self, viewer: Participant) -> Subscription {
        let rx = self
            .channels
            .entry(viewer.chat_id())
            .or_insert_with(|| {
                info!("Creating new broadcast channel for chat");
                broadcast::channel::<ChatEvent>(BROADCAST_CHANNEL_CAPACITY).0
            })
            .subscribe();
        Subscription::new(viewer, rx)
    }

    /// Hands `message` to every receiver of its chat and returns how many got it.
    ///
    /// Visibility is applied on the receiving side.
    #[instrument(skip(self, message), fields(chat_id = message.chat_id, message_id = message.message_id))]
    pub fn publish(&self, message: Arc<Message>) -> usize {
        // Arc<Message> to share the ref, not the message. Avoid copies of the message on each rx.
        let chat_id = message.chat_id;
        self.broadcast(chat_id, ChatEvent::Message(message))
    }

    /// Ends the live subscriptions opened with `link_id`.
    #[instrument(skip(self))]
    pub fn revoke_link(&self, chat_id: i32, link_id: i32) -> usize {
        self.broadcast(chat_id, ChatEvent::LinkRevoked(link_id))
    }

    /// Ends every live subscription of the chat except the moderator's.
    #[instrument(skip(self))]
    pub fn disable_links(&self, chat_id: i32) -> usize {
        self.broadcast(chat_id, ChatEvent::LinksDisabled)
    }

    /// Drops the chat's channel; all its subscriptions end.
    #[instrument(skip(self))]
    pub fn close(&self, chat_id: i32) {
        if self.channels.remove(&chat_id).is_some() {
            info!("Chat channel closed");
        }
    }

    /// A channel left without receivers is dropped here.
    fn broadcast(&self, chat_id: i32, event: ChatEvent) -> usize {
        let Some(tx) = self.channels.get(&chat_id) else {
            debug!("Nobody is watching this chat");
            return 0;
        };
        match tx.send(event) {
            Ok(n) => {
                debug!(receivers = n, "Event broadcast to receivers");
                n
            }
            Err(_) => {
                drop(tx); // Rilascia il lock
                self.channels
                    .remove_if(&chat_id, |_, tx| tx.receiver_count() == 0);
                info!("No active receivers, channel removed");
                0
            }
        }
    }

    pub fn is_online(&self, chat_id: &i32) -> bool {
        self.channels.contains_key(chat_id)
    }

    pub fn viewer_count(&self, chat_id: &i32) -> usize {
        self.channels
            .get(chat_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for ChatMap {
    fn default() -> Self {
        Self::new()
    }
}
