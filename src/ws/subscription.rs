//! Cancellable, filtered view on a chat's broadcast channel.

use crate::entities::Message;
use crate::pod::{Participant, is_visible_to};
use crate::ws::chatmap::ChatEvent;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

pub struct Subscription {
    viewer: Participant,
    rx: Receiver<ChatEvent>,
}

impl Subscription {
    pub(crate) fn new(viewer: Participant, rx: Receiver<ChatEvent>) -> Self {
        Self { viewer, rx }
    }

    pub fn viewer(&self) -> &Participant {
        &self.viewer
    }

    /// Next message this viewer may read, or `None` once the subscription is over.
    ///
    /// It is over when the channel goes away, when the viewer's link is
    /// revoked or when links are disabled for the chat.
    pub async fn recv(&mut self) -> Option<Arc<Message>> {
        loop {
            let step = match self.rx.recv().await {
                Ok(event) => screen(&self.viewer, event),
                Err(RecvError::Lagged(skipped)) => lagged(&self.viewer, skipped),
                Err(RecvError::Closed) => return None,
            };
            match step {
                ControlFlow::Continue(Some(message)) => return Some(message),
                ControlFlow::Continue(None) => {}
                ControlFlow::Break(()) => return None,
            }
        }
    }

    /// Same filtering as [`Subscription::recv`], as a stream for `select!` loops.
    pub fn into_stream(self) -> impl Stream<Item = Arc<Message>> + Send + 'static {
        let viewer = self.viewer;
        BroadcastStream::new(self.rx)
            .map_while(move |item| {
                let step = match item {
                    Ok(event) => screen(&viewer, event),
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => lagged(&viewer, skipped),
                };
                match step {
                    ControlFlow::Continue(message) => Some(message),
                    ControlFlow::Break(()) => None,
                }
            })
            .filter_map(|message| message)
    }

    /// Leaves the chat. Dropping the handle has the same effect.
    pub fn unsubscribe(self) {}
}

/// `Break` ends the subscription, `Continue(None)` skips the event.
fn screen(viewer: &Participant, event: ChatEvent) -> ControlFlow<(), Option<Arc<Message>>> {
    match event {
        ChatEvent::Message(message) if is_visible_to(&message, viewer) => {
            ControlFlow::Continue(Some(message))
        }
        ChatEvent::Message(message) => {
            debug!(message_id = message.message_id, "Filtered out for viewer");
            ControlFlow::Continue(None)
        }
        ChatEvent::LinkRevoked(link_id) if viewer.link_id() == Some(link_id) => {
            info!(link_id, "Link revoked, ending subscription");
            ControlFlow::Break(())
        }
        ChatEvent::LinksDisabled if !viewer.is_moderator() => {
            info!(chat_id = viewer.chat_id(), "Links disabled, ending subscription");
            ControlFlow::Break(())
        }
        ChatEvent::LinkRevoked(_) | ChatEvent::LinksDisabled => ControlFlow::Continue(None),
    }
}

/// A link viewer that fell behind may have missed its own revocation, so it
/// is ended and has to reconnect through the identity check. The moderator
/// keeps going; the client recovers missed messages from the history.
fn lagged(viewer: &Participant, skipped: u64) -> ControlFlow<(), Option<Arc<Message>>> {
    warn!(skipped, chat_id = viewer.chat_id(), "Subscriber lagged behind");
    if viewer.is_moderator() {
        ControlFlow::Continue(None)
    } else {
        ControlFlow::Break(())
    }
}
