//! Participation engine of a chat pod.
//!
//! Everything here takes the acting [`Participant`] explicitly; HTTP and
//! websocket adapters live in `services` and `ws`.

pub mod consent;
pub mod error;
pub mod identity;
pub mod join_url;
pub mod messaging;
pub mod participant;
pub mod registry;
pub mod visibility;

pub use error::PodError;
pub use join_url::JoinUrl;
pub use participant::{LinkParticipant, Participant};
pub use visibility::{Audience, is_visible_to};
