//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod chat_window;
pub mod consent;
pub mod enums;
pub mod link;
pub mod message;
pub mod project;

// Re-exports per facilitare l'import
pub use chat_window::ChatWindow;
pub use consent::Consent;
pub use enums::{LinkRole, Role};
pub use link::Link;
pub use message::Message;
pub use project::{Project, ProjectSettings};
