//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//! Le query sono scritte a runtime (`sqlx::query_as::<_, T>`) e mappate con
//! `FromRow`, quindi la compilazione non richiede un database raggiungibile.

pub mod chat_window;
pub mod consent;
pub mod link;
pub mod message;
pub mod project;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use chat_window::ChatWindowRepository;
pub use consent::ConsentRepository;
pub use link::LinkRepository;
pub use message::MessageRepository;
pub use project::ProjectRepository;
