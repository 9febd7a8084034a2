//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! - Autenticazione moderatore (JWT) e risoluzione dei participant
//! - Configurazione e connessione al database
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, decode_jwt, encode_jwt, identity_middleware, moderator_middleware};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
