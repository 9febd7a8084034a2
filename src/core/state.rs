//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, configurazioni e stato condiviso
//! necessario per gestire l'applicazione.

use crate::core::Config;
use crate::repositories::{
    ChatWindowRepository, ConsentRepository, LinkRepository, MessageRepository, ProjectRepository,
};
use crate::ws::ChatMap;
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    pub project: ProjectRepository,

    /// Repository per le chat window (pod)
    pub chat: ChatWindowRepository,

    /// Repository per i link di partecipazione
    pub link: LinkRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    pub consent: ConsentRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,

    pub moderator_password: String,

    /// Base usata per costruire i join URL
    pub public_base_url: String,

    /// Struttura di gestione delle chat con almeno un viewer online
    pub chats_online: ChatMap,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            project: ProjectRepository::new(pool.clone()),
            chat: ChatWindowRepository::new(pool.clone()),
            link: LinkRepository::new(pool.clone()),
            msg: MessageRepository::new(pool.clone()),
            consent: ConsentRepository::new(pool),
            jwt_secret: config.jwt_secret.clone(),
            moderator_password: config.moderator_password.clone(),
            public_base_url: config.public_base_url.clone(),
            chats_online: ChatMap::new(),
        }
    }
}
