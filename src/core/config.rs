use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";
const DEFAULT_MODERATOR_PASSWORD: &str = "moderator";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub moderator_password: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    /// Base used to render join URLs handed out to participants
    pub public_base_url: String,
    pub app_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://chatpod.db".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            moderator_password: DEFAULT_MODERATOR_PASSWORD.to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            max_connections: 5,
            public_base_url: "http://localhost:3000".to_string(),
            app_env: "development".to_string(),
        }
    }
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        let defaults = Config::default();

        let app_env = env::var("APP_ENV").unwrap_or(defaults.app_env);

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            defaults.jwt_secret
        });

        let moderator_password = match env::var("MODERATOR_PASSWORD") {
            Ok(password) if !password.is_empty() => password,
            _ if app_env == "development" => {
                warn!("MODERATOR_PASSWORD not set, using development default");
                defaults.moderator_password
            }
            _ => return Err("MODERATOR_PASSWORD must be set outside development".to_string()),
        };

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;
        if max_connections == 0 {
            return Err("Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string());
        }

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

        Ok(Config {
            database_url,
            jwt_secret,
            moderator_password,
            server_host,
            server_port,
            max_connections,
            public_base_url,
            app_env,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Public URL: {}", self.public_base_url);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB Connections: {}", self.max_connections);
        info!(
            "   JWT Secret: {}",
            if self.jwt_secret == DEFAULT_JWT_SECRET {
                "USING DEFAULT (INSECURE!)"
            } else {
                "custom secret configured"
            }
        );
    }

    /// Maschera l'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_url_hides_credentials() {
        assert_eq!(
            Config::mask_url("postgres://user:secret@db:5432/pods"),
            "postgres://***@db:5432/pods"
        );
        assert_eq!(Config::mask_url("sqlite://chatpod.db"), "sqlite://chatpod.db");
    }
}
