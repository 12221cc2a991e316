use anyhow::{Context, Result};
use secrecy::Secret;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub database: String,
}

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys take the
    /// values the service historically shipped with.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let port = |key: &str, default: u16| -> Result<u16> {
            match lookup(key) {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("{key} must be a port number, got {v:?}")),
                None => Ok(default),
            }
        };

        let database = DatabaseConfig {
            host: var("DATABASE_HOST", "127.0.0.1"),
            port: port("DATABASE_PORT", 5432)?,
            username: var("DATABASE_USERNAME", "user"),
            password: Secret::new(var("DATABASE_PASSWORD", "pass")),
            database: var("DATABASE_NAME", "bookAPI"),
        };
        let server = ServerConfig {
            host: var("SERVER_HOST", "0.0.0.0"),
            port: port("SERVER_PORT", 1232)?,
        };
        Ok(Self { database, server })
    }
}
