//! SurrealDB connection management.

use std::env;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

fn env_or(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

/// Connection settings, usually read from `FIRMDESK_DB_*` variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root credentials.
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "firmdesk".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl DbConfig {
    /// Build the settings from `FIRMDESK_DB_*` environment variables,
    /// keeping the local-development defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_or("FIRMDESK_DB_URL", defaults.url),
            namespace: env_or("FIRMDESK_DB_NAMESPACE", defaults.namespace),
            database: env_or("FIRMDESK_DB_DATABASE", defaults.database),
            username: env_or("FIRMDESK_DB_USER", defaults.username),
            password: env_or("FIRMDESK_DB_PASSWORD", defaults.password),
        }
    }
}

/// A connected SurrealDB client, scoped to one namespace/database.
#[derive(Clone)]
pub struct DbManager {
    client: Surreal<Client>,
}

impl DbManager {
    /// Open a WebSocket connection, sign in as root and select the
    /// configured namespace and database. The server version in the
    /// startup log doubles as a reachability check.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        let client = Surreal::new::<Ws>(&config.url).await?;

        client
            .signin(Root {
                username: config.username.clone(),
                password: config.password.clone(),
            })
            .await?;
        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        let version = client.version().await?;
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            server = %version,
            "connected to SurrealDB"
        );

        Ok(Self { client })
    }

    pub fn client(&self) -> &Surreal<Client> {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_development() {
        let config = DbConfig::default();
        assert_eq!(config.url, "127.0.0.1:8000");
        assert_eq!(config.namespace, "firmdesk");
        assert_eq!(config.database, "main");
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        assert_eq!(
            env_or("FIRMDESK_DB_NEVER_SET_IN_TESTS", "fallback".into()),
            "fallback"
        );
    }
}
