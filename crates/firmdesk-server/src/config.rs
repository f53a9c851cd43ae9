//! Environment-driven server configuration.

use std::env;

use firmdesk_auth::AuthConfig;
use firmdesk_db::DbConfig;

/// Full server configuration, read from `FIRMDESK_*` environment
/// variables with local-development defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub mail_from: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            pepper: env::var("FIRMDESK_PEPPER").ok(),
            session_lifetime_secs: env::var("FIRMDESK_SESSION_LIFETIME_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_lifetime_secs),
            reset_token_lifetime_secs: env::var("FIRMDESK_RESET_TOKEN_LIFETIME_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reset_token_lifetime_secs),
            reset_secret: var_or("FIRMDESK_RESET_SECRET", &defaults.reset_secret),
            reset_link_base: var_or("FIRMDESK_RESET_LINK_BASE", &defaults.reset_link_base),
        };

        Self {
            bind_addr: var_or("FIRMDESK_BIND_ADDR", "0.0.0.0:8080"),
            db: DbConfig::from_env(),
            auth,
            smtp_host: var_or("FIRMDESK_SMTP_HOST", "127.0.0.1"),
            smtp_port: env::var("FIRMDESK_SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(25),
            mail_from: var_or("FIRMDESK_MAIL_FROM", "firmdesk@localhost"),
        }
    }
}
