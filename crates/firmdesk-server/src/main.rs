//! Firmdesk Server — application entry point.

use std::sync::Arc;

use firmdesk_auth::{Mailer, SmtpMailer};
use firmdesk_db::DbManager;
use firmdesk_server::config::ServerConfig;
use firmdesk_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("firmdesk=info".parse()?))
        .json()
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Starting firmdesk server...");

    let manager = DbManager::connect(&config.db).await?;
    firmdesk_db::run_migrations(manager.client()).await?;

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(
        &config.smtp_host,
        config.smtp_port,
        &config.mail_from,
    )?);
    let state = Arc::new(AppState::new(
        manager.client().clone(),
        mailer,
        config.auth.clone(),
    ));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Listening");
    axum::serve(listener, firmdesk_server::router(state)).await?;

    Ok(())
}
