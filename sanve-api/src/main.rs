use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sanve_api::{app, AppState, AuthConfig};
use sanve_notify::{MailerOptions, Notifier};
use sanve_store::{DbClient, SqliteBookingRepository, SqliteSettingsRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sanve_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = sanve_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Sanve API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .context("Failed to open database")?;
    db.init_schema().await.context("Failed to init schema")?;

    let bookings = Arc::new(SqliteBookingRepository::new(db.pool.clone()));
    let settings = Arc::new(SqliteSettingsRepository::new(db.pool.clone()));
    let notifier = Arc::new(Notifier::new(
        settings.clone(),
        MailerOptions {
            smtp_host: config.mail.smtp_host.clone(),
            smtp_port: config.mail.smtp_port,
            sender_name: config.mail.sender_name.clone(),
        },
    ));

    let app_state = AppState {
        bookings,
        settings,
        notifier,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            token_ttl_hours: config.auth.token_ttl_hours,
        },
        site: config.site.clone(),
    };

    let app = app(app_state, &config.cors.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
