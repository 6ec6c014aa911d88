//! Binary entry point for the ticket fulfillment service.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ules_tickets::adapters::artwork::{
    FilesystemBaseImageStore, PngImageComposer, QrCodeRenderer,
};
use ules_tickets::adapters::email::SmtpMailer;
use ules_tickets::adapters::http::ticketing::{api_router, TicketingAppState};
use ules_tickets::adapters::paystack::{PaystackConfig, PaystackGateway};
use ules_tickets::adapters::postgres::PostgresPurchaseLedger;
use ules_tickets::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = TicketingAppState {
        webhook_secret: config.payment.paystack_secret_key.clone(),
        ledger: Arc::new(PostgresPurchaseLedger::new(pool)),
        gateway: Arc::new(PaystackGateway::new(
            PaystackConfig::new(config.payment.paystack_secret_key.expose_secret())
                .with_base_url(config.payment.api_base_url.clone()),
        )),
        code_renderer: Arc::new(QrCodeRenderer),
        base_images: Arc::new(FilesystemBaseImageStore::new(
            config.assets.base_image_dir.clone(),
        )),
        composer: Arc::new(PngImageComposer),
        mail_transport: Arc::new(SmtpMailer::new(
            config.email.smtp_host.clone(),
            config.email.smtp_port,
            config.email.smtp_username.clone(),
            config.email.smtp_password.expose_secret().clone(),
            config.email.from_header(),
        )),
    };

    let app = api_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
