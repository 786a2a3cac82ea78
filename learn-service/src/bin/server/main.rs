use std::sync::Arc;

use auth::Authenticator;
use learn_service::config::Config;
use learn_service::domain::content::service::ContentService;
use learn_service::domain::user::service::UserService;
use learn_service::inbound::http::router::create_router;
use learn_service::outbound::repositories::PostgresContentRepository;
use learn_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learn_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "learn-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // Fails here when JWT__SECRET (or any other required setting) is absent;
    // there is no fallback signing key.
    let config = Config::load()?;

    tracing::info!(http_port = config.server.http_port, "Configuration loaded");

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let content_repository = Arc::new(PostgresContentRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository, authenticator));
    let content_service = Arc::new(ContentService::new(content_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, content_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
