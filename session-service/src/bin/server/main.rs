use std::sync::Arc;
use std::time::Duration;

use auth::RevocationList;
use auth::TokenService;
use session_service::config::Config;
use session_service::domain::credential::service::CredentialVerifier;
use session_service::inbound::http::router::create_router;
use session_service::outbound::store::InMemoryUserStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// How often expired revocation entries are purged.
const PURGE_INTERVAL_SECS: u64 = 300;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // A missing or weak signing secret fails here and halts startup.
    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.jwt.issuer,
        token_ttl_minutes = config.jwt.ttl_minutes,
        "Configuration loaded"
    );

    let revocations = Arc::new(RevocationList::new());
    let tokens = Arc::new(TokenService::new(
        config.jwt.secret.as_bytes(),
        config.jwt.issuer.clone(),
        chrono::Duration::minutes(config.jwt.ttl_minutes),
        Arc::clone(&revocations),
    ));

    // Periodic purge task, owned by the same lifecycle as the revocation
    // store it prunes.
    let purge_service = Arc::clone(&tokens);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let removed = purge_service.purge_expired_revocations();
            if removed > 0 {
                tracing::debug!(removed, "Purged expired token revocations");
            }
        }
    });

    // Default adapter; deployments wire their own UserStore implementation
    // in front of the real credential storage.
    let store = Arc::new(InMemoryUserStore::new());
    let verifier = Arc::new(CredentialVerifier::new(
        Arc::clone(&store),
        Arc::clone(&tokens),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(verifier, tokens);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
