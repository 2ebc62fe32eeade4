//! Premium Unlock server binary.
//!
//! Loads configuration from `PREMIUM_UNLOCK__*` environment variables, wires
//! the selected storage backend, provisions seed codes, and serves the
//! premium API until Ctrl+C or SIGTERM.

use std::sync::Arc;

use premium_unlock::adapters::{
    app_router, InMemoryPremiumStore, PostgresPremiumCodeRepository, PostgresPremiumStatusReader,
    PremiumAppState,
};
use premium_unlock::application::{ProvisionPremiumCodesCommand, ProvisionPremiumCodesHandler};
use premium_unlock::config::{AppConfig, ServerConfig, StorageBackend, ValidationError};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let state = build_state(&config).await?;

    let seed = config.storage.seed_codes_list();
    if !seed.is_empty() {
        let provisioned = ProvisionPremiumCodesHandler::new(state.code_repository.clone())
            .handle(ProvisionPremiumCodesCommand { codes: seed })
            .await?;
        info!(
            created = provisioned.created.len(),
            existing = provisioned.already_present.len(),
            "Seed codes provisioned"
        );
    }

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?config.storage.backend, "Premium unlock listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_state(config: &AppConfig) -> Result<PremiumAppState, BoxError> {
    match (config.storage.backend, &config.database) {
        (StorageBackend::Memory, _) => {
            let store = Arc::new(InMemoryPremiumStore::new());
            Ok(PremiumAppState::new(store.clone(), store))
        }
        (StorageBackend::Postgres, Some(database)) => {
            let pool = database.pool_options().connect(&database.url).await?;
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("Database migrations applied");
            }
            Ok(PremiumAppState::new(
                Arc::new(PostgresPremiumCodeRepository::new(pool.clone())),
                Arc::new(PostgresPremiumStatusReader::new(pool)),
            ))
        }
        (StorageBackend::Postgres, None) => {
            Err(ValidationError::MissingRequired("DATABASE_URL").into())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
