use {
    card_gateway::{
        AppState,
        adapters::{bank_simulator::BankSimulatorClient, http},
        config::{AppConfig, ConfigError},
        infra::memory::payment_store::InMemoryPaymentStore,
        services::payment_service::PaymentService,
    },
    std::sync::Arc,
    thiserror::Error,
    tokio::signal,
    tracing_subscriber::EnvFilter,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("bank client: {0}")]
    BankClient(#[from] reqwest::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    let cfg = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .init();

    let store = Arc::new(InMemoryPaymentStore::new());
    let bank = Arc::new(BankSimulatorClient::new(
        cfg.bank_simulator_url.clone(),
        cfg.bank_timeout,
    )?);

    let state = AppState {
        payments: PaymentService::new(store, bank),
    };
    let app = http::router(state, cfg.request_timeout);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        addr = %cfg.bind_addr,
        bank = %cfg.bank_simulator_url,
        version = env!("CARGO_PKG_VERSION"),
        "listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
