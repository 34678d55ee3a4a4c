use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valuator_core::{
    create_authenticator, load_config, validate_config, AdmissionService, Authenticator,
    InMemoryJobStore, InMemoryQuotaLedger, JobStore, QuotaLedger, SimulatedEvaluator,
};
use valuator_server::api::{create_router, load_openapi_document};
use valuator_server::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("VALUATOR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        version = VERSION,
        config_hash = &config_hash[..16],
        auth_method = ?config.auth.method,
        "Configuration loaded"
    );

    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth).context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    let evaluator = SimulatedEvaluator::new(
        Duration::from_secs(config.evaluation.delay_secs),
        config.evaluation.placeholder_value,
    );
    let jobs: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new(Arc::new(evaluator)));
    let quota: Arc<dyn QuotaLedger> = Arc::new(InMemoryQuotaLedger::from_config(&config.quota));
    info!(
        ceiling = config.quota.ceiling,
        token_ttl_secs = config.quota.token_ttl_secs,
        evaluation_delay_secs = config.evaluation.delay_secs,
        "Job store and quota ledger initialized"
    );

    let admission = AdmissionService::new(jobs, quota);
    let mut state = AppState::new(config.clone(), authenticator, admission);

    if let Some(path) = &config.api.openapi_file {
        let document = load_openapi_document(path, &config.api.server_base_url)
            .with_context(|| format!("Failed to read OpenAPI document {:?}", path))?;
        info!("Serving OpenAPI document from {:?}", path);
        state = state.with_openapi_document(document);
    }

    let app = create_router(Arc::new(state));

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server exited without a shutdown signal
            return result.context("Server task panicked")?.context("Server error");
        }
        _ = shutdown_signal() => {}
    }

    info!("Server shutting down...");
    let _ = drain_tx.send(());

    let grace = Duration::from_secs(config.server.graceful_shutdown_secs);
    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.context("Server task panicked")?.context("Server error")?,
        Err(_) => warn!(
            grace_secs = config.server.graceful_shutdown_secs,
            "In-flight requests did not drain in time"
        ),
    }

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
