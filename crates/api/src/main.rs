use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use katha_api::background;
use katha_api::config::ServerConfig;
use katha_api::router::build_app_router;
use katha_api::state::AppState;
use katha_gemini::{ApiKeyStatus, GeminiApi};
use katha_pipeline::PlaceholderImages;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "katha_api=debug,katha_pipeline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        model = %config.gemini.model,
        "Loaded server configuration"
    );

    if ApiKeyStatus::of(Some(&config.gemini.api_key)) == ApiKeyStatus::Placeholder {
        tracing::error!("GOOGLE_API_KEY still holds the sample placeholder; replace it with a real key");
    } else {
        tracing::info!("Google AI Studio API key is configured");
    }

    // --- Upstream client ---
    let generator = Arc::new(GeminiApi::with_client(
        reqwest::Client::new(),
        config.gemini.base_url.clone(),
        config.gemini.model.clone(),
        config.gemini.api_key.clone(),
    ));

    // --- App state ---
    let addr_host = config.host.clone();
    let port = config.port;
    let state = AppState::new(config, generator, Arc::new(PlaceholderImages));

    // --- Background tasks ---
    let sweep_cancel = CancellationToken::new();
    let sweep_handle = tokio::spawn(background::rate_limit_sweep::run(
        Arc::clone(&state.rate_limiter),
        sweep_cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let ip: IpAddr = match addr_host.parse() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!(host = %addr_host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::new(ip, port);
    tracing::info!(%addr, "Starting server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind to address");
            std::process::exit(1);
        }
    };
    tracing::info!("Marathi Story Generator API ready");

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!(error = %e, "Server error");
    }

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
