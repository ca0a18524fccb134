use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use genrerows_core::catalog::Catalog;
use genrerows_core::config::PluginConfiguration;
use genrerows_core::memory::InMemoryCatalog;
use genrerows_host::{HostApi, HostCatalog};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genrerows_api::background;
use genrerows_api::config::ServerConfig;
use genrerows_api::router::build_app_router;
use genrerows_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "genrerows_api=debug,genrerows_registry=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        public_url = %config.public_url,
        registration_mode = %config.registration_mode,
        "Loaded server configuration"
    );

    let plugin = PluginConfiguration::load_or_init(&config.plugin_config_path)
        .expect("Failed to load plugin configuration");
    tracing::info!(
        genres = plugin.normalized_genres().len(),
        items_per_section = plugin.items_per_section,
        show_only_movies = plugin.show_only_movies,
        "Loaded plugin configuration"
    );

    // --- Catalog ---
    let catalog: Arc<dyn Catalog> = match &config.catalog_file {
        Some(path) => Arc::new(
            InMemoryCatalog::from_json_file(path).expect("Failed to load catalog fixture"),
        ),
        None => {
            let api = HostApi::new(config.host_url.clone(), config.host_api_key.clone())
                .expect("Failed to build host API client");
            tracing::info!(host_url = %config.host_url, "Using host catalog");
            Arc::new(HostCatalog::new(api))
        }
    };

    // --- App state ---
    let state = AppState::new(config.clone(), plugin, catalog);
    let sections = Arc::clone(&state.sections);

    // --- Startup registration ---
    let registration_cancel = CancellationToken::new();
    let registration_handle = tokio::spawn(background::registration::run(
        state.clone(),
        registration_cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    registration_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), registration_handle).await;
    tracing::info!("Registration task stopped");

    let removed = sections.clear().await;
    tracing::info!(removed, "Unregistered genre sections");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
