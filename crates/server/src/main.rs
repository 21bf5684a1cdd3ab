//! EstatePulse server.
//!
//! Serves the portfolio JSON views on port 3001. State is kept in a single
//! JSON blob under `ESTATE_DATA_DIR`; see [`estate_pulse_server::config`] for
//! the full list of environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use estate_pulse_core::User;
use estate_pulse_server::config::ServerConfig;
use estate_pulse_server::insight::{GeminiClient, InsightProvider, Unconfigured};
use estate_pulse_server::portfolio::Portfolio;
use estate_pulse_server::state::AppState;
use estate_pulse_server::store::{FileStore, ProjectRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing: JSON when `ESTATE_LOG_JSON` is set, text otherwise.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "estate_pulse_server=info,tower_http=debug".into());

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn insight_provider(config: &ServerConfig) -> Arc<dyn InsightProvider> {
    let Some(gemini) = config.gemini() else {
        tracing::warn!("GEMINI_API_KEY not set, insights will use the fallback message");
        return Arc::new(Unconfigured);
    };
    match GeminiClient::new(gemini) {
        Ok(client) => {
            tracing::info!(model = %client.model(), "Gemini insight provider ready");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini client unavailable, insights will use the fallback message");
            Arc::new(Unconfigured)
        }
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().expect("Failed to load configuration");
    init_tracing(config.log_json);

    let store = FileStore::open(&config.data_dir).expect("Failed to open data directory");
    tracing::info!(data_dir = %store.dir().display(), "Project store opened");

    let portfolio = Portfolio::open(
        ProjectRepository::new(Arc::new(store)),
        User::for_role(config.startup_role),
    )
    .expect("Failed to load projects");

    let state = AppState::new(portfolio, insight_provider(&config));
    let app = estate_pulse_server::app(state);

    let addr = config.socket_addr();
    tracing::info!("estate-pulse listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
