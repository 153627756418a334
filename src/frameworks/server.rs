use crate::frameworks::config::{self, ServerSettings};
use crate::interface_adapters::clients::UpstreamClient;
use crate::interface_adapters::response;
use crate::interface_adapters::routes;
use crate::interface_adapters::sink::TracingSink;
use crate::interface_adapters::state::{AppState, InMemoryProfileStore};
use crate::use_cases::normalize::ErrorNormalizer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serve the app on an already-bound listener until the process exits.
///
/// The error normalizer is process-wide and the first install wins: a second
/// `run` in the same process keeps the first call's `settings.disclosure`.
pub async fn run(listener: TcpListener, settings: ServerSettings) -> std::io::Result<()> {
    if response::install(ErrorNormalizer::new(settings.disclosure, TracingSink)).is_err() {
        tracing::warn!("error normalizer already installed; keeping the existing one.");
    }
    tracing::debug!(
        upstream_url = %settings.upstream_url,
        disclosure = ?settings.disclosure,
        "server configured."
    );

    let upstream = Arc::new(UpstreamClient::new(
        settings.upstream_url,
        settings.upstream_timeout,
    ));
    let state = Arc::new(AppState {
        upstream,
        profiles: InMemoryProfileStore::default(),
    });

    axum::serve(listener, routes::app(state)).await
}

pub async fn start() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let addr = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return; // Abort startup on bind failure.
        }
    };
    tracing::info!(%addr, "listening");

    // Serve app and report errors rather than panicking.
    if let Err(e) = run(listener, ServerSettings::from_env()).await {
        tracing::error!(error = %e, "server error");
    }
}
