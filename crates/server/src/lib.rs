//! seoscope web front end
//!
//! Axum server with an analysis form and signed, per-report PDF downloads.

pub mod error;
pub mod routes;
pub mod state;
pub mod views;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use state::{AppState, ServerConfig};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::analyze))
        .route("/download", get(routes::download_without_id))
        .route("/download/{id}", get(routes::download))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
///
/// Expired reports are swept at startup and then once per TTL period.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.output_dir).await?;
    let state = AppState::from_config(&config);
    state.sweep_reports()?;
    spawn_report_sweeper(state.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Web server listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_report_sweeper(state: AppState) {
    let period = state.report_ttl.max(std::time::Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            let worker = state.clone();
            match tokio::task::spawn_blocking(move || worker.sweep_reports()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "report sweep failed"),
                Err(e) => tracing::warn!(error = %e, "report sweep task failed"),
            }
        }
    });
}
