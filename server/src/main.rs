#![recursion_limit = "256"]

mod routes;
mod state;

use std::sync::Arc;

use analysis::config::ServiceConfig;
use analysis::http::HttpAnalysisClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = ServiceConfig::from_env().expect("invalid analysis service config");
    let upstream = HttpAnalysisClient::new(&config).expect("analysis client init failed");
    tracing::info!(upstream = upstream.base_url(), "analysis service configured");

    let state = state::AppState::new(Arc::new(upstream));

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "riskboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
