mod config;
mod errors;
mod feeds;
mod history;
mod models;
mod server;
mod spark;
mod state;
#[cfg(test)]
mod testutil;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging (stderr, env-filterable)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("spark_pricer starting");

    // Load config; credentials are required, so this fails fast
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    let port = cfg.server_port;
    let app_state = AppState::new(cfg);

    let app = axum::Router::new()
        .route("/api/health", axum::routing::get(server::routes::get_health))
        .route("/api/price", axum::routing::post(server::routes::post_price))
        .route("/api/history", axum::routing::get(server::routes::get_history))
        .route("/api/spot/{ticker}", axum::routing::get(server::routes::get_spot))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(app_state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
