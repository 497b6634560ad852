mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use handlers::SearchResponse;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/search_news", get(handlers::search_news))
        .route("/route_search", get(handlers::route_search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn start(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "geonews server listening");
    axum::serve(listener, app).await
}
