//! HTTP surface: JSON endpoints under `/api`, the web UI at `/` and its
//! assets under `/static`.

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.config.server.max_upload_bytes;
    let index = state.config.server.templates_dir.join("index.html");
    let assets = state.config.server.static_dir.clone();

    let api = Router::new()
        .route("/analizar-sentimiento", post(handlers::analyze_sentiment))
        .route("/traducir", post(handlers::translate))
        .route(
            "/analizar-imagen",
            post(handlers::analyze_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/chat", post(handlers::chat))
        .route(
            "/directline/token",
            get(handlers::direct_line_token).post(handlers::direct_line_token),
        )
        .route("/health", get(handlers::health));

    Router::new()
        .route_service("/", ServeFile::new(index))
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(assets))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
