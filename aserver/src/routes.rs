//! Router assembly and server start-up.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{delete, get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::handlers;
use crate::state::AppState;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// All routes with request tracing and CORS opened for `cors_origin` only.
pub fn create_router(state: AppState, cors_origin: &str) -> Result<Router, ServerError> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .map_err(|error| ServerError::config(format!("invalid CORS origin '{cors_origin}': {error}")))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/sessions/{id}/chat", post(handlers::session_chat))
        .route("/sessions/{id}", delete(handlers::reset_session))
        .route("/api/user/{id}/stats", get(handlers::user_stats))
        .route("/api/entries", post(handlers::create_entry))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Serves `router` on an already bound listener until the process stops.
pub async fn start_server(listener: TcpListener, router: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "aura api listening");
    }

    axum::serve(listener, router)
        .await
        .map_err(|error| ServerError::io(format!("server error: {error}")))
}

/// Binds `addr` and serves the full router.
pub async fn serve(addr: &str, state: AppState, cors_origin: &str) -> Result<(), ServerError> {
    let router = create_router(state, cors_origin)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|error| ServerError::io(format!("failed to bind {addr}: {error}")))?;

    start_server(listener, router).await
}
