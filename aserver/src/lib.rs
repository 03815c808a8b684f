//! axum HTTP boundary: retrieval chat, session chat and the wellbeing
//! dashboard endpoints.
//!
//! ```rust
//! use aserver::{ApiError, DEFAULT_CORS_ORIGIN};
//! use axum::response::IntoResponse;
//!
//! let response = ApiError::BadRequest("No message provided".to_string()).into_response();
//! assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
//! assert_eq!(DEFAULT_CORS_ORIGIN, "http://localhost:3000");
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ServerError, ServerErrorKind};
pub use routes::{DEFAULT_CORS_ORIGIN, create_router, serve, start_server};
pub use state::AppState;
