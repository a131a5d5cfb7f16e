use std::path::Path;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::services::ServeDir;

use crate::AppState;
use crate::error::ApiError;
use crate::{cors, health, messages};

/// Build the HTTP surface over `state`.
///
/// With `static_dir` set, any path not under the API is served from that
/// directory (the presentation page); otherwise unknown paths get a JSON 404.
/// Request bodies above `max_body_bytes` are refused with a JSON 413.
pub fn router(state: AppState, static_dir: Option<&Path>, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .method_not_allowed_fallback(method_not_allowed);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api.fallback(not_found),
    };

    app.layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors::layer())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
