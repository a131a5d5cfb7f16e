use axum::Json;
use chrono::Utc;

use inbox_types::api::HealthResponse;
use inbox_types::models::format_timestamp;

/// GET /api/health — static status plus current server time.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        time: format_timestamp(&Utc::now()),
    })
}
