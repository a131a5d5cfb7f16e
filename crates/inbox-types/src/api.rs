use serde::Serialize;

use crate::models::Message;

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
}

// -- Messages --

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub items: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct CreateMessageResponse {
    pub ok: bool,
    pub item: Message,
}

// -- Errors --

/// Body of every non-2xx response. The presentation client shows
/// `message` to the visitor verbatim.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
