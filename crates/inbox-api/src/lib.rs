pub mod cors;
pub mod error;
pub mod health;
pub mod messages;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use inbox_store::MessageStore;

pub use routes::router;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: MessageStore,
}
