pub mod debug;
pub mod scenic;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/scenic", post(scenic::create_scenic_routes))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
