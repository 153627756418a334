use crate::interface_adapters::handlers::profiles::create_profile;
use crate::interface_adapters::handlers::upstream::relay;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/profiles", post(create_profile))
        .route("/upstream/{*path}", get(relay))
        .with_state(state)
}
