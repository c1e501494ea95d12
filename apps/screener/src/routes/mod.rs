pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route(
            "/api/v1/screenings/requirements",
            post(handlers::handle_extract_requirements),
        )
        .route("/api/v1/screenings", post(handlers::handle_screen))
        .with_state(state)
}
