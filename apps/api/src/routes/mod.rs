pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers::handle_compose_assessment;
use crate::selection::handlers::handle_select_skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stage (a): skill selection
        .route("/api/v1/skills/select", post(handle_select_skills))
        // Stage (b): assessment composition / regeneration
        .route(
            "/api/v1/assessments/compose",
            post(handle_compose_assessment),
        )
        .with_state(state)
}
