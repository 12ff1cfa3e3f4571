// Router construction shared by the server and handler tests
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{diagnose, health_check};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/diagnoses", post(diagnose))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
