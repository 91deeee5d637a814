use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit))
        .route("/stats", get(handlers::stats_page))
        .route("/api/answers", post(handlers::api_submit))
        .route("/api/days", get(handlers::api_days))
        .route("/api/days/:day/answers", get(handlers::api_day_answers))
        .route("/api/stats", get(handlers::api_stats))
        .with_state(state)
}
