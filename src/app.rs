use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chart.svg", get(handlers::chart_svg))
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::add_activity),
        )
        .route(
            "/api/activities/:index",
            patch(handlers::update_activity).delete(handlers::remove_activity),
        )
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/export", get(handlers::export_yaml))
        .route("/api/import", post(handlers::import_yaml))
        .with_state(state)
}
