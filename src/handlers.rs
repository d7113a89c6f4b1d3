use crate::chart::{render_svg, ChartData};
use crate::coerce::Scalar;
use crate::errors::AppError;
use crate::models::{FieldUpdate, SnapshotResponse, UpdateRequest};
use crate::serializer::{self, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use crate::state::AppState;
use crate::store::StoreSnapshot;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Datelike, Local};
use tracing::{info, warn};

pub async fn index() -> Html<String> {
    Html(render_index(Local::now().year()))
}

pub async fn list_activities(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let store = state.store.lock().await;
    Json(to_response(store.snapshot()))
}

pub async fn add_activity(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let mut store = state.store.lock().await;
    Json(to_response(store.add()))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<UpdateRequest>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let update = FieldUpdate::coerce(payload.field, Scalar::from(Some(&payload.value)))?;
    let mut store = state.store.lock().await;
    let snapshot = store.update(index, update)?;
    Ok(Json(to_response(snapshot)))
}

pub async fn remove_activity(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut store = state.store.lock().await;
    let snapshot = store.remove(index)?;
    Ok(Json(to_response(snapshot)))
}

pub async fn get_chart(State(state): State<AppState>) -> Json<ChartData> {
    let store = state.store.lock().await;
    Json(ChartData::from_aggregation(&store.snapshot().aggregation))
}

pub async fn chart_svg(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    let chart = ChartData::from_aggregation(&store.snapshot().aggregation);
    ([(header::CONTENT_TYPE, "image/svg+xml")], render_svg(&chart))
}

pub async fn export_yaml(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store.lock().await;
    let body = serializer::serialize(store.records())?;
    info!(count = store.records().len(), "exported activities");

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// Replaces the whole list with an uploaded YAML document. A rejected upload
/// leaves the current list alone.
pub async fn import_yaml(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SnapshotResponse>, AppError> {
    let records = serializer::parse(&body).map_err(|err| {
        warn!("rejected import: {err}");
        err
    })?;

    let mut store = state.store.lock().await;
    let snapshot = store.replace_all(records);
    info!(
        count = snapshot.activities.len(),
        skipped = snapshot.aggregation.warnings.len(),
        "imported activities"
    );
    Ok(Json(to_response(snapshot)))
}

fn to_response(snapshot: StoreSnapshot) -> SnapshotResponse {
    let chart = ChartData::from_aggregation(&snapshot.aggregation);
    SnapshotResponse {
        version: snapshot.version,
        activities: snapshot.activities,
        chart_svg: render_svg(&chart),
        aggregation: snapshot.aggregation,
        chart,
    }
}
