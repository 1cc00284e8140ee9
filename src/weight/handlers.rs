use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::state::AppState;

use super::dto::{HistoryQuery, RecordWeightRequest, WeightResponse};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new().route("/weights", get(list_weights).post(record_weight))
}

#[instrument(skip(state, payload))]
pub async fn record_weight(
    State(state): State<AppState>,
    Json(payload): Json<RecordWeightRequest>,
) -> Result<(StatusCode, Json<WeightResponse>), (StatusCode, String)> {
    if payload.weight_kg <= 0.0 {
        warn!(weight_kg = payload.weight_kg, "rejecting non-positive weight");
        return Err((StatusCode::BAD_REQUEST, "weight_kg must be positive".into()));
    }

    let measured_on = payload
        .measured_on
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let row = repo::insert(&state.db, Uuid::new_v4(), measured_on, payload.weight_kg)
        .await
        .map_err(internal)?;

    info!(weight_id = %row.id, %measured_on, "weight recorded");
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[instrument(skip(state))]
pub async fn list_weights(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<WeightResponse>>, (StatusCode, String)> {
    let limit = query.limit.clamp(1, 365);
    let rows = repo::list_recent(&state.db, limit).await.map_err(internal)?;
    Ok(Json(rows.into_iter().map(WeightResponse::from).collect()))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "weight handler failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
