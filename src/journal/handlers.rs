use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::profile::repo::ProfileRow;
use crate::state::AppState;

use super::dto::{
    AddEntryRequest, DaySummary, FoodEntryResponse, JournalResponse, StepsUpdateRequest,
    WaterUpdateRequest,
};
use super::repo::{self, DailyLogRow, JournalError};
use super::services::day_summary;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/journal/:date", get(get_journal))
        .route("/journal/:date/summary", get(get_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/journal/:date/entries", post(add_entry))
        .route("/journal/:date/entries/:id", delete(remove_entry))
        .route("/journal/:date/water", put(update_water))
        .route("/journal/:date/steps", put(update_steps))
}

fn parse_date(raw: &str) -> Result<Date, (StatusCode, String)> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "invalid date, expected YYYY-MM-DD".to_string(),
        )
    })
}

#[instrument(skip(state))]
pub async fn get_journal(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<JournalResponse>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    let log = repo::get_log(&state.db, date)
        .await
        .map_err(internal)?
        .unwrap_or_else(|| DailyLogRow::empty(date));
    let entries = repo::list_entries(&state.db, date).await.map_err(internal)?;
    Ok(Json(JournalResponse::from_parts(log, entries)))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DaySummary>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    let profile = ProfileRow::get(&state.db)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not set".to_string()))?;
    let log = repo::get_log(&state.db, date)
        .await
        .map_err(internal)?
        .unwrap_or_else(|| DailyLogRow::empty(date));
    Ok(Json(day_summary(&log, &profile.targets())))
}

#[instrument(skip(state, payload))]
pub async fn add_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<FoodEntryResponse>), (StatusCode, String)> {
    let date = parse_date(&date)?;
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name must be non-empty".into()));
    }
    if payload.quantity <= 0.0 {
        warn!(quantity = payload.quantity, "rejecting non-positive quantity");
        return Err((StatusCode::BAD_REQUEST, "quantity must be positive".into()));
    }

    let id = Uuid::new_v4();
    let created_at = OffsetDateTime::now_utc();
    let entry = repo::append_entry(&state.db, date, id, created_at, &payload.into_new_entry())
        .await
        .map_err(internal)?;

    info!(entry_id = %entry.id, %date, "entry appended");
    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[instrument(skip(state))]
pub async fn remove_entry(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, Uuid)>,
) -> Result<Json<FoodEntryResponse>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    match repo::remove_entry(&state.db, date, id).await {
        Ok(entry) => {
            info!(entry_id = %id, %date, "entry removed");
            Ok(Json(entry.into()))
        }
        Err(JournalError::EntryNotFound) => {
            warn!(entry_id = %id, %date, "entry not found");
            Err((StatusCode::NOT_FOUND, "Entry not found".into()))
        }
        Err(e) => Err(internal(e)),
    }
}

#[instrument(skip(state, payload))]
pub async fn update_water(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<WaterUpdateRequest>,
) -> Result<Json<JournalResponse>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    let log = repo::adjust_water(&state.db, date, payload.delta_ml)
        .await
        .map_err(internal)?;
    let entries = repo::list_entries(&state.db, date).await.map_err(internal)?;
    Ok(Json(JournalResponse::from_parts(log, entries)))
}

#[instrument(skip(state, payload))]
pub async fn update_steps(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<StepsUpdateRequest>,
) -> Result<Json<JournalResponse>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    if payload.steps < 0 {
        return Err((StatusCode::BAD_REQUEST, "steps must be non-negative".into()));
    }
    let log = repo::set_steps(&state.db, date, payload.steps)
        .await
        .map_err(internal)?;
    let entries = repo::list_entries(&state.db, date).await.map_err(internal)?;
    Ok(Json(JournalResponse::from_parts(log, entries)))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "journal handler failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
