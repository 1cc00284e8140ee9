use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::nutrition::targets::{compute_daily_targets, BiometricProfile, MacroTargets};
use crate::state::AppState;

use super::dto::{ProfileResponse, PutProfileRequest, PutTargetsRequest};
use super::repo::ProfileRow;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/targets", get(get_targets))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", put(put_profile))
        .route("/profile/targets", put(put_targets))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let row = ProfileRow::get(&state.db)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not set".to_string()))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn get_targets(
    State(state): State<AppState>,
) -> Result<Json<MacroTargets>, (StatusCode, String)> {
    let row = ProfileRow::get(&state.db)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not set".to_string()))?;
    Ok(Json(row.targets()))
}

/// Saving biometrics recomputes and stores the daily targets; any earlier
/// manual override is superseded here.
#[instrument(skip(state, payload))]
pub async fn put_profile(
    State(state): State<AppState>,
    Json(payload): Json<PutProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    if payload.weight_kg <= 0.0 || payload.height_cm <= 0.0 {
        warn!(
            weight_kg = payload.weight_kg,
            height_cm = payload.height_cm,
            "rejecting non-positive biometrics"
        );
        return Err((
            StatusCode::BAD_REQUEST,
            "weight_kg and height_cm must be positive".into(),
        ));
    }
    if payload.age == 0 {
        return Err((StatusCode::BAD_REQUEST, "age must be positive".into()));
    }

    let biometrics = BiometricProfile {
        weight_kg: payload.weight_kg,
        height_cm: payload.height_cm,
        age: payload.age,
        sex: payload.sex,
        activity_level: payload.activity_level,
        goal: payload.goal,
    };
    let targets = compute_daily_targets(&biometrics);

    let row = ProfileRow::upsert(&state.db, &payload.name, &biometrics, targets)
        .await
        .map_err(internal)?;

    info!(calories = targets.calories, "profile saved, targets recomputed");
    Ok(Json(row.into()))
}

#[instrument(skip(state, payload))]
pub async fn put_targets(
    State(state): State<AppState>,
    Json(payload): Json<PutTargetsRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let targets = payload.into_targets();
    if targets.calories < 0 || targets.protein < 0 || targets.carbs < 0 || targets.fat < 0 {
        return Err((StatusCode::BAD_REQUEST, "targets must be non-negative".into()));
    }

    let row = ProfileRow::set_targets(&state.db, targets)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not set".to_string()))?;

    info!(calories = targets.calories, "targets overridden");
    Ok(Json(row.into()))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    tracing::error!(error = %e, "profile handler failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
