use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{debug, instrument};

use crate::extractor::{analyze_meal, detect_meal_slot};
use crate::state::AppState;

use super::dto::{AnalyzeRequest, AnalyzeResponse};

pub fn routes() -> Router<AppState> {
    Router::new().route("/assistant/analyze", post(analyze))
}

#[instrument(skip(state, payload))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "text must be non-empty".into()));
    }

    let mut rng = rand::thread_rng();
    let suggestions = analyze_meal(text, &state.foods, &mut rng);
    let meal = detect_meal_slot(&text.to_lowercase());

    debug!(
        meal = meal.label(),
        suggestions = suggestions.len(),
        "meal analyzed"
    );
    Ok(Json(AnalyzeResponse { meal, suggestions }))
}

#[cfg(test)]
mod tests {
    use crate::extractor::MealSlot;
    use crate::state::AppState;

    use super::*;

    #[tokio::test]
    async fn analyze_runs_without_io() {
        let state = AppState::fake();
        let Json(response) = analyze(
            State(state),
            Json(AnalyzeRequest {
                text: "ce soir 150g de riz".into(),
            }),
        )
        .await
        .expect("analyze should succeed");

        assert_eq!(response.meal, MealSlot::Dinner);
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.suggestions[0].quantity, 150);
    }

    #[tokio::test]
    async fn analyze_rejects_blank_text() {
        let state = AppState::fake();
        let (status, _) = analyze(State(state), Json(AnalyzeRequest { text: "   ".into() }))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unrecognized_text_yields_empty_suggestions() {
        let state = AppState::fake();
        let Json(response) = analyze(State(state), Json(AnalyzeRequest { text: "xyz".into() }))
            .await
            .expect("analyze should succeed");
        assert!(response.suggestions.is_empty());
        assert_eq!(response.meal, MealSlot::Lunch);
    }
}
