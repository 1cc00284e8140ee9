use serde::{Deserialize, Serialize};

use crate::extractor::{FoodSuggestion, MealSlot};

/// Body for POST /assistant/analyze: a free-text meal description.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// The detected meal slot plus zero or more recognized foods. An empty
/// list means nothing was recognized; the client owns the fallback copy.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub meal: MealSlot,
    pub suggestions: Vec<FoodSuggestion>,
}
