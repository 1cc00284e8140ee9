//! Free-text meal analysis: meal-slot detection, keyword matching against
//! the knowledge table, quantity extraction and scaling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::table::FoodTable;

/// Reference serving size of every table entry; matches without an
/// explicit quantity default to it.
pub const DEFAULT_QUANTITY: u32 = 100;

const BREAKFAST_KEYWORDS: &[&str] = &["petit-déjeuner", "matin"];
const DINNER_KEYWORDS: &[&str] = &["dîner", "soir"];
const SNACK_KEYWORDS: &[&str] = &["collation", "goûter"];

/// Meal slot a food entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealSlot {
    #[serde(rename = "petit-déjeuner")]
    Breakfast,
    #[serde(rename = "déjeuner")]
    Lunch,
    #[serde(rename = "dîner")]
    Dinner,
    #[serde(rename = "collation")]
    Snack,
}

impl MealSlot {
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "petit-déjeuner",
            MealSlot::Lunch => "déjeuner",
            MealSlot::Dinner => "dîner",
            MealSlot::Snack => "collation",
        }
    }

    /// Stored-label conversion; anything unrecognized lands on lunch,
    /// the same default the detector uses.
    pub fn from_label(label: &str) -> Self {
        match label {
            "petit-déjeuner" => MealSlot::Breakfast,
            "dîner" => MealSlot::Dinner,
            "collation" => MealSlot::Snack,
            _ => MealSlot::Lunch,
        }
    }
}

/// Scans lowercased input for meal-slot keywords. Breakfast wins over
/// dinner wins over snack when several slots are mentioned; anything else
/// is lunch. The order is part of the observable behavior.
pub fn detect_meal_slot(lowered: &str) -> MealSlot {
    let mentions = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));
    if mentions(BREAKFAST_KEYWORDS) {
        MealSlot::Breakfast
    } else if mentions(DINNER_KEYWORDS) {
        MealSlot::Dinner
    } else if mentions(SNACK_KEYWORDS) {
        MealSlot::Snack
    } else {
        MealSlot::Lunch
    }
}

/// One recognized food, scaled to the extracted quantity. Ephemeral until
/// the user accepts it into the journal.
#[derive(Debug, Clone, Serialize)]
pub struct FoodSuggestion {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub category: String,
    pub meal: MealSlot,
    pub confidence: f64,
}

/// Runs the full extraction pass over a free-text meal description.
///
/// Every table entry whose keywords appear in the input contributes one
/// suggestion, in table order, with no deduplication. An empty result is
/// the normal "nothing recognized" outcome, not an error.
///
/// Confidence is uniform in [0.8, 1.0) from the caller's rng and carries
/// no information about match quality; it exists for display only.
pub fn analyze_meal<R: Rng>(text: &str, table: &FoodTable, rng: &mut R) -> Vec<FoodSuggestion> {
    let lowered = text.to_lowercase();
    let meal = detect_meal_slot(&lowered);

    let mut suggestions = Vec::new();
    for entry in table.entries() {
        if !entry.matches(&lowered) {
            continue;
        }
        let quantity = entry.quantity.extract(&lowered).unwrap_or(DEFAULT_QUANTITY);
        let multiplier = f64::from(quantity) / f64::from(DEFAULT_QUANTITY);
        let record = &entry.record;
        suggestions.push(FoodSuggestion {
            name: record.name.clone(),
            quantity,
            unit: record.unit.clone(),
            calories: record.calories * multiplier,
            protein: record.protein * multiplier,
            carbs: record.carbs * multiplier,
            fat: record.fat * multiplier,
            category: record.category.clone(),
            meal,
            confidence: rng.gen_range(0.8..1.0),
        });
    }
    suggestions
}

// === Unit Tests ===

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn table() -> FoodTable {
        FoodTable::builtin().expect("builtin table is valid")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn rice_and_chicken_sentence() {
        let suggestions = analyze_meal(
            "j'ai mangé 150g de riz avec du poulet",
            &table(),
            &mut rng(),
        );
        assert_eq!(suggestions.len(), 2);

        let rice = &suggestions[0];
        assert_eq!(rice.name, "Riz blanc cuit");
        assert_eq!(rice.quantity, 150);
        assert_eq!(rice.unit, "100g");
        assert!((rice.calories - 195.0).abs() < 1e-9); // 130 * 1.5
        assert!((rice.carbs - 42.0).abs() < 1e-9);
        assert_eq!(rice.meal, MealSlot::Lunch);

        let chicken = &suggestions[1];
        assert_eq!(chicken.name, "Blanc de poulet");
        assert_eq!(chicken.quantity, 100);
        assert!((chicken.calories - 165.0).abs() < 1e-9);
        assert_eq!(chicken.meal, MealSlot::Lunch);
    }

    #[test]
    fn unmatched_text_yields_nothing() {
        let suggestions = analyze_meal("xyz", &table(), &mut rng());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn breakfast_beats_dinner_when_both_present() {
        assert_eq!(
            detect_meal_slot("ce matin et ce soir j'ai mangé pareil"),
            MealSlot::Breakfast
        );
    }

    #[test]
    fn slot_priority_chain() {
        assert_eq!(detect_meal_slot("au petit-déjeuner"), MealSlot::Breakfast);
        assert_eq!(detect_meal_slot("ce soir au dîner"), MealSlot::Dinner);
        assert_eq!(detect_meal_slot("une collation rapide"), MealSlot::Snack);
        assert_eq!(detect_meal_slot("goûter avec les enfants"), MealSlot::Snack);
        assert_eq!(detect_meal_slot("à midi"), MealSlot::Lunch);
    }

    #[test]
    fn slot_applies_to_every_suggestion() {
        let suggestions = analyze_meal(
            "ce soir: saumon et brocoli",
            &table(),
            &mut rng(),
        );
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.meal == MealSlot::Dinner));
    }

    #[test]
    fn suggestions_come_back_in_table_order() {
        // Mentioned chicken first, but pasta sits earlier in the table.
        let suggestions = analyze_meal("du poulet avec des pâtes", &table(), &mut rng());
        let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Pâtes cuites", "Blanc de poulet"]);
    }

    #[test]
    fn compound_word_still_matches() {
        let suggestions = analyze_meal("pâtescarbonara", &table(), &mut rng());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Pâtes cuites");
        assert_eq!(suggestions[0].quantity, DEFAULT_QUANTITY);
    }

    #[test]
    fn bare_count_scales_against_reference_quantity() {
        // "2 bananes" reads as quantity 2 of the 100g reference; the scale
        // factor is 0.02. A coarse heuristic, but the established one.
        let suggestions = analyze_meal("2 bananes", &table(), &mut rng());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].quantity, 2);
        assert!((suggestions[0].calories - 89.0 * 0.02).abs() < 1e-9);
    }

    #[test]
    fn overlapping_keywords_each_contribute() {
        // "bœuf" contains "œuf": both entries match, no mutual exclusion.
        let suggestions = analyze_meal("du bœuf haché", &table(), &mut rng());
        let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Œufs", "Bœuf haché 5%"]);
    }

    #[test]
    fn confidence_stays_in_band() {
        let mut rng = rng();
        for _ in 0..50 {
            let suggestions = analyze_meal("du riz", &table(), &mut rng);
            let confidence = suggestions[0].confidence;
            assert!((0.8..1.0).contains(&confidence), "confidence {confidence}");
        }
    }

    #[test]
    fn same_seed_same_confidence() {
        let a = analyze_meal("du riz", &table(), &mut rng());
        let b = analyze_meal("du riz", &table(), &mut rng());
        assert_eq!(a[0].confidence, b[0].confidence);
    }

    #[test]
    fn meal_slot_labels_round_trip() {
        for slot in [
            MealSlot::Breakfast,
            MealSlot::Lunch,
            MealSlot::Dinner,
            MealSlot::Snack,
        ] {
            assert_eq!(MealSlot::from_label(slot.label()), slot);
        }
        assert_eq!(MealSlot::from_label("brunch"), MealSlot::Lunch);
    }

    #[test]
    fn meal_slot_serializes_to_french_label() {
        let json = serde_json::to_string(&MealSlot::Breakfast).unwrap();
        assert_eq!(json, "\"petit-déjeuner\"");
    }
}
