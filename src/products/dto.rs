use serde::{Deserialize, Serialize};

use crate::foodfacts::OffProduct;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Product flattened for the client. Unknown nutrient fields become zero
/// here so the UI never sees a hole.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub code: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub serving_size: Option<String>,
}

impl From<OffProduct> for ProductResponse {
    fn from(product: OffProduct) -> Self {
        let nutriments = product.nutriments.unwrap_or_default();
        Self {
            code: product.code,
            name: product.product_name,
            calories: nutriments.energy_kcal_100g.unwrap_or(0.0),
            protein: nutriments.proteins_100g.unwrap_or(0.0),
            carbs: nutriments.carbohydrates_100g.unwrap_or(0.0),
            fat: nutriments.fat_100g.unwrap_or(0.0),
            serving_size: product.serving_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_nutrients_flatten_to_zero() {
        let product: OffProduct =
            serde_json::from_str(r#"{ "product_name": "Eau de source", "code": "123" }"#).unwrap();
        let response = ProductResponse::from(product);
        assert_eq!(response.calories, 0.0);
        assert_eq!(response.protein, 0.0);
        assert_eq!(response.carbs, 0.0);
        assert_eq!(response.fat, 0.0);
    }
}
