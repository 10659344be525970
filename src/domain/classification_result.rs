use std::collections::BTreeMap;

use serde::Serialize;

use super::category::Category;
use super::feature_vector::FeatureVector;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: f64,
    pub description: &'static str,
    pub all_scores: BTreeMap<Category, f64>,
    pub actual_duration: f64,
    pub features: FeatureVector,
}

impl ClassificationResult {
    pub fn score(&self, category: Category) -> f64 {
        self.all_scores.get(&category).copied().unwrap_or(0.0)
    }

    /// Short form stored in personality memory, e.g. `hungry (0.82)`.
    pub fn summary(&self) -> String {
        format!("{} ({:.2})", self.category, self.confidence)
    }
}
