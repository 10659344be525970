use serde::Serialize;

use super::classification_result::ClassificationResult;
use super::personality_id::PersonalityId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub caption: String,
    pub personality: PersonalityId,
    pub classification: ClassificationResult,
}
