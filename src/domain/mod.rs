mod category;
mod classification_result;
mod feature_vector;
mod memory_entry;
mod personality_id;
mod personality_profile;
mod translation_result;
mod waveform;

pub use category::Category;
pub use classification_result::ClassificationResult;
pub use feature_vector::FeatureVector;
pub use memory_entry::MemoryEntry;
pub use personality_id::PersonalityId;
pub use personality_profile::PersonalityProfile;
pub use translation_result::TranslationResult;
pub use waveform::Waveform;
