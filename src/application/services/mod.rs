mod audio_ingestor;
mod category_classifier;
mod feature_extractor;
mod generation_request;
mod meow_translator;
mod personality_memory;
mod translation_composer;

pub use audio_ingestor::{
    AudioIngestor, IngestError, SILENCE_ENERGY_EPSILON, normalize_format_hint,
};
pub use category_classifier::{CategoryClassifier, DEFAULT_RULES, Feature, RuleTable, ScoringRule};
pub use feature_extractor::{FRAME_MS, FeatureExtractor, HOP_MS, frame_energies};
pub use generation_request::{
    CATEGORY_LINE_PREFIX, GenerationRequest, PERSONALITY_LINE_PREFIX, clean_caption,
};
pub use meow_translator::{MeowError, MeowOutcome, MeowTranslator, PipelineStage};
pub use personality_memory::{MemoryError, PersonalityMemory};
pub use translation_composer::{GenerationPolicy, TranslationComposer, TranslationError};
