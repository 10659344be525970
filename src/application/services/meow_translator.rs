use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{Instrument, Span};

use crate::application::ports::{AudioDecoder, GenerationBackend, PersonalityCatalog};
use crate::application::services::audio_ingestor::{AudioIngestor, IngestError};
use crate::application::services::category_classifier::CategoryClassifier;
use crate::application::services::feature_extractor::FeatureExtractor;
use crate::application::services::personality_memory::PersonalityMemory;
use crate::application::services::translation_composer::{
    GenerationPolicy, TranslationComposer, TranslationError,
};
use crate::domain::{ClassificationResult, PersonalityId, PersonalityProfile, TranslationResult};
use crate::infrastructure::observability::RequestId;
use crate::presentation::config::Settings;

/// Where a request currently is. Logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Decoding,
    Extracting,
    Classifying,
    Classified,
    Composing,
    Translated,
    TranslationFailed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Decoding => "decoding",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Classifying => "classifying",
            PipelineStage::Classified => "classified",
            PipelineStage::Composing => "composing",
            PipelineStage::Translated => "translated",
            PipelineStage::TranslationFailed => "translation_failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a translate request. The classification is always present; the
/// caption may have failed independently.
#[derive(Debug)]
pub struct MeowOutcome {
    pub classification: ClassificationResult,
    pub translation: Result<TranslationResult, TranslationError>,
}

impl MeowOutcome {
    pub fn caption(&self) -> Option<&str> {
        self.translation.as_ref().ok().map(|t| t.caption.as_str())
    }
}

/// Decode, extract and classify. Pure CPU work, run off the async workers.
struct ClassificationStages {
    ingestor: AudioIngestor,
    extractor: FeatureExtractor,
    classifier: CategoryClassifier,
}

impl ClassificationStages {
    fn run(
        &self,
        data: &[u8],
        format_hint: Option<&str>,
    ) -> Result<ClassificationResult, MeowError> {
        tracing::debug!(stage = %PipelineStage::Decoding, "Pipeline stage");
        let waveform = self.ingestor.ingest(data, format_hint)?;

        tracing::debug!(stage = %PipelineStage::Extracting, "Pipeline stage");
        let features = self.extractor.extract(&waveform);
        drop(waveform);

        tracing::debug!(stage = %PipelineStage::Classifying, "Pipeline stage");
        let classification = self.classifier.classify(&features);

        tracing::info!(
            stage = %PipelineStage::Classified,
            category = %classification.category,
            confidence = classification.confidence,
            duration = classification.actual_duration,
            "Meow classified"
        );

        Ok(classification)
    }
}

/// Process-wide pipeline context. Build once at startup and share by `Arc`.
pub struct MeowTranslator {
    stages: Arc<ClassificationStages>,
    catalog: Arc<dyn PersonalityCatalog>,
    memory: Arc<PersonalityMemory>,
    composer: TranslationComposer,
}

impl MeowTranslator {
    pub fn new(
        decoder: Arc<dyn AudioDecoder>,
        backend: Arc<dyn GenerationBackend>,
        catalog: Arc<dyn PersonalityCatalog>,
        settings: &Settings,
    ) -> Self {
        let memory = Arc::new(PersonalityMemory::new(
            catalog.ids(),
            settings.memory.capacity,
        ));

        let composer = TranslationComposer::new(
            backend,
            Arc::clone(&memory),
            settings.memory.history_window,
            GenerationPolicy::from(&settings.generation),
        );

        Self {
            stages: Arc::new(ClassificationStages {
                ingestor: AudioIngestor::new(decoder, settings.audio.clone()),
                extractor: FeatureExtractor::new(),
                classifier: CategoryClassifier::default(),
            }),
            catalog,
            memory,
            composer,
        }
    }

    /// Decode, extract and classify. Never retried: the stages are deterministic.
    pub async fn classify(
        &self,
        data: &[u8],
        format_hint: Option<&str>,
    ) -> Result<ClassificationResult, MeowError> {
        let span = tracing::info_span!("classify", request_id = %RequestId::new());
        self.run_classification(data, format_hint)
            .instrument(span)
            .await
    }

    /// Classify, then caption in the requested personality's voice.
    ///
    /// The personality is resolved before any audio work, so an unknown id
    /// fails without touching the decoder or the generation backend.
    pub async fn translate(
        &self,
        data: &[u8],
        format_hint: Option<&str>,
        personality: &str,
    ) -> Result<MeowOutcome, MeowError> {
        let span = tracing::info_span!(
            "translate",
            request_id = %RequestId::new(),
            personality = %personality
        );

        async move {
            let profile = self.resolve_personality(personality)?;
            let classification = self.run_classification(data, format_hint).await?;

            tracing::debug!(stage = %PipelineStage::Composing, "Pipeline stage");
            let translation = self.composer.compose(&classification, &profile).await;

            match &translation {
                Ok(_) => tracing::debug!(stage = %PipelineStage::Translated, "Pipeline stage"),
                Err(e) => tracing::warn!(
                    stage = %PipelineStage::TranslationFailed,
                    error = %e,
                    kind = e.kind(),
                    "Translation failed, returning classification only"
                ),
            }

            Ok::<_, MeowError>(MeowOutcome {
                classification,
                translation,
            })
        }
        .instrument(span)
        .await
    }

    pub fn resolve_personality(&self, raw: &str) -> Result<PersonalityProfile, MeowError> {
        let id: PersonalityId = raw
            .parse()
            .map_err(|_| MeowError::InvalidPersonality(raw.to_string()))?;

        self.catalog
            .profile(id)
            .ok_or_else(|| MeowError::InvalidPersonality(raw.to_string()))
    }

    pub fn personalities(&self) -> Vec<PersonalityProfile> {
        self.catalog.profiles()
    }

    pub fn memory_stats(&self) -> BTreeMap<PersonalityId, usize> {
        self.memory.stats()
    }

    async fn run_classification(
        &self,
        data: &[u8],
        format_hint: Option<&str>,
    ) -> Result<ClassificationResult, MeowError> {
        let stages = Arc::clone(&self.stages);
        let data = data.to_vec();
        let format_hint = format_hint.map(str::to_owned);
        let span = Span::current();

        tokio::task::spawn_blocking(move || {
            span.in_scope(|| stages.run(&data, format_hint.as_deref()))
        })
        .await
        .map_err(|e| MeowError::Internal(format!("classification task failed: {e}")))?
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MeowError {
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
    #[error("silent audio: peak frame energy {peak_energy:.2e}")]
    Silent { peak_energy: f64 },
    #[error("unknown personality: {0}")]
    InvalidPersonality(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl MeowError {
    /// Stable identifier for transport layers.
    pub fn kind(&self) -> &'static str {
        match self {
            MeowError::InvalidAudio(_) => "invalid_audio",
            MeowError::Silent { .. } => "silent_audio",
            MeowError::InvalidPersonality(_) => "invalid_personality",
            MeowError::Internal(_) => "internal_error",
        }
    }
}

impl From<IngestError> for MeowError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::InvalidAudio(reason) => MeowError::InvalidAudio(reason),
            IngestError::Silent { peak_energy } => MeowError::Silent { peak_energy },
        }
    }
}
