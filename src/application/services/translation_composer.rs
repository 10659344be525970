use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{GenerationBackend, GenerationError};
use crate::application::services::generation_request::{GenerationRequest, clean_caption};
use crate::application::services::personality_memory::{MemoryError, PersonalityMemory};
use crate::domain::{ClassificationResult, MemoryEntry, PersonalityProfile, TranslationResult};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::GenerationSettings;

const MAX_GENERATION_ATTEMPTS: u32 = 2;
const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Deadline and retry budget for one backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_backoff: Duration,
}

impl GenerationPolicy {
    /// Attempts are clamped to 1..=2 and the backoff to at most two seconds.
    pub fn new(timeout: Duration, max_attempts: u32, retry_backoff: Duration) -> Self {
        Self {
            timeout,
            max_attempts: max_attempts.clamp(1, MAX_GENERATION_ATTEMPTS),
            retry_backoff: retry_backoff.min(MAX_RETRY_BACKOFF),
        }
    }
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self::from(&GenerationSettings::default())
    }
}

impl From<&GenerationSettings> for GenerationPolicy {
    fn from(settings: &GenerationSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.timeout_ms),
            settings.max_attempts,
            Duration::from_millis(settings.retry_backoff_ms),
        )
    }
}

/// Captions a classification in a personality's voice and remembers it.
pub struct TranslationComposer {
    backend: Arc<dyn GenerationBackend>,
    memory: Arc<PersonalityMemory>,
    history_window: usize,
    policy: GenerationPolicy,
}

impl TranslationComposer {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        memory: Arc<PersonalityMemory>,
        history_window: usize,
        policy: GenerationPolicy,
    ) -> Self {
        Self {
            backend,
            memory,
            history_window,
            policy,
        }
    }

    /// No memory lock is held while the backend runs: history is copied out
    /// first and the new entry is appended in one step after success. A
    /// cancelled call therefore leaves memory untouched.
    #[tracing::instrument(
        skip(self, classification, profile),
        fields(personality = %profile.id, category = %classification.category)
    )]
    pub async fn compose(
        &self,
        classification: &ClassificationResult,
        profile: &PersonalityProfile,
    ) -> Result<TranslationResult, TranslationError> {
        let history = self.memory.recent(profile.id, self.history_window)?;
        let prompt = GenerationRequest::new(classification, profile, &history).render();

        tracing::debug!(
            backend = self.backend.name(),
            history = history.len(),
            prompt = %sanitize_prompt(&prompt),
            "Generation request built"
        );

        let raw = self.generate_with_retry(&prompt).await?;
        let caption = clean_caption(&raw);
        if caption.is_empty() {
            return Err(TranslationError::EmptyCaption);
        }

        self.memory.append(
            profile.id,
            MemoryEntry::new(classification.summary(), caption.clone()),
        )?;

        tracing::info!(chars = caption.len(), "Caption generated");

        Ok(TranslationResult {
            caption,
            personality: profile.id,
            classification: classification.clone(),
        })
    }

    async fn generate_with_retry(&self, prompt: &str) -> Result<String, TranslationError> {
        let timeout = self.policy.timeout;
        let mut attempt = 1;

        loop {
            let outcome = tokio::time::timeout(timeout, self.backend.generate(prompt, timeout))
                .await
                .unwrap_or(Err(GenerationError::Timeout(timeout)));

            match outcome {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.policy.max_attempts => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        backoff_ms = self.policy.retry_backoff.as_millis(),
                        "Generation failed, retrying"
                    );
                    tokio::time::sleep(self.policy.retry_backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, attempt, "Generation failed");
                    return Err(TranslationError::Generation {
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("generation failed after {attempts} attempt(s): {source}")]
    Generation {
        attempts: u32,
        source: GenerationError,
    },
    #[error("generation backend returned an empty caption")]
    EmptyCaption,
}

impl TranslationError {
    /// Stable identifier for transport layers.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslationError::Memory(MemoryError::InvalidPersonality(_)) => "invalid_personality",
            TranslationError::Generation {
                source: GenerationError::Timeout(_),
                ..
            } => "generation_timeout",
            TranslationError::Generation {
                source: GenerationError::Unavailable(_),
                ..
            } => "generation_unavailable",
            TranslationError::EmptyCaption => "translation_failed",
        }
    }
}
