use std::time::Duration;

use async_trait::async_trait;

/// Text generation capability used to caption a classified meow.
///
/// Implementations should honour `timeout` on their own transport; callers
/// additionally bound the whole call with the same deadline.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, GenerationError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),
}

impl GenerationError {
    /// Both variants describe conditions that may clear on a second attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::Timeout(_) | GenerationError::Unavailable(_))
    }
}
