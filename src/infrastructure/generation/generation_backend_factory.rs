use std::sync::Arc;

use crate::application::ports::{GenerationBackend, GenerationError};
use crate::presentation::config::{GenerationProvider, GenerationSettings};

use super::canned_backend::CannedBackend;
use super::ollama_backend::OllamaBackend;
use super::openai_backend::OpenAiBackend;

pub struct GenerationBackendFactory;

impl GenerationBackendFactory {
    pub fn create(
        settings: &GenerationSettings,
    ) -> Result<Arc<dyn GenerationBackend>, GenerationError> {
        match settings.provider {
            GenerationProvider::OpenAi => {
                if settings.api_key.trim().is_empty() {
                    return Err(GenerationError::Unavailable(
                        "API key required for the openai provider".to_string(),
                    ));
                }
                Ok(Arc::new(OpenAiBackend::new(settings)))
            }
            GenerationProvider::Ollama => Ok(Arc::new(OllamaBackend::new(settings))),
            GenerationProvider::Canned => Ok(Arc::new(CannedBackend)),
        }
    }
}
