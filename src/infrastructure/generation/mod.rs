mod canned_backend;
mod generation_backend_factory;
mod ollama_backend;
mod openai_backend;

use std::time::Duration;

use crate::application::ports::GenerationError;

pub use canned_backend::CannedBackend;
pub use generation_backend_factory::GenerationBackendFactory;
pub use ollama_backend::OllamaBackend;
pub use openai_backend::OpenAiBackend;

fn map_transport_error(error: reqwest::Error, timeout: Duration) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout(timeout)
    } else {
        GenerationError::Unavailable(error.to_string())
    }
}
