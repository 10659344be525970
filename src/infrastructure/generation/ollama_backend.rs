use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::map_transport_error;
use crate::application::ports::{GenerationBackend, GenerationError};
use crate::presentation::config::GenerationSettings;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Local model served by Ollama's `/api/generate`.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaBackend {
    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, GenerationError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        tracing::debug!(model = %self.model, base_url = %self.base_url, "Sending prompt to Ollama");

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Unavailable(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| map_transport_error(e, timeout))?;

        Ok(generated.response)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
