use std::collections::BTreeMap;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;
use crate::domain::PersonalityId;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub memory: MemorySettings,
    pub generation: GenerationSettings,
    pub personalities: PersonalitySettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{environment}` and `APP_*` variables over the defaults.
    ///
    /// Nested keys use a double underscore, e.g. `APP_GENERATION__PROVIDER=openai`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("audio.supported_formats")
                    .with_list_parse_key("personalities.enabled")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub sample_rate: u32,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub max_file_size_bytes: usize,
    pub supported_formats: Vec<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            min_duration_secs: 0.1,
            max_duration_secs: 30.0,
            max_file_size_bytes: 10 * 1024 * 1024,
            supported_formats: ["wav", "mp3", "m4a", "flac", "webm", "mp4", "ogg"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemorySettings {
    /// Entries kept per personality before the oldest is evicted.
    pub capacity: usize,
    /// Entries handed to the composer as prior context.
    pub history_window: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            capacity: 10,
            history_window: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Ollama,
    Canned,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub provider: GenerationProvider,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Canned,
            api_key: String::new(),
            base_url: None,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.8,
            max_tokens: 150,
            timeout_ms: 15_000,
            max_attempts: 2,
            retry_backoff_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersonalitySettings {
    pub enabled: Vec<PersonalityId>,
    pub overrides: BTreeMap<PersonalityId, PersonalityOverride>,
}

impl Default for PersonalitySettings {
    fn default() -> Self {
        Self {
            enabled: PersonalityId::ALL.to_vec(),
            overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonalityOverride {
    pub name: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub tone: Option<String>,
    pub prompt_fragment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
