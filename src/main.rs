use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use meow2text::application::services::{MeowError, MeowTranslator};
use meow2text::infrastructure::audio::SymphoniaAudioDecoder;
use meow2text::infrastructure::generation::GenerationBackendFactory;
use meow2text::infrastructure::observability::{TracingConfig, init_tracing};
use meow2text::infrastructure::personality::StaticPersonalityCatalog;
use meow2text::presentation::{Cli, Command, Environment, ErrorBody, Settings, TranslateResponse};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        &settings.logging,
        environment.as_str(),
    ));

    let backend = GenerationBackendFactory::create(&settings.generation)
        .context("failed to create generation backend")?;
    let catalog = Arc::new(StaticPersonalityCatalog::from_settings(
        &settings.personalities,
    ));

    tracing::info!(
        backend = backend.name(),
        personalities = settings.personalities.enabled.len(),
        memory_capacity = settings.memory.capacity,
        "Meow translator ready"
    );

    let translator = MeowTranslator::new(
        Arc::new(SymphoniaAudioDecoder),
        backend,
        catalog,
        &settings,
    );

    match cli.command {
        Command::Classify { file, format } => {
            let data = read_clip(&file)?;
            let hint = format.or_else(|| extension_of(&file));
            match translator.classify(&data, hint.as_deref()).await {
                Ok(result) => print_json(&result)?,
                Err(e) => return report(e),
            }
        }
        Command::Translate {
            files,
            personality,
            format,
        } => {
            let profile = match translator.resolve_personality(&personality) {
                Ok(profile) => profile,
                Err(e) => return report(e),
            };

            for file in files {
                let data = read_clip(&file)?;
                let hint = format.clone().or_else(|| extension_of(&file));
                match translator.translate(&data, hint.as_deref(), &personality).await {
                    Ok(outcome) => {
                        print_json(&TranslateResponse::from_outcome(outcome, profile.id))?
                    }
                    Err(e) => {
                        tracing::warn!(file = %file.display(), error = %e, "Clip rejected");
                        print_json(&ErrorBody {
                            kind: e.kind(),
                            message: e.to_string(),
                        })?;
                    }
                }
            }

            tracing::info!(stats = ?translator.memory_stats(), "Memory usage");
        }
        Command::Personalities => print_json(&translator.personalities())?,
    }

    Ok(())
}

fn read_clip(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(error: MeowError) -> anyhow::Result<()> {
    print_json(&ErrorBody {
        kind: error.kind(),
        message: error.to_string(),
    })?;
    Err(error.into())
}
