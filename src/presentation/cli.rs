use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::application::services::MeowOutcome;
use crate::domain::{ClassificationResult, PersonalityId};

#[derive(Debug, Parser)]
#[command(name = "meow2text", version, about = "Translate your cat's meows to sassy text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a recorded meow.
    Classify {
        file: PathBuf,
        /// Container format; defaults to the file extension.
        #[arg(long)]
        format: Option<String>,
    },
    /// Classify and caption one or more meows in the same personality.
    Translate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, default_value = "chill")]
        personality: String,
        #[arg(long)]
        format: Option<String>,
    },
    /// List the configured personalities.
    Personalities,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub classification: ClassificationResult,
    pub personality: PersonalityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl TranslateResponse {
    pub fn from_outcome(outcome: MeowOutcome, personality: PersonalityId) -> Self {
        match outcome.translation {
            Ok(result) => Self {
                classification: outcome.classification,
                personality,
                translation: Some(result.caption),
                error: None,
            },
            Err(e) => Self {
                classification: outcome.classification,
                personality,
                translation: None,
                error: Some(ErrorBody {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            },
        }
    }
}
