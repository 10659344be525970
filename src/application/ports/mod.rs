mod audio_decoder;
mod generation_backend;
mod personality_catalog;

pub use audio_decoder::{AudioDecoder, AudioDecoderError, DecodedAudio};
pub use generation_backend::{GenerationBackend, GenerationError};
pub use personality_catalog::PersonalityCatalog;
