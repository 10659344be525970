mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, GenerationProvider, GenerationSettings, LoggingSettings, MemorySettings,
    PersonalityOverride, PersonalitySettings, Settings,
};
