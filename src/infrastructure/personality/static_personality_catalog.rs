use std::collections::BTreeMap;

use crate::application::ports::PersonalityCatalog;
use crate::domain::{PersonalityId, PersonalityProfile};
use crate::presentation::config::PersonalitySettings;

/// In-memory catalog built once from configuration.
#[derive(Debug, Clone)]
pub struct StaticPersonalityCatalog {
    profiles: BTreeMap<PersonalityId, PersonalityProfile>,
}

impl StaticPersonalityCatalog {
    pub fn new(profiles: impl IntoIterator<Item = PersonalityProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Enabled built-in profiles with any configured text overrides applied.
    pub fn from_settings(settings: &PersonalitySettings) -> Self {
        let profiles = settings.enabled.iter().map(|&id| {
            let mut profile = PersonalityProfile::builtin(id);
            if let Some(o) = settings.overrides.get(&id) {
                if let Some(name) = &o.name {
                    profile.name = name.clone();
                }
                if let Some(description) = &o.description {
                    profile.description = description.clone();
                }
                if let Some(emoji) = &o.emoji {
                    profile.emoji = emoji.clone();
                }
                if let Some(tone) = &o.tone {
                    profile.tone = tone.clone();
                }
                if let Some(fragment) = &o.prompt_fragment {
                    profile.prompt_fragment = fragment.clone();
                }
            }
            profile
        });

        Self::new(profiles)
    }
}

impl Default for StaticPersonalityCatalog {
    fn default() -> Self {
        Self::new(PersonalityId::ALL.map(PersonalityProfile::builtin))
    }
}

impl PersonalityCatalog for StaticPersonalityCatalog {
    fn profile(&self, id: PersonalityId) -> Option<PersonalityProfile> {
        self.profiles.get(&id).cloned()
    }

    fn profiles(&self) -> Vec<PersonalityProfile> {
        self.profiles.values().cloned().collect()
    }
}
