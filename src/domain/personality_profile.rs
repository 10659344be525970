use serde::Serialize;

use super::personality_id::PersonalityId;

/// Caption voice as seen by the composer, plus display metadata for callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalityProfile {
    pub id: PersonalityId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub tone: String,
    pub prompt_fragment: String,
}

impl PersonalityProfile {
    /// Built-in profile for each personality.
    pub fn builtin(id: PersonalityId) -> Self {
        match id {
            PersonalityId::Diva => Self {
                id,
                name: "Diva".to_string(),
                description: "Dramatic and demanding cat".to_string(),
                emoji: "👑".to_string(),
                tone: "sassy, entitled and dramatic".to_string(),
                prompt_fragment: "You are a dramatic and demanding cat translator. Use words like \
                    \"unacceptable\", \"outrageous\", \"simply cannot\", \"how dare you\"."
                    .to_string(),
            },
            PersonalityId::Chill => Self {
                id,
                name: "Chill".to_string(),
                description: "Laid-back and philosophical cat".to_string(),
                emoji: "😎".to_string(),
                tone: "relaxed, wise and laid-back".to_string(),
                prompt_fragment: "You are a laid-back and philosophical cat translator. Use words \
                    like \"whatever\", \"cool\", \"man\", \"dude\", \"you know\"."
                    .to_string(),
            },
            PersonalityId::OldMan => Self {
                id,
                name: "Old Man".to_string(),
                description: "Grumpy and wise cat".to_string(),
                emoji: "👴".to_string(),
                tone: "grumpy, wise and nostalgic".to_string(),
                prompt_fragment: "You are a grumpy old cat translator. Use phrases like \"back in \
                    my day\", \"kids these days\", \"in my time\", \"youngsters\"."
                    .to_string(),
            },
        }
    }
}
