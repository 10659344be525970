use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{GenerationBackend, GenerationError};
use crate::application::services::{CATEGORY_LINE_PREFIX, PERSONALITY_LINE_PREFIX};
use crate::domain::{Category, PersonalityId};

/// Offline backend answering from a fixed phrase table.
///
/// Reads the `Personality:` and `Meow Category:` lines of the rendered
/// prompt; anything unrecognised falls back to the chill/playful phrase.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedBackend;

impl CannedBackend {
    pub fn phrase(personality: PersonalityId, category: Category) -> &'static str {
        use Category::*;
        use PersonalityId::*;

        match (personality, category) {
            (Diva, Hungry) => "Unacceptable! Where is my dinner? I demand to be fed immediately!",
            (Diva, Angry) => "How dare you! This is absolutely outrageous behavior!",
            (Diva, Playful) => "Entertain me, peasant! I require amusement at once!",
            (Diva, Sleepy) => "I shall rest now. Do not disturb my royal slumber.",
            (Diva, Attention) => "Pay attention to me! I am the most important being here!",
            (Chill, Hungry) => "Hey man, food would be pretty cool right now.",
            (Chill, Angry) => "Whatever, dude. I'm just saying.",
            (Chill, Playful) => "This is fun, you know? Life's good.",
            (Chill, Sleepy) => "I'm just gonna take a little nap, man.",
            (Chill, Attention) => "Hey, what's up? Just hanging out.",
            (OldMan, Hungry) => {
                "Back in my day, we had proper feeding schedules. Kids these days..."
            }
            (OldMan, Angry) => "Youngsters don't understand respect anymore. In my time...",
            (OldMan, Playful) => "I remember when I was young and spry. Those were the days.",
            (OldMan, Sleepy) => "An old cat needs his rest. Don't wake me up.",
            (OldMan, Attention) => "In my day, cats got the attention they deserved.",
        }
    }
}

#[async_trait]
impl GenerationBackend for CannedBackend {
    async fn generate(&self, prompt: &str, _timeout: Duration) -> Result<String, GenerationError> {
        let personality = prompt_field(prompt, PERSONALITY_LINE_PREFIX)
            .and_then(|v| v.parse().ok())
            .unwrap_or(PersonalityId::Chill);
        let category = prompt_field(prompt, CATEGORY_LINE_PREFIX)
            .and_then(|v| v.parse().ok())
            .unwrap_or(Category::Playful);

        Ok(Self::phrase(personality, category).to_string())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

fn prompt_field<'a>(prompt: &'a str, prefix: &str) -> Option<&'a str> {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix(prefix))
        .map(str::trim)
}
