use crate::domain::{
    Category, ClassificationResult, MemoryEntry, PersonalityId, PersonalityProfile,
};

pub const PERSONALITY_LINE_PREFIX: &str = "Personality:";
pub const CATEGORY_LINE_PREFIX: &str = "Meow Category:";

const MAX_HISTORY_CAPTION_CHARS: usize = 120;
const CAPTION_LABEL: &str = "Cat's Translation:";

/// Everything the backend needs to caption one meow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub personality: PersonalityId,
    pub category: Category,
    pub confidence: f64,
    pub description: String,
    pub tone: String,
    pub prompt_fragment: String,
    /// Condensed prior captions for this personality, oldest first.
    pub history: Vec<String>,
}

impl GenerationRequest {
    pub fn new(
        classification: &ClassificationResult,
        profile: &PersonalityProfile,
        history: &[MemoryEntry],
    ) -> Self {
        Self {
            personality: profile.id,
            category: classification.category,
            confidence: classification.confidence,
            description: classification.description.to_string(),
            tone: profile.tone.clone(),
            prompt_fragment: profile.prompt_fragment.clone(),
            history: history
                .iter()
                .map(|entry| {
                    format!(
                        "{}: \"{}\"",
                        entry.summary,
                        truncate_chars(&entry.caption, MAX_HISTORY_CAPTION_CHARS)
                    )
                })
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut prompt = format!(
            "{}\nTranslate the cat's meow into {} cat speak.\n\n\
             {} {}\n{} {}\nConfidence: {:.2}\nDescription: {}\n\n",
            self.prompt_fragment,
            self.tone,
            PERSONALITY_LINE_PREFIX,
            self.personality,
            CATEGORY_LINE_PREFIX,
            self.category,
            self.confidence,
            self.description
        );

        if !self.history.is_empty() {
            prompt.push_str("Recent translations from this cat, oldest first:\n");
            for line in &self.history {
                prompt.push_str("- ");
                prompt.push_str(line);
                prompt.push('\n');
            }
            prompt.push_str("Feel free to call back to them, but do not repeat them.\n\n");
        }

        prompt.push_str("Keep it to one or two sentences.\n\n");
        prompt.push_str(CAPTION_LABEL);
        prompt
    }
}

/// Trims backend output and drops an echoed `Cat's Translation:` label.
pub fn clean_caption(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_label = trimmed
        .strip_prefix(CAPTION_LABEL)
        .unwrap_or(trimmed)
        .trim();

    without_label
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(without_label)
        .trim()
        .to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
