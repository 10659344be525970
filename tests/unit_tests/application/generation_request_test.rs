use std::collections::BTreeMap;

use meow2text::application::services::{
    CATEGORY_LINE_PREFIX, GenerationRequest, PERSONALITY_LINE_PREFIX, clean_caption,
};
use meow2text::domain::{
    Category, ClassificationResult, FeatureVector, MemoryEntry, PersonalityId, PersonalityProfile,
};

fn classification(category: Category, confidence: f64) -> ClassificationResult {
    let all_scores: BTreeMap<Category, f64> = Category::ALL
        .iter()
        .map(|&c| (c, if c == category { confidence } else { 0.1 }))
        .collect();

    ClassificationResult {
        category,
        confidence,
        description: category.description(),
        all_scores,
        actual_duration: 1.0,
        features: FeatureVector::default(),
    }
}

#[test]
fn given_classification_and_profile_when_rendering_then_prompt_carries_both() {
    let profile = PersonalityProfile::builtin(PersonalityId::Diva);
    let request = GenerationRequest::new(&classification(Category::Hungry, 0.823), &profile, &[]);

    let prompt = request.render();

    assert!(prompt.starts_with(&profile.prompt_fragment));
    assert!(prompt.contains(&format!("{} diva", PERSONALITY_LINE_PREFIX)));
    assert!(prompt.contains(&format!("{} hungry", CATEGORY_LINE_PREFIX)));
    assert!(prompt.contains("Confidence: 0.82"));
    assert!(prompt.contains("Hungry cat meow"));
    assert!(prompt.contains(&profile.tone));
    assert!(prompt.ends_with("Cat's Translation:"));
}

#[test]
fn given_no_history_when_rendering_then_prompt_omits_history_block() {
    let profile = PersonalityProfile::builtin(PersonalityId::Chill);
    let request = GenerationRequest::new(&classification(Category::Sleepy, 0.5), &profile, &[]);

    assert!(!request.render().contains("Recent translations"));
}

#[test]
fn given_history_when_rendering_then_lists_prior_captions_oldest_first() {
    let profile = PersonalityProfile::builtin(PersonalityId::OldMan);
    let history = vec![
        MemoryEntry::new("hungry (0.70)".to_string(), "Feed me, youngster.".to_string()),
        MemoryEntry::new("angry (0.90)".to_string(), "Respect your elders!".to_string()),
    ];
    let request =
        GenerationRequest::new(&classification(Category::Playful, 0.6), &profile, &history);

    let prompt = request.render();
    let first = prompt.find("Feed me, youngster.").unwrap();
    let second = prompt.find("Respect your elders!").unwrap();

    assert!(prompt.contains("Recent translations from this cat, oldest first:"));
    assert!(prompt.contains("- hungry (0.70): \"Feed me, youngster.\""));
    assert!(first < second);
}

#[test]
fn given_long_prior_caption_when_building_request_then_truncates_history_line() {
    let profile = PersonalityProfile::builtin(PersonalityId::Chill);
    let history = vec![MemoryEntry::new(
        "playful (0.80)".to_string(),
        "é".repeat(300),
    )];

    let request =
        GenerationRequest::new(&classification(Category::Playful, 0.8), &profile, &history);

    assert!(request.history[0].chars().count() < 160);
    assert!(request.history[0].ends_with("...\""));
}

#[test]
fn given_echoed_label_when_cleaning_caption_then_strips_it() {
    assert_eq!(
        clean_caption("Cat's Translation: Feed me now."),
        "Feed me now."
    );
}

#[test]
fn given_quoted_padded_caption_when_cleaning_then_strips_quotes_and_whitespace() {
    assert_eq!(clean_caption("  \"Whatever, man.\"\n"), "Whatever, man.");
}

#[test]
fn given_whitespace_only_caption_when_cleaning_then_returns_empty() {
    assert_eq!(clean_caption(" \n\t "), "");
}
