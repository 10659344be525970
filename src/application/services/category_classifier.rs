use std::collections::BTreeMap;

use crate::domain::{Category, ClassificationResult, FeatureVector};

use self::Feature::*;

/// Feature a scoring rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Duration,
    RmsEnergy,
    EnergyVariance,
    ZeroCrossingRate,
    FundamentalFrequency,
    SpectralCentroid,
}

impl Feature {
    pub fn value(&self, features: &FeatureVector) -> f64 {
        match self {
            Feature::Duration => features.duration,
            Feature::RmsEnergy => features.rms_energy,
            Feature::EnergyVariance => features.energy_variance,
            Feature::ZeroCrossingRate => features.zero_crossing_rate,
            Feature::FundamentalFrequency => features.fundamental_frequency_estimate,
            Feature::SpectralCentroid => features.spectral_centroid,
        }
    }
}

/// Full credit inside `[low, high]`, decaying linearly to zero `falloff`
/// units outside the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRule {
    pub feature: Feature,
    pub low: f64,
    pub high: f64,
    pub falloff: f64,
    pub weight: f64,
}

impl ScoringRule {
    pub const fn new(feature: Feature, low: f64, high: f64, falloff: f64, weight: f64) -> Self {
        Self {
            feature,
            low,
            high,
            falloff,
            weight,
        }
    }

    pub fn membership(&self, features: &FeatureVector) -> f64 {
        let value = self.feature.value(features);
        if !value.is_finite() {
            return 0.0;
        }

        let distance = if value < self.low {
            self.low - value
        } else if value > self.high {
            value - self.high
        } else {
            0.0
        };

        if distance == 0.0 {
            1.0
        } else if self.falloff <= 0.0 {
            0.0
        } else {
            (1.0 - distance / self.falloff).max(0.0)
        }
    }
}

pub type RuleTable = [(Category, &'static [ScoringRule])];

/// Target ranges at the canonical 16 kHz rate. Energy figures are RMS
/// amplitudes; `EnergyVariance` is the variance of 20 ms frame RMS values.
pub const DEFAULT_RULES: &RuleTable = &[
    (
        Category::Hungry,
        &[
            ScoringRule::new(EnergyVariance, 0.01, 0.06, 0.05, 0.35),
            ScoringRule::new(FundamentalFrequency, 400.0, 900.0, 400.0, 0.35),
            ScoringRule::new(RmsEnergy, 0.1, 0.5, 0.3, 0.15),
            ScoringRule::new(Duration, 0.5, 2.0, 1.5, 0.15),
        ],
    ),
    (
        Category::Angry,
        &[
            ScoringRule::new(ZeroCrossingRate, 0.15, 0.6, 0.15, 0.35),
            ScoringRule::new(RmsEnergy, 0.35, 1.0, 0.3, 0.35),
            ScoringRule::new(SpectralCentroid, 2500.0, 8000.0, 1500.0, 0.3),
        ],
    ),
    (
        Category::Playful,
        &[
            ScoringRule::new(FundamentalFrequency, 700.0, 2000.0, 500.0, 0.3),
            ScoringRule::new(Duration, 0.2, 1.6, 1.0, 0.2),
            ScoringRule::new(EnergyVariance, 0.04, 0.25, 0.04, 0.35),
            ScoringRule::new(ZeroCrossingRate, 0.04, 0.3, 0.1, 0.15),
        ],
    ),
    (
        Category::Sleepy,
        &[
            ScoringRule::new(RmsEnergy, 0.0, 0.12, 0.15, 0.35),
            ScoringRule::new(FundamentalFrequency, 0.0, 350.0, 300.0, 0.25),
            ScoringRule::new(Duration, 1.5, 30.0, 1.2, 0.25),
            ScoringRule::new(EnergyVariance, 0.0, 0.01, 0.02, 0.15),
        ],
    ),
    (
        Category::Attention,
        &[
            ScoringRule::new(RmsEnergy, 0.15, 0.5, 0.25, 0.3),
            ScoringRule::new(EnergyVariance, 0.005, 0.04, 0.03, 0.3),
            ScoringRule::new(FundamentalFrequency, 300.0, 800.0, 400.0, 0.2),
            ScoringRule::new(Duration, 0.8, 3.0, 1.5, 0.2),
        ],
    ),
];

/// Scores a [`FeatureVector`] against a rule table.
pub struct CategoryClassifier {
    rules: &'static RuleTable,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RULES)
    }
}

impl CategoryClassifier {
    pub fn new(rules: &'static RuleTable) -> Self {
        Self { rules }
    }

    pub fn classify(&self, features: &FeatureVector) -> ClassificationResult {
        let all_scores: BTreeMap<Category, f64> = Category::ALL
            .iter()
            .map(|&category| (category, self.score(category, features)))
            .collect();

        let (category, confidence) = select_top(&all_scores);

        tracing::debug!(
            category = %category,
            confidence,
            "Classified feature vector"
        );

        ClassificationResult {
            category,
            confidence,
            description: category.description(),
            all_scores,
            actual_duration: features.duration,
            features: *features,
        }
    }

    /// Weighted mean of rule memberships, in [0, 1]. Categories missing from
    /// the table score 0.
    pub fn score(&self, category: Category, features: &FeatureVector) -> f64 {
        let Some((_, rules)) = self.rules.iter().find(|(c, _)| *c == category) else {
            return 0.0;
        };

        let total_weight: f64 = rules.iter().map(|r| r.weight).sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        let weighted: f64 = rules
            .iter()
            .map(|r| r.weight * r.membership(features))
            .sum();

        (weighted / total_weight).clamp(0.0, 1.0)
    }
}

/// Highest score wins; `Category::ALL` order breaks exact ties. All-zero
/// scores fall back to [`Category::FALLBACK`] with confidence 0.
fn select_top(scores: &BTreeMap<Category, f64>) -> (Category, f64) {
    let mut best = (Category::FALLBACK, 0.0);

    for category in Category::ALL {
        let score = scores.get(&category).copied().unwrap_or(0.0);
        if score > best.1 {
            best = (category, score);
        }
    }

    best
}
