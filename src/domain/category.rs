use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Meow category, declared in tie-break priority order.
///
/// The derived `Ord` follows declaration order, so iterating [`Category::ALL`]
/// visits the highest-priority category first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hungry,
    Angry,
    Playful,
    Sleepy,
    Attention,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Hungry,
        Category::Angry,
        Category::Playful,
        Category::Sleepy,
        Category::Attention,
    ];

    /// Category reported when no rule produces a positive score.
    pub const FALLBACK: Category = Category::Attention;

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hungry => "hungry",
            Category::Angry => "angry",
            Category::Playful => "playful",
            Category::Sleepy => "sleepy",
            Category::Attention => "attention",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Hungry => "Hungry cat meow",
            Category::Angry => "Angry/aggressive cat meow",
            Category::Playful => "Playful/excited cat meow",
            Category::Sleepy => "Sleepy/tired cat meow",
            Category::Attention => "Attention-seeking cat meow",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hungry" => Ok(Category::Hungry),
            "angry" => Ok(Category::Angry),
            "playful" => Ok(Category::Playful),
            "sleepy" => Ok(Category::Sleepy),
            "attention" => Ok(Category::Attention),
            other => Err(format!("Invalid category: {}", other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
