use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Caption voice. Unknown identifiers never parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityId {
    Diva,
    Chill,
    OldMan,
}

impl PersonalityId {
    pub const ALL: [PersonalityId; 3] = [
        PersonalityId::Diva,
        PersonalityId::Chill,
        PersonalityId::OldMan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityId::Diva => "diva",
            PersonalityId::Chill => "chill",
            PersonalityId::OldMan => "old_man",
        }
    }
}

impl FromStr for PersonalityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diva" => Ok(PersonalityId::Diva),
            "chill" => Ok(PersonalityId::Chill),
            "old_man" | "oldman" => Ok(PersonalityId::OldMan),
            other => Err(format!(
                "Invalid personality: {}. Expected: diva, chill, or old_man",
                other
            )),
        }
    }
}

impl fmt::Display for PersonalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
