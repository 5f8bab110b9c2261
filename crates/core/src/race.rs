use crate::rng::RngState;
use serde::{Deserialize, Serialize};

/// A selectable race, including the host's own "roll for me" value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Race {
    Zerg,
    Terran,
    Protoss,
    Random,
}

impl Race {
    /// Numeric id the host uses for roster widgets and outbound commands.
    pub fn wire_value(self) -> u32 {
        match self {
            Self::Zerg => 0,
            Self::Terran => 1,
            Self::Protoss => 2,
            Self::Random => 6,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "ZERG" => Some(Self::Zerg),
            "TERRAN" => Some(Self::Terran),
            "PROTOSS" => Some(Self::Protoss),
            "RANDOM" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Parsed race configuration token. Unknown spellings are not an error: they
/// resolve to "leave the race alone".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RaceToken {
    Named(Race),
    RandomTerranProtoss,
    RandomTerranZerg,
    RandomProtossZerg,
    Unknown,
}

impl RaceToken {
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "RANDOMTP" => Self::RandomTerranProtoss,
            "RANDOMTZ" => Self::RandomTerranZerg,
            "RANDOMPZ" => Self::RandomProtossZerg,
            other => match Race::from_token(other) {
                Some(race) => Self::Named(race),
                None => Self::Unknown,
            },
        }
    }

    /// Composite tokens roll 50/50 freshly on every call; `None` means "do
    /// not attempt to change race".
    pub fn resolve(self, rng: &mut RngState) -> Option<Race> {
        match self {
            Self::Named(race) => Some(race),
            Self::RandomTerranProtoss => Some(rng.either(Race::Terran, Race::Protoss)),
            Self::RandomTerranZerg => Some(rng.either(Race::Terran, Race::Zerg)),
            Self::RandomProtossZerg => Some(rng.either(Race::Protoss, Race::Zerg)),
            Self::Unknown => None,
        }
    }

    /// Whether an observed race already satisfies this token.
    pub fn admits(self, race: Race) -> bool {
        match self {
            Self::Named(named) => race == named,
            Self::RandomTerranProtoss => matches!(race, Race::Terran | Race::Protoss),
            Self::RandomTerranZerg => matches!(race, Race::Terran | Race::Zerg),
            Self::RandomProtossZerg => matches!(race, Race::Protoss | Race::Zerg),
            Self::Unknown => false,
        }
    }
}
