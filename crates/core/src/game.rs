use serde::{Deserialize, Serialize};

/// Host game-type enumeration with its wire ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameType {
    Melee,
    FreeForAll,
    OneOnOne,
    CaptureTheFlag,
    Greed,
    Slaughter,
    SuddenDeath,
    UseMapSettings,
    TeamMelee,
    TeamFreeForAll,
    TeamCaptureTheFlag,
    TopVsBottom,
}

impl GameType {
    pub fn wire_value(self) -> u32 {
        match self {
            Self::Melee => 0x02,
            Self::FreeForAll => 0x03,
            Self::OneOnOne => 0x04,
            Self::CaptureTheFlag => 0x05,
            Self::Greed => 0x06,
            Self::Slaughter => 0x07,
            Self::SuddenDeath => 0x08,
            Self::UseMapSettings => 0x0A,
            Self::TeamMelee => 0x0B,
            Self::TeamFreeForAll => 0x0C,
            Self::TeamCaptureTheFlag => 0x0D,
            Self::TopVsBottom => 0x0F,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "MELEE" => Some(Self::Melee),
            "FREE_FOR_ALL" => Some(Self::FreeForAll),
            "ONE_ON_ONE" => Some(Self::OneOnOne),
            "CAPTURE_THE_FLAG" => Some(Self::CaptureTheFlag),
            "GREED" => Some(Self::Greed),
            "SLAUGHTER" => Some(Self::Slaughter),
            "SUDDEN_DEATH" => Some(Self::SuddenDeath),
            "USE_MAP_SETTINGS" => Some(Self::UseMapSettings),
            "TEAM_MELEE" => Some(Self::TeamMelee),
            "TEAM_FREE_FOR_ALL" => Some(Self::TeamFreeForAll),
            "TEAM_CAPTURE_THE_FLAG" => Some(Self::TeamCaptureTheFlag),
            "TOP_VS_BOTTOM" => Some(Self::TopVsBottom),
            _ => None,
        }
    }
}

/// Automation mode. Unrecognized non-empty tokens behave like the
/// direct-connect multiplayer path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MenuMode {
    Off,
    SinglePlayer,
    Lan,
    BattleNet,
}

impl MenuMode {
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "" | "OFF" => Self::Off,
            "SINGLE_PLAYER" => Self::SinglePlayer,
            "BATTLE_NET" => Self::BattleNet,
            _ => Self::Lan,
        }
    }

    pub fn enabled(self) -> bool {
        self != Self::Off
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MapIteration {
    Random,
    Sequence,
}

impl MapIteration {
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("SEQUENCE") {
            Self::Sequence
        } else {
            Self::Random
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tokens() {
        assert_eq!(MenuMode::parse(""), MenuMode::Off);
        assert_eq!(MenuMode::parse("off"), MenuMode::Off);
        assert_eq!(MenuMode::parse("SINGLE_PLAYER"), MenuMode::SinglePlayer);
        assert_eq!(MenuMode::parse("BATTLE_NET"), MenuMode::BattleNet);
        assert_eq!(MenuMode::parse("LAN"), MenuMode::Lan);
        assert_eq!(MenuMode::parse("UDP"), MenuMode::Lan);
    }

    #[test]
    fn game_type_round_trip() {
        assert_eq!(GameType::from_token("melee"), Some(GameType::Melee));
        assert_eq!(GameType::Melee.wire_value(), 0x02);
        assert_eq!(
            GameType::from_token("TOP_VS_BOTTOM"),
            Some(GameType::TopVsBottom)
        );
        assert_eq!(GameType::from_token("LADDER"), None);
    }

    #[test]
    fn iteration_defaults_to_random() {
        assert_eq!(MapIteration::parse("SEQUENCE"), MapIteration::Sequence);
        assert_eq!(MapIteration::parse("whatever"), MapIteration::Random);
    }
}
