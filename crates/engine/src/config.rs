use autolobby_core::{ConfigStore, GameType, MapIteration, MenuMode, RaceToken};
use serde::{Deserialize, Serialize};

/// Highest opponent slot the host supports (slot 0 is the local player).
pub const MAX_OPPONENTS: usize = 7;

/// Immutable-per-reload snapshot of the user's automation intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoMenuConfig {
    pub mode: MenuMode,
    pub auto_restart: bool,
    /// Session name to join; empty means host a game instead.
    pub game_name: String,
    /// Directory/glob pattern for candidate maps, separators normalized.
    pub map_pattern: String,
    /// Directory part of `map_pattern`, without a trailing separator.
    pub map_dir: String,
    pub map_iteration: MapIteration,
    pub lan_mode: String,
    pub race: RaceToken,
    /// Index 0 is the default applied to opponent slots left unset.
    pub enemy_races: [RaceToken; MAX_OPPONENTS + 1],
    pub enemy_count: u8,
    pub game_type: Option<GameType>,
    pub save_replay: String,
    pub min_players: u32,
    pub max_players: u32,
    pub wait_time_ms: u64,
    /// `u32::MAX` means unset.
    pub seed_override: u32,
    /// `i32::MIN` means unset.
    pub speed_override: i32,
}

impl Default for AutoMenuConfig {
    fn default() -> Self {
        Self {
            mode: MenuMode::Off,
            auto_restart: false,
            game_name: String::new(),
            map_pattern: String::new(),
            map_dir: String::new(),
            map_iteration: MapIteration::Random,
            lan_mode: String::new(),
            race: RaceToken::Unknown,
            enemy_races: [RaceToken::Unknown; MAX_OPPONENTS + 1],
            enemy_count: 0,
            game_type: None,
            save_replay: String::new(),
            min_players: 2,
            max_players: 8,
            wait_time_ms: 30_000,
            seed_override: u32::MAX,
            speed_override: i32::MIN,
        }
    }
}

impl AutoMenuConfig {
    pub fn load(store: &dyn ConfigStore) -> Self {
        let mode = MenuMode::parse(&store.string("auto_menu", "auto_menu", "OFF"));
        let auto_restart = toggled_on(&store.string("auto_menu", "auto_restart", "OFF"));
        let game_name = store.string("auto_menu", "game", "");

        let map_pattern = store.string("auto_menu", "map", "").replace('\\', "/");
        let map_dir = match map_pattern.rfind('/') {
            Some(at) => map_pattern[..at].to_string(),
            None => String::new(),
        };
        let map_iteration = MapIteration::parse(&store.string("auto_menu", "mapiteration", "RANDOM"));

        let race = RaceToken::parse(&store.string("auto_menu", "race", "RANDOM"));
        let mut enemy_races = [RaceToken::Unknown; MAX_OPPONENTS + 1];
        enemy_races[0] = RaceToken::parse(&store.string("auto_menu", "enemy_race", "RANDOM"));
        for slot in 1..=MAX_OPPONENTS {
            let token = store.string("auto_menu", &format!("enemy_race_{slot}"), "DEFAULT");
            enemy_races[slot] = if token.trim().eq_ignore_ascii_case("DEFAULT") {
                enemy_races[0]
            } else {
                RaceToken::parse(&token)
            };
        }

        Self {
            mode,
            auto_restart,
            game_name,
            map_pattern,
            map_dir,
            map_iteration,
            lan_mode: store.string("auto_menu", "lan_mode", "Local Area Network (UDP)"),
            race,
            enemy_races,
            enemy_count: store
                .int("auto_menu", "enemy_count", 1)
                .clamp(0, MAX_OPPONENTS as i64) as u8,
            game_type: GameType::from_token(&store.string("auto_menu", "game_type", "MELEE")),
            save_replay: store.string("auto_menu", "save_replay", ""),
            min_players: store.int("auto_menu", "wait_for_min_players", 2).max(0) as u32,
            max_players: store.int("auto_menu", "wait_for_max_players", 8).max(0) as u32,
            wait_time_ms: store.int("auto_menu", "wait_for_time", 30_000).max(0) as u64,
            seed_override: store.int("starcraft", "seed_override", i64::from(u32::MAX)) as u32,
            speed_override: store.int("starcraft", "speed_override", i64::from(i32::MIN)) as i32,
        }
    }

    /// Whether the automation intends to create/host a game.
    pub fn creating_intent(&self) -> bool {
        !self.map_pattern.is_empty()
    }

    /// Whether the automation intends to join a named session.
    pub fn joining_intent(&self) -> bool {
        !self.game_name.is_empty()
    }

    pub fn enemy_token(&self, slot: usize) -> RaceToken {
        self.enemy_races
            .get(slot)
            .copied()
            .unwrap_or(self.enemy_races[0])
    }
}

fn toggled_on(token: &str) -> bool {
    !token.trim().is_empty() && !token.trim().eq_ignore_ascii_case("OFF")
}
