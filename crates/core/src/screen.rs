use crate::{Race, WidgetTree};
use serde::{Deserialize, Serialize};

/// Classification of the screen the host is currently displaying. Derived
/// from the widget tree every frame and never trusted across frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    CampaignSelect,
    CreateGame,
    Connect,
    GameBrowser,
    LobbyChat,
    Login,
    Score { race: Race, victory: bool },
    MissionReady { race: Race },
    None,
}

const SCORE_MARKERS: [(&str, Race, bool); 6] = [
    ("ZVictory", Race::Zerg, true),
    ("ZDefeat", Race::Zerg, false),
    ("TVictory", Race::Terran, true),
    ("TDefeat", Race::Terran, false),
    ("PVictory", Race::Protoss, true),
    ("PDefeat", Race::Protoss, false),
];

const READY_MARKERS: [(&str, Race); 3] = [
    ("ReadyZ", Race::Zerg),
    ("ReadyT", Race::Terran),
    ("ReadyP", Race::Protoss),
];

impl Screen {
    /// Probe the dialog set for screen markers, first match wins. An
    /// unrecognized dialog set yields `Screen::None`, which idles the frame.
    pub fn classify(widgets: &dyn WidgetTree) -> Self {
        let shown = |name: &str| widgets.dialog(name).is_some();

        if shown("Chat") {
            return Self::LobbyChat;
        }
        if shown("GameSel") {
            return Self::GameBrowser;
        }
        if shown("Create") {
            return Self::CreateGame;
        }
        if shown("ConnSel") {
            return Self::Connect;
        }
        if shown("RaceSelection") {
            return Self::CampaignSelect;
        }
        if shown("gluPEdit") || shown("Login") {
            return Self::Login;
        }
        for (name, race, victory) in SCORE_MARKERS {
            if shown(name) {
                return Self::Score { race, victory };
            }
        }
        for (name, race) in READY_MARKERS {
            if shown(name) {
                return Self::MissionReady { race };
            }
        }
        if shown("MainMenu") || shown("TitleDlg") {
            return Self::MainMenu;
        }
        Self::None
    }
}
