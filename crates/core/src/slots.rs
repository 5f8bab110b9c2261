use crate::Race;
use serde::{Deserialize, Serialize};

/// Size of the host's playable slot table.
pub const PLAYABLE_SLOTS: usize = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SlotKind {
    Inactive,
    Computer,
    Human,
    EitherPreferComputer,
    EitherPreferHuman,
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSlot {
    pub kind: SlotKind,
    pub race: Option<Race>,
    /// Download/ready progress, 0..=100.
    pub download: u8,
}

impl PlayerSlot {
    pub fn vacant() -> Self {
        Self {
            kind: SlotKind::Inactive,
            race: None,
            download: 0,
        }
    }

    pub fn human(race: Race, download: u8) -> Self {
        Self {
            kind: SlotKind::Human,
            race: Some(race),
            download,
        }
    }
}

/// Host-owned player slot table. Values are returned by copy because the
/// underlying table can change between any two calls within a frame.
pub trait SlotTable {
    fn slot(&self, index: usize) -> PlayerSlot;
    fn local_player(&self) -> Option<usize>;
}
