use crate::{GameType, MenuFault, Race, Screen};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    ScreenChanged { from: Screen, to: Screen },
    MapPoolReloaded { entries: usize },
    MapChosen { path: String },
    GameTypeSet { game_type: GameType },
    SlotClosed { slot: u8 },
    RaceChangeRequested { slot: u8, race: Race },
    RaceConfirmed { slot: u8, race: Race },
    LanProviderSelected { provider: String },
    HostingGame,
    JoiningGame { name: String },
    StartActivated { ready_humans: usize },
    ErrorDismissed { screen: Screen },
    FaultRaised { fault: MenuFault },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
