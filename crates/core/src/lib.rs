//! Domain types and host collaborator interfaces. Keep this crate free of IO
//! and platform concerns.

pub mod error;
pub mod events;
pub mod game;
pub mod host;
pub mod lobby;
pub mod maplist;
pub mod race;
pub mod rng;
pub mod screen;
pub mod slots;
pub mod widget;

pub use error::*;
pub use events::*;
pub use game::*;
pub use host::*;
pub use lobby::*;
pub use maplist::*;
pub use race::*;
pub use rng::*;
pub use screen::*;
pub use slots::*;
pub use widget::*;
