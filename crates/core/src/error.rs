use crate::Screen;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-transient faults the automation can hit. An absent dialog or control
/// is deliberately not represented here: it is an ordinary idle frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum MenuFault {
    #[error("host rejected the selected map on {screen:?}")]
    HostRejection { screen: Screen },
    #[error("map retry budget exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}
