use serde::{Deserialize, Serialize};
use shared::types::Result;

use crate::fortune::{FortuneMode, FortuneRecord};
use crate::history::HistoryLedger;

/// Namespace key the whole document is stored under.
pub const STORAGE_KEY: &str = "fortune-teller-storage";

/// What survives a restart: history plus the two sticky settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub history: Vec<FortuneRecord>,
    pub mode: FortuneMode,
    pub reduced_motion: bool,
}

impl PersistedState {
    pub fn capture(history: &HistoryLedger, mode: FortuneMode, reduced_motion: bool) -> Self {
        Self {
            history: history.to_vec(),
            mode,
            reduced_motion,
        }
    }
}

/// Durable load-on-start / save-on-mutate storage.
pub trait StateStore {
    fn load(&self) -> Result<Option<PersistedState>>;
    fn save(&self, state: &PersistedState) -> Result<()>;
}
