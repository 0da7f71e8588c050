use application::Pacer;
use colored::Colorize;
use domain::SessionState;
use std::time::Duration;

const SHAKE: Duration = Duration::from_millis(2500);
const SHAKE_REDUCED: Duration = Duration::from_millis(1500);
const SETTLE: Duration = Duration::from_millis(300);
const SETTLE_REDUCED: Duration = Duration::from_millis(100);

/// Real-time pacing for the terminal. With `animate == false` every pause
/// is skipped, which keeps scripted use snappy.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPacer {
    animate: bool,
}

impl TerminalPacer {
    pub fn new(animate: bool) -> Self {
        Self { animate }
    }

    pub fn delay_for(state: SessionState, reduced_motion: bool) -> Duration {
        match (state, reduced_motion) {
            (SessionState::Shaking, false) => SHAKE,
            (SessionState::Shaking, true) => SHAKE_REDUCED,
            (SessionState::Revealing, false) => SETTLE,
            (SessionState::Revealing, true) => SETTLE_REDUCED,
            _ => Duration::ZERO,
        }
    }
}

impl Pacer for TerminalPacer {
    async fn pause(&self, state: SessionState, reduced_motion: bool) {
        if !self.animate {
            return;
        }
        if state == SessionState::Shaking {
            eprintln!("{}", state.action_label().purple().italic());
        }
        tokio::time::sleep(Self::delay_for(state, reduced_motion)).await;
    }
}
