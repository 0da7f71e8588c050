use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fortune::{FortuneMode, FortuneRecord, FALLBACK_ANSWER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Shaking,
    Revealing,
    Answered,
}

impl SessionState {
    /// Text for the primary action in the current state.
    pub fn action_label(&self) -> &'static str {
        match self {
            SessionState::Shaking | SessionState::Revealing => "Shaking...",
            SessionState::Answered => "Ask Another Question",
            SessionState::Idle => "Shake the Ball",
        }
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}

/// Identifies one accepted round. Events for a stale ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundTicket(u64);

/// The single question/answer lifecycle.
///
/// Transitions are driven by two external events, the presentation delay
/// elapsing ([`Session::delay_elapsed`]) and the resolver finishing
/// ([`Session::complete`]), so timing stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    question: String,
    answer: String,
    mode: FortuneMode,
    round_mode: FortuneMode,
    generation: u64,
}

impl Session {
    pub fn new(mode: FortuneMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn mode(&self) -> FortuneMode {
        self.mode
    }

    /// Mode is sticky and may change in any state. A running round keeps
    /// the mode it was submitted with.
    pub fn set_mode(&mut self, mode: FortuneMode) {
        self.mode = mode;
    }

    /// Edits the pending question. Ignored once a round has started.
    pub fn set_question(&mut self, text: &str) {
        if self.state == SessionState::Idle {
            self.question = text.to_string();
        }
    }

    /// Starts a round. Returns `None` (and changes nothing) unless the
    /// session is idle and the trimmed question is non-empty.
    pub fn submit(&mut self, question: &str) -> Option<RoundTicket> {
        if self.state != SessionState::Idle {
            return None;
        }
        let question = shared::utils::non_blank(question)?;
        self.question = question.to_string();
        self.state = SessionState::Shaking;
        self.round_mode = self.mode;
        self.generation += 1;
        Some(RoundTicket(self.generation))
    }

    /// `Shaking -> Revealing`.
    pub fn delay_elapsed(&mut self, ticket: RoundTicket) -> bool {
        if !self.is_current(ticket) || self.state != SessionState::Shaking {
            return false;
        }
        self.state = SessionState::Revealing;
        true
    }

    /// `Revealing -> Answered`, yielding the record for the history ledger.
    pub fn complete(
        &mut self,
        ticket: RoundTicket,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Option<FortuneRecord> {
        if !self.is_current(ticket) || self.state != SessionState::Revealing {
            return None;
        }
        let answer = shared::utils::non_blank(answer).unwrap_or(FALLBACK_ANSWER);
        self.answer = answer.to_string();
        self.state = SessionState::Answered;
        Some(FortuneRecord::new(
            self.question.clone(),
            self.answer.clone(),
            self.round_mode,
            now,
            ticket.0,
        ))
    }

    /// Back to `Idle` from any state. Any outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.question.clear();
        self.answer.clear();
        self.generation += 1;
    }

    pub fn ask_another(&mut self) {
        self.reset();
    }

    fn is_current(&self, ticket: RoundTicket) -> bool {
        ticket.0 == self.generation
    }
}
