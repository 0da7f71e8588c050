use chrono::Utc;
use domain::{
    AiProvider, FortuneIssue, FortuneMode, FortuneRecord, HistoryLedger, PersistedState, Session,
    SessionState, StateStore,
};
use shared::telemetry::Telemetry;
use shared::types::Result;
use tracing::{debug, info, warn};

use crate::fortune_resolver::FortuneResolver;

/// Presentation timing between transitions. Called once on entering
/// `Shaking` and once in `Revealing` after the answer is known.
pub trait Pacer {
    fn pause(
        &self,
        state: SessionState,
        reduced_motion: bool,
    ) -> impl std::future::Future<Output = ()> + Send;
}

/// Advances immediately. For tests and non-interactive output.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    async fn pause(&self, _state: SessionState, _reduced_motion: bool) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub record: FortuneRecord,
    pub issue: Option<FortuneIssue>,
}

/// Owns the session, its history and the durable store for one user.
pub struct FortuneTeller<P, S> {
    session: Session,
    history: HistoryLedger,
    reduced_motion: bool,
    resolver: FortuneResolver<P>,
    store: S,
}

impl<P: AiProvider, S: StateStore> FortuneTeller<P, S> {
    /// Restores persisted state. A store that cannot be read starts empty.
    pub fn new(resolver: FortuneResolver<P>, store: S) -> Self {
        let restored = match store.load() {
            Ok(state) => state.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "could not restore saved state, starting fresh");
                PersistedState::default()
            }
        };
        debug!(records = restored.history.len(), mode = %restored.mode, "state restored");
        Self {
            session: Session::new(restored.mode),
            history: HistoryLedger::from_records(restored.history),
            reduced_motion: restored.reduced_motion,
            resolver,
            store,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn mode(&self) -> FortuneMode {
        self.session.mode()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn has_provider(&self) -> bool {
        self.resolver.has_provider()
    }

    /// Runs one full round. `None` when the session is busy or the
    /// question is blank.
    pub async fn shake<T: Pacer>(&mut self, question: &str, pacer: &T) -> Option<RoundOutcome> {
        let ticket = self.session.submit(question)?;
        let telemetry = Telemetry::new();
        let mode = self.session.mode();
        info!(%mode, "shaking");

        pacer.pause(SessionState::Shaking, self.reduced_motion).await;
        if !self.session.delay_elapsed(ticket) {
            return None;
        }

        let resolution = self.resolver.resolve(mode, self.session.question()).await;
        pacer.pause(SessionState::Revealing, self.reduced_motion).await;

        let record = self.session.complete(ticket, &resolution.answer, Utc::now())?;
        self.history.append(record.clone());
        if let Err(err) = self.persist() {
            warn!(error = %err, "could not save history");
        }
        debug!(elapsed_ms = telemetry.elapsed_ms(), issue = ?resolution.issue, "round answered");

        Some(RoundOutcome {
            record,
            issue: resolution.issue,
        })
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn ask_another(&mut self) {
        self.session.ask_another();
    }

    pub fn set_mode(&mut self, mode: FortuneMode) -> Result<()> {
        self.session.set_mode(mode);
        self.persist()
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) -> Result<()> {
        self.reduced_motion = reduced;
        self.persist()
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let state =
            PersistedState::capture(&self.history, self.session.mode(), self.reduced_motion);
        self.store.save(&state)
    }
}
