pub mod fortune;
pub mod history;
pub mod issue;
pub mod persistence;
pub mod provider;
pub mod session;

pub use fortune::{FortuneMode, FortuneRecord, CANNED_FORTUNES};
pub use history::{HistoryLedger, HISTORY_LIMIT};
pub use issue::FortuneIssue;
pub use persistence::{PersistedState, StateStore};
pub use provider::{AiProvider, GenerationRequest, ProviderFailure};
pub use session::{RoundTicket, Session, SessionState};
