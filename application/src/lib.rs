pub mod fortune_resolver;
pub mod fortune_teller;

pub use fortune_resolver::{FortuneResolver, Resolution, ResolverSettings};
pub use fortune_teller::{FortuneTeller, InstantPacer, Pacer, RoundOutcome};
