use application::{FortuneResolver, FortuneTeller, InstantPacer, ResolverSettings};
use domain::fortune::is_canned;
use domain::{FortuneIssue, FortuneMode, ProviderFailure, SessionState, HISTORY_LIMIT};
use tests::{BrokenStore, MemoryStore, RecordingPacer, ScriptedProvider};

fn teller(
    provider: Option<ScriptedProvider>,
    store: MemoryStore,
) -> FortuneTeller<ScriptedProvider, MemoryStore> {
    let resolver = FortuneResolver::new(provider, ResolverSettings::default()).with_seed(3);
    FortuneTeller::new(resolver, store)
}

#[tokio::test]
async fn classic_round_passes_through_every_state() {
    let mut teller = teller(None, MemoryStore::default());
    let pacer = RecordingPacer::default();

    let outcome = teller.shake("Will it rain?", &pacer).await.unwrap();

    assert_eq!(
        pacer.seen(),
        vec![(SessionState::Shaking, false), (SessionState::Revealing, false)]
    );
    assert_eq!(teller.session().state(), SessionState::Answered);
    assert_eq!(teller.session().answer(), outcome.record.answer);
    assert!(is_canned(&outcome.record.answer));
    assert_eq!(outcome.issue, None);

    let history: Vec<_> = teller.history().all().collect();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].question, "Will it rain?");
    assert_eq!(history[0].answer, outcome.record.answer);
    assert_eq!(history[0].mode, FortuneMode::Classic);
}

#[tokio::test]
async fn ai_round_uses_provider_text() {
    let provider = ScriptedProvider::replying(vec![Ok("  Pack a raincoat. ".into())]);
    let mut teller = teller(Some(provider.clone()), MemoryStore::default());
    teller.set_mode(FortuneMode::AiAssisted).unwrap();

    let outcome = teller.shake("Will it rain?", &InstantPacer).await.unwrap();
    assert_eq!(outcome.record.answer, "Pack a raincoat.");
    assert_eq!(outcome.record.mode, FortuneMode::AiAssisted);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user_text, "Question: Will it rain?");
    assert_eq!(requests[0].max_output_tokens, 50);
    assert!((requests[0].temperature - 0.9).abs() < f32::EPSILON);
}

#[tokio::test]
async fn ai_failures_still_answer() {
    let provider = ScriptedProvider::replying(vec![Err(ProviderFailure::Http {
        status: 429,
        body: "Resource has been exhausted".into(),
    })]);
    let mut teller = teller(Some(provider), MemoryStore::default());
    teller.set_mode(FortuneMode::AiAssisted).unwrap();

    let outcome = teller.shake("Am I lucky?", &InstantPacer).await.unwrap();
    assert!(is_canned(&outcome.record.answer));
    assert_eq!(outcome.issue, Some(FortuneIssue::RateLimit));
    assert_eq!(teller.history().len(), 1);
}

#[tokio::test]
async fn ai_without_key_reports_it() {
    let mut teller = teller(None, MemoryStore::default());
    teller.set_mode(FortuneMode::AiAssisted).unwrap();
    let outcome = teller.shake("Am I lucky?", &InstantPacer).await.unwrap();
    assert!(is_canned(&outcome.record.answer));
    assert_eq!(outcome.issue, Some(FortuneIssue::NoApiKey));
}

#[tokio::test]
async fn guarded_submits_leave_no_trace() {
    let mut teller = teller(None, MemoryStore::default());
    assert!(teller.shake("   ", &InstantPacer).await.is_none());
    assert_eq!(teller.session().state(), SessionState::Idle);

    teller.shake("first", &InstantPacer).await.unwrap();
    assert!(teller.shake("second", &InstantPacer).await.is_none());
    assert_eq!(teller.history().len(), 1);
    assert_eq!(teller.session().question(), "first");
}

#[tokio::test]
async fn reset_returns_to_idle_without_touching_history() {
    let mut teller = teller(None, MemoryStore::default());
    teller.shake("q", &InstantPacer).await.unwrap();
    teller.reset();
    assert_eq!(teller.session().state(), SessionState::Idle);
    assert_eq!(teller.session().question(), "");
    assert_eq!(teller.session().answer(), "");
    assert_eq!(teller.history().len(), 1);

    teller.ask_another();
    assert!(teller.shake("again", &InstantPacer).await.is_some());
    assert_eq!(teller.history().len(), 2);
}

#[tokio::test]
async fn history_stays_bounded() {
    let mut teller = teller(None, MemoryStore::default());
    for n in 0..55 {
        teller.shake(&format!("question {n}"), &InstantPacer).await.unwrap();
        teller.reset();
    }
    assert_eq!(teller.history().len(), HISTORY_LIMIT);
    let newest = teller.history().latest().unwrap();
    assert_eq!(newest.question, "question 54");
    let oldest = teller.history().all().last().unwrap();
    assert_eq!(oldest.question, "question 5");
}

#[tokio::test]
async fn clear_history_empties_everything() {
    let store = MemoryStore::default();
    let mut teller = teller(None, store.clone());
    for n in 0..3 {
        teller.shake(&format!("q{n}"), &InstantPacer).await.unwrap();
        teller.reset();
    }
    teller.clear_history().unwrap();
    assert!(teller.history().is_empty());
    assert!(store.snapshot().unwrap().history.is_empty());
}

#[tokio::test]
async fn reduced_motion_reaches_pacer() {
    let mut teller = teller(None, MemoryStore::default());
    teller.set_reduced_motion(true).unwrap();
    let pacer = RecordingPacer::default();
    teller.shake("q", &pacer).await.unwrap();
    assert!(pacer.seen().iter().all(|(_, reduced)| *reduced));
}

#[tokio::test]
async fn broken_store_does_not_break_rounds() {
    let resolver: FortuneResolver<ScriptedProvider> =
        FortuneResolver::new(None, ResolverSettings::default());
    let mut teller = FortuneTeller::new(resolver, BrokenStore);
    let outcome = teller.shake("q", &InstantPacer).await;
    assert!(outcome.is_some());
    assert_eq!(teller.history().len(), 1);
    assert!(teller.set_mode(FortuneMode::AiAssisted).is_err());
    assert_eq!(teller.mode(), FortuneMode::AiAssisted);
}
