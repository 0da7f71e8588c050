use application::{FortuneResolver, FortuneTeller, InstantPacer, ResolverSettings};
use domain::fortune::is_canned;
use domain::{FortuneIssue, FortuneMode};
use infrastructure::config::Config;
use infrastructure::gemini_client::GeminiClient;
use std::collections::HashMap;
use tests::MemoryStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn teller_against(server: &MockServer) -> FortuneTeller<GeminiClient, MemoryStore> {
    let vars: HashMap<&str, String> = HashMap::from([
        ("GEMINI_API_KEY", "test-key".to_string()),
        ("GEMINI_BASE_URL", server.uri()),
        ("FORTUNE_TIMEOUT_SECS", "5".to_string()),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned());
    let client = GeminiClient::from_config(&config).unwrap();
    assert!(client.is_some());
    let settings = ResolverSettings::default().with_timeout(config.request_timeout);
    let resolver = FortuneResolver::new(client, settings);
    let mut teller = FortuneTeller::new(resolver, MemoryStore::default());
    teller.set_mode(FortuneMode::AiAssisted).unwrap();
    teller
}

#[tokio::test]
async fn gemini_answer_is_shown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Yes, but bring snacks.\n"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut teller = teller_against(&server).await;
    let outcome = teller.shake("Should I go hiking?", &InstantPacer).await.unwrap();
    assert_eq!(outcome.record.answer, "Yes, but bring snacks.");
    assert_eq!(outcome.issue, None);
}

#[tokio::test]
async fn gemini_quota_exhaustion_is_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let mut teller = teller_against(&server).await;
    let outcome = teller.shake("Should I go hiking?", &InstantPacer).await.unwrap();
    assert!(is_canned(&outcome.record.answer));
    assert_eq!(outcome.issue, Some(FortuneIssue::RateLimit));
}

#[tokio::test]
async fn gemini_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let mut teller = teller_against(&server).await;
    let outcome = teller.shake("Should I go hiking?", &InstantPacer).await.unwrap();
    assert!(is_canned(&outcome.record.answer));
    assert_eq!(outcome.issue, Some(FortuneIssue::ApiError));
}

#[tokio::test]
async fn gemini_empty_candidates_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let mut teller = teller_against(&server).await;
    let outcome = teller.shake("Should I go hiking?", &InstantPacer).await.unwrap();
    assert!(is_canned(&outcome.record.answer));
    assert_eq!(outcome.issue, Some(FortuneIssue::ApiError));
}
