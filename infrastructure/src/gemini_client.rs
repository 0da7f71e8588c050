use domain::{AiProvider, GenerationRequest, ProviderFailure};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        match config.gemini_api_key.as_deref() {
            Some(key) => Ok(Some(Self::new(
                &config.gemini_base_url,
                &config.gemini_model,
                key,
                config.request_timeout,
            )?)),
            None => Ok(None),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, ProviderFailure> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system_prompt.clone(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.user_text.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            },
        };

        debug!(model = %self.model, "calling Gemini generateContent");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_failure)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_failure)?;
        if !status.is_success() {
            return Err(ProviderFailure::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        extract_text(&text)
    }
}

impl AiProvider for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, ProviderFailure> {
        self.generate_content(request).await
    }
}

fn transport_failure(err: reqwest::Error) -> ProviderFailure {
    if err.is_timeout() {
        ProviderFailure::Timeout
    } else {
        ProviderFailure::Transport(err.to_string())
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(raw: &str) -> std::result::Result<String, ProviderFailure> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(raw).map_err(|e| ProviderFailure::Malformed(e.to_string()))?;
    let full_content: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if full_content.trim().is_empty() {
        return Err(ProviderFailure::EmptyResponse);
    }
    Ok(full_content.trim().to_string())
}
