use std::time::Duration;

use domain::fortune::{AI_SYSTEM_PROMPT, CANNED_FORTUNES};
use domain::{AiProvider, FortuneIssue, FortuneMode, GenerationRequest, ProviderFailure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 50;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub system_prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            system_prompt: AI_SYSTEM_PROMPT.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ResolverSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The displayable outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub answer: String,
    pub issue: Option<FortuneIssue>,
}

impl Resolution {
    fn clean(answer: String) -> Self {
        Self { answer, issue: None }
    }
}

/// Decides between a canned fortune and the AI provider. Never fails:
/// every path ends in a usable answer.
///
/// `provider` is `None` when no credential is configured.
pub struct FortuneResolver<P> {
    provider: Option<P>,
    settings: ResolverSettings,
    rng: StdRng,
}

impl<P: AiProvider> FortuneResolver<P> {
    pub fn new(provider: Option<P>, settings: ResolverSettings) -> Self {
        Self {
            provider,
            settings,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible canned picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn pick_canned(&mut self) -> &'static str {
        CANNED_FORTUNES[self.rng.gen_range(0..CANNED_FORTUNES.len())]
    }

    pub async fn resolve(&mut self, mode: FortuneMode, question: &str) -> Resolution {
        let question = question.trim();
        if mode == FortuneMode::Classic || question.is_empty() {
            return Resolution::clean(self.pick_canned().to_string());
        }

        let Some(provider) = self.provider.as_ref() else {
            warn!("AI mode requested without an API key, using a classic fortune");
            return self.fallback(FortuneIssue::NoApiKey);
        };

        let request = GenerationRequest {
            system_prompt: self.settings.system_prompt.clone(),
            user_text: format!("Question: {question}"),
            max_output_tokens: self.settings.max_output_tokens,
            temperature: self.settings.temperature,
        };

        let call = provider.generate(&request);
        let outcome = match tokio::time::timeout(self.settings.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderFailure::Timeout),
        };

        match outcome.and_then(non_empty) {
            Ok(text) => {
                debug!(chars = text.len(), "AI fortune received");
                Resolution::clean(text)
            }
            Err(failure) => {
                let issue = FortuneIssue::classify(&failure);
                warn!(%failure, %issue, "AI fortune failed, using a classic fortune");
                self.fallback(issue)
            }
        }
    }

    fn fallback(&mut self, issue: FortuneIssue) -> Resolution {
        Resolution {
            answer: self.pick_canned().to_string(),
            issue: Some(issue),
        }
    }
}

fn non_empty(text: String) -> Result<String, ProviderFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderFailure::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}
