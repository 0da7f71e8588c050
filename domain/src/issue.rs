use serde::{Deserialize, Serialize};
use std::fmt;

use crate::provider::ProviderFailure;

/// Textual signals providers use for throttling or exhausted quota.
const RATE_LIMIT_MARKERS: [&str; 6] = [
    "rate limit",
    "rate_limit",
    "quota",
    "resource_exhausted",
    "resource exhausted",
    "too many requests",
];

/// Why a round fell back to a canned fortune. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortuneIssue {
    NoApiKey,
    RateLimit,
    ApiError,
}

impl FortuneIssue {
    pub fn classify(failure: &ProviderFailure) -> Self {
        match failure {
            ProviderFailure::Http { status: 429, .. } => FortuneIssue::RateLimit,
            ProviderFailure::Http { body, .. } if mentions_rate_limit(body) => {
                FortuneIssue::RateLimit
            }
            ProviderFailure::Transport(msg) | ProviderFailure::Malformed(msg)
                if mentions_rate_limit(msg) =>
            {
                FortuneIssue::RateLimit
            }
            _ => FortuneIssue::ApiError,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            FortuneIssue::RateLimit => "Rate limit reached! Try again in a few minutes.",
            FortuneIssue::NoApiKey => "AI mode requires an API key",
            FortuneIssue::ApiError => "AI service unavailable",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            FortuneIssue::NoApiKey => {
                "Add GEMINI_API_KEY to your environment or .env file. Showing a classic fortune instead."
            }
            FortuneIssue::RateLimit | FortuneIssue::ApiError => {
                "Showing a classic fortune instead."
            }
        }
    }
}

impl fmt::Display for FortuneIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FortuneIssue::NoApiKey => "no_api_key",
            FortuneIssue::RateLimit => "rate_limit",
            FortuneIssue::ApiError => "api_error",
        };
        f.write_str(name)
    }
}

fn mentions_rate_limit(text: &str) -> bool {
    let lower = text.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m))
}
