use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classic Magic 8-Ball answers, used whenever AI resolution is unavailable.
pub const CANNED_FORTUNES: [&str; 17] = [
    "It is certain",
    "Without a doubt",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

pub const AI_SYSTEM_PROMPT: &str = "You are a Magic 8-Ball giving personalized fortunes. \
Respond like the classic Magic 8-Ball but tailored to the question. \
Be direct, hopeful, and down-to-earth. Use simple, clear language. \
Keep it under 15 words. Give a straightforward answer - positive, negative, or uncertain. \
No abstract metaphors or riddles.";

/// Shown if a round somehow completes without any text.
pub const FALLBACK_ANSWER: &str = "The spirits are unclear. Try again.";

pub fn is_canned(answer: &str) -> bool {
    CANNED_FORTUNES.contains(&answer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortuneMode {
    #[default]
    Classic,
    #[serde(rename = "ai")]
    AiAssisted,
}

impl FortuneMode {
    pub fn label(&self) -> &'static str {
        match self {
            FortuneMode::Classic => "🔮 Classic",
            FortuneMode::AiAssisted => "🤖 AI Mode",
        }
    }

    /// Compact tag for history rows.
    pub fn short_label(&self) -> &'static str {
        match self {
            FortuneMode::Classic => "🔮 Classic",
            FortuneMode::AiAssisted => "🤖 AI",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FortuneMode::Classic => "classic",
            FortuneMode::AiAssisted => "ai",
        }
    }
}

impl fmt::Display for FortuneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FortuneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(FortuneMode::Classic),
            "ai" | "ai-assisted" | "ai_assisted" => Ok(FortuneMode::AiAssisted),
            other => Err(format!("unknown mode '{other}' (expected 'classic' or 'ai')")),
        }
    }
}

/// One completed round. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub mode: FortuneMode,
    pub created_at: DateTime<Utc>,
}

impl FortuneRecord {
    /// `seq` disambiguates records created within the same millisecond.
    pub fn new(
        question: String,
        answer: String,
        mode: FortuneMode,
        created_at: DateTime<Utc>,
        seq: u64,
    ) -> Self {
        Self {
            id: format!("{}-{}", created_at.timestamp_millis(), seq),
            question,
            answer,
            mode,
            created_at,
        }
    }
}
