use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-flash-latest";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub store_path: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// `.env` first, then the process environment.
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_blank("GEMINI_API_KEY")
            .or_else(|| non_blank("VITE_GEMINI_API_KEY"))
            .map(|k| k.trim().to_string());
        let request_timeout = non_blank("FORTUNE_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let store_path = non_blank("FORTUNE_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_store_path(lookup("HOME")));

        Self {
            gemini_api_key,
            gemini_model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_blank("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            store_path,
            request_timeout: Duration::from_secs(request_timeout),
        }
    }
}

fn default_store_path(home: Option<String>) -> PathBuf {
    let mut path = PathBuf::from(home.unwrap_or_else(|| ".".to_string()));
    path.push(".local");
    path.push("share");
    path.push("fortune_teller");
    path.push("state.db");
    path
}
