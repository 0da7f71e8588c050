use thiserror::Error;

/// Parameters for one text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_text: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Everything that can go wrong talking to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider did not answer in time")]
    Timeout,

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("unparseable provider response: {0}")]
    Malformed(String),
}

/// A text-generation backend. Implementations: Gemini over HTTP, test mocks.
pub trait AiProvider {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, ProviderFailure>> + Send;
}
