mod chat_model;
mod embeddings;

pub use chat_model::{OpenAiChatModel, OpenAiConfig};
pub use embeddings::{OpenAiEmbeddings, OpenAiEmbeddingsConfig};

/// Public OpenAI REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

use reach_core::ReachError;
use reach_models::ProviderResponse;

/// Map an OpenAI error payload to the matching error kind.
pub(crate) fn check_error_status(
    resp: &ProviderResponse,
    wrap: fn(String) -> ReachError,
) -> Result<(), ReachError> {
    if resp.status == 429 {
        let msg = resp.body["error"]["message"]
            .as_str()
            .unwrap_or("rate limited")
            .to_string();
        return Err(ReachError::RateLimit(msg));
    }
    if resp.status >= 400 {
        let msg = resp.body["error"]["message"]
            .as_str()
            .unwrap_or("unknown API error");
        return Err(wrap(format!("OpenAI API error ({}): {}", resp.status, msg)));
    }
    Ok(())
}
