//! Service configuration from command-line flags with environment fallbacks.

use std::time::Duration;

use clap::Parser;
use reach_cache::CacheConfig;
use reach_core::ReachError;
use reach_retrieval::RetrieverConfig;

/// Upper bound for cache TTLs and the sweep interval.
pub const MAX_CACHE_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "reach-server",
    version,
    about = "Retrieval-augmented answers and lesson slides over HTTP"
)]
pub struct ServiceConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = reach_openai::DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4-turbo-preview")]
    pub chat_model: String,

    #[arg(long, env = "CHAT_TEMPERATURE", default_value_t = 0.0)]
    pub temperature: f64,

    #[arg(long, env = "CHAT_MAX_TOKENS", default_value_t = 1024)]
    pub max_tokens: u32,

    #[arg(long, env = "EMBEDDING_MODEL", default_value = "text-embedding-3-small")]
    pub embedding_model: String,

    #[arg(long, env = "EMBEDDING_DIMENSIONS", default_value_t = 1536)]
    pub embedding_dimensions: u32,

    #[arg(long, env = "PINECONE_API_KEY", hide_env_values = true)]
    pub pinecone_api_key: String,

    /// Index host, e.g. https://reachdocs-abc123.svc.us-east-1.pinecone.io
    #[arg(long, env = "PINECONE_HOST")]
    pub pinecone_host: String,

    /// Empty selects the default namespace
    #[arg(long, env = "PINECONE_NAMESPACE", default_value = "")]
    pub pinecone_namespace: String,

    #[arg(long, env = "RETRIEVAL_TTL_SECS", default_value_t = 3600)]
    pub retrieval_ttl_secs: u64,

    #[arg(long, env = "RESPONSE_TTL_SECS", default_value_t = 3600)]
    pub response_ttl_secs: u64,

    /// Interval of the background expired-entry sweep
    #[arg(long, env = "CACHE_SWEEP_SECS", default_value_t = 600)]
    pub sweep_interval_secs: u64,

    #[arg(long, env = "RETRIEVER_TOP_K", default_value_t = 10)]
    pub top_k: usize,

    /// Minimum clean passages before the query is expanded
    #[arg(long, env = "RETRIEVER_MIN_DOCS", default_value_t = 4)]
    pub min_docs: usize,

    #[arg(
        long,
        env = "RETRIEVER_EXPANSION_SUFFIX",
        default_value = " dementia symptoms management"
    )]
    pub expansion_suffix: String,

    /// Timeout for each outbound provider call
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Attempts per chat call on rate limits and timeouts
    #[arg(long, env = "CHAT_MAX_ATTEMPTS", default_value_t = 3)]
    pub chat_max_attempts: usize,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ReachError> {
        let required = [
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("PINECONE_API_KEY", &self.pinecone_api_key),
            ("PINECONE_HOST", &self.pinecone_host),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ReachError::Config(format!("{name} must not be empty")));
            }
        }
        if self.top_k == 0 {
            return Err(ReachError::Config("top_k must be at least 1".to_string()));
        }
        let durations = [
            ("retrieval TTL", self.retrieval_ttl_secs),
            ("response TTL", self.response_ttl_secs),
            ("sweep interval", self.sweep_interval_secs),
        ];
        for (name, secs) in durations {
            if secs == 0 || secs > MAX_CACHE_SECS {
                return Err(ReachError::Config(format!(
                    "{name} must be between 1 and {MAX_CACHE_SECS} seconds, got {secs}"
                )));
            }
        }
        if self.chat_max_attempts == 0 {
            return Err(ReachError::Config("chat_max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retrieval_cache(&self) -> CacheConfig {
        CacheConfig::from_secs(self.retrieval_ttl_secs, self.sweep_interval_secs)
    }

    pub fn response_cache(&self) -> CacheConfig {
        CacheConfig::from_secs(self.response_ttl_secs, self.sweep_interval_secs)
    }

    pub fn retriever(&self) -> RetrieverConfig {
        RetrieverConfig::default()
            .with_top_k(self.top_k)
            .with_min_docs(self.min_docs)
            .with_expansion_suffix(self.expansion_suffix.clone())
    }
}
