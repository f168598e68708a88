//! Service assembly: provider clients, caches, retriever, generator and router.

use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use reach_cache::TtlCache;
use reach_core::{ChatModel, ReachError};
use reach_generation::Generator;
use reach_models::{HttpBackend, ProviderBackend, RetryChatModel, RetryPolicy};
use reach_openai::{OpenAiChatModel, OpenAiConfig, OpenAiEmbeddings, OpenAiEmbeddingsConfig};
use reach_pinecone::{PineconeConfig, PineconeVectorStore};
use reach_retrieval::{AdaptiveRetriever, VectorSearch};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::middleware::log_requests;
use crate::routes::{generate_slide, health, query, retrieve};
use crate::ServiceConfig;

/// Shared handler state.
pub struct AppState {
    pub generator: Arc<Generator>,
}

impl AppState {
    pub fn new(generator: Arc<Generator>) -> Self {
        Self { generator }
    }

    /// Wire the OpenAI and Pinecone clients into a retriever and generator.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ReachError> {
        config.validate()?;
        let backend: Arc<dyn ProviderBackend> =
            Arc::new(HttpBackend::with_timeout(config.request_timeout())?);

        let chat = OpenAiChatModel::new(
            OpenAiConfig::new(&config.openai_api_key, &config.chat_model)
                .with_base_url(&config.openai_base_url)
                .with_temperature(config.temperature)
                .with_max_tokens(config.max_tokens),
            backend.clone(),
        );
        let model: Arc<dyn ChatModel> = Arc::new(RetryChatModel::new(
            Arc::new(chat),
            RetryPolicy {
                max_attempts: config.chat_max_attempts,
                ..RetryPolicy::default()
            },
        ));
        info!(model = %config.chat_model, "chat model initialized");

        let embeddings = OpenAiEmbeddings::new(
            OpenAiEmbeddingsConfig::new(&config.openai_api_key)
                .with_model(&config.embedding_model)
                .with_base_url(&config.openai_base_url)
                .with_dimensions(config.embedding_dimensions),
            backend.clone(),
        );
        info!(
            model = %config.embedding_model,
            dimensions = config.embedding_dimensions,
            "embeddings initialized"
        );

        let store = PineconeVectorStore::new(
            PineconeConfig::new(&config.pinecone_api_key, &config.pinecone_host)
                .with_namespace(&config.pinecone_namespace),
            backend,
        );
        info!(host = %config.pinecone_host, "vector store initialized");

        let search = Arc::new(VectorSearch::new(Arc::new(store), Arc::new(embeddings)));
        let retriever = Arc::new(AdaptiveRetriever::new(
            search,
            Arc::new(TtlCache::new(config.retrieval_cache())),
            config.retriever(),
        ));
        let generator = Generator::new(
            retriever,
            model,
            Arc::new(TtlCache::new(config.response_cache())),
        );
        Ok(Self::new(Arc::new(generator)))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/query", post(query))
        .route("/api/generateSlide", post(generate_slide))
        .route("/api/retrieve", post(retrieve))
        .with_state(state)
        .layer(from_fn(log_requests))
        .layer(CorsLayer::permissive())
}
