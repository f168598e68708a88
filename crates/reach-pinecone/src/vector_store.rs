use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reach_core::{Passage, PassageSet, ReachError, VectorStore};
use reach_models::{ProviderBackend, ProviderRequest};
use serde_json::{json, Value};
use tracing::debug;

// ---------------------------------------------------------------------------
// PineconeConfig
// ---------------------------------------------------------------------------

/// Configuration for querying an existing Pinecone index.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    /// Pinecone API key.
    pub api_key: String,
    /// The index host URL (e.g. `https://my-index-abc123.svc.pinecone.io`).
    pub host: String,
    /// Optional namespace; `None` queries the default namespace.
    pub namespace: Option<String>,
    /// Metadata key holding the passage text.
    pub text_key: String,
}

impl PineconeConfig {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: host.into(),
            namespace: None,
            text_key: "text".to_string(),
        }
    }

    /// Set the namespace. An empty string keeps the default namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
        self
    }

    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }
}

// ---------------------------------------------------------------------------
// PineconeVectorStore
// ---------------------------------------------------------------------------

/// A read-only [`VectorStore`] over an existing Pinecone index.
///
/// Each match becomes a [`Passage`]: the text is taken from metadata key
/// `text_key`; the remaining metadata is kept, together with the match `id`
/// and `score`.
pub struct PineconeVectorStore {
    config: PineconeConfig,
    backend: Arc<dyn ProviderBackend>,
}

impl PineconeVectorStore {
    pub fn new(config: PineconeConfig, backend: Arc<dyn ProviderBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &PineconeConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        let host = self.config.host.trim_end_matches('/');
        format!("{host}{path}")
    }

    /// Build the `/query` request for a pre-computed embedding.
    pub fn build_query(&self, embedding: &[f32], k: usize) -> ProviderRequest {
        let mut body = json!({
            "vector": embedding,
            "topK": k,
            "includeMetadata": true,
        });
        if let Some(ref ns) = self.config.namespace {
            body["namespace"] = Value::String(ns.clone());
        }
        ProviderRequest {
            url: self.url("/query"),
            headers: vec![
                ("Api-Key".to_string(), self.config.api_key.clone()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    fn match_to_passage(&self, m: &Value) -> Passage {
        let mut metadata: HashMap<String, Value> = m
            .get("metadata")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .collect();

        let text = match metadata.remove(&self.config.text_key) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };

        if let Some(id) = m.get("id").cloned() {
            metadata.insert("id".to_string(), id);
        }
        if let Some(score) = m.get("score").cloned() {
            metadata.insert("score".to_string(), score);
        }

        Passage::with_metadata(text, metadata)
    }
}

#[async_trait]
impl VectorStore for PineconeVectorStore {
    async fn similarity_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<PassageSet, ReachError> {
        let resp = self.backend.send(self.build_query(embedding, k)).await?;

        if resp.status >= 400 {
            return Err(ReachError::Search(format!(
                "Pinecone API error (HTTP {}): {}",
                resp.status, resp.body
            )));
        }

        let matches = resp
            .body
            .get("matches")
            .and_then(|m| m.as_array())
            .cloned()
            .unwrap_or_default();
        debug!(count = matches.len(), "pinecone query returned matches");

        Ok(matches.iter().map(|m| self.match_to_passage(m)).collect())
    }
}
