use std::sync::Arc;

use async_trait::async_trait;
use reach_core::{Embeddings, ReachError};
use reach_models::{ProviderBackend, ProviderRequest};
use serde_json::{json, Value};

use crate::{check_error_status, DEFAULT_BASE_URL};

#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingsConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub dimensions: Option<u32>,
}

impl OpenAiEmbeddingsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "text-embedding-3-small".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            dimensions: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

pub struct OpenAiEmbeddings {
    config: OpenAiEmbeddingsConfig,
    backend: Arc<dyn ProviderBackend>,
}

impl OpenAiEmbeddings {
    pub fn new(config: OpenAiEmbeddingsConfig, backend: Arc<dyn ProviderBackend>) -> Self {
        Self { config, backend }
    }

    fn build_request(&self, texts: &[&str]) -> ProviderRequest {
        let mut body = json!({
            "model": self.config.model,
            "input": texts,
        });
        if let Some(dimensions) = self.config.dimensions {
            body["dimensions"] = json!(dimensions);
        }
        ProviderRequest {
            url: format!("{}/embeddings", self.config.base_url),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

#[async_trait]
impl Embeddings for OpenAiEmbeddings {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ReachError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self.backend.send(self.build_request(texts)).await?;
        check_error_status(&resp, ReachError::Embedding)?;

        let data = resp.body["data"]
            .as_array()
            .ok_or_else(|| ReachError::Embedding("missing 'data' field".to_string()))?;

        // The API may return rows out of order; `index` is authoritative.
        let mut rows = data
            .iter()
            .enumerate()
            .map(|(pos, row)| {
                let index = row["index"].as_u64().map(|i| i as usize).unwrap_or(pos);
                Ok((index, parse_vector(&row["embedding"], index)?))
            })
            .collect::<Result<Vec<(usize, Vec<f32>)>, ReachError>>()?;
        rows.sort_by_key(|(index, _)| *index);

        if rows.len() != texts.len() {
            return Err(ReachError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                rows.len()
            )));
        }
        Ok(rows.into_iter().map(|(_, v)| v).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ReachError> {
        let mut results = self.embed_documents(&[text]).await?;
        results
            .pop()
            .ok_or_else(|| ReachError::Embedding("empty embedding response".to_string()))
    }
}

fn parse_vector(value: &Value, index: usize) -> Result<Vec<f32>, ReachError> {
    let values = value
        .as_array()
        .filter(|values| !values.is_empty())
        .ok_or_else(|| ReachError::Embedding(format!("row {index} has no embedding")))?;
    values
        .iter()
        .map(|v| {
            v.as_f64().map(|f| f as f32).ok_or_else(|| {
                ReachError::Embedding(format!("row {index} has a non-numeric embedding value"))
            })
        })
        .collect()
}
