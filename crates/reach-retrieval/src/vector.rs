use std::sync::Arc;

use async_trait::async_trait;
use reach_core::{Embeddings, PassageSet, ReachError, SimilaritySearch, VectorStore};

/// Similarity search over a vector index: embed the query, then query by vector.
pub struct VectorSearch {
    store: Arc<dyn VectorStore>,
    embeddings: Arc<dyn Embeddings>,
}

impl VectorSearch {
    pub fn new(store: Arc<dyn VectorStore>, embeddings: Arc<dyn Embeddings>) -> Self {
        Self { store, embeddings }
    }
}

#[async_trait]
impl SimilaritySearch for VectorSearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<PassageSet, ReachError> {
        let embedding = self.embeddings.embed_query(query).await?;
        self.store.similarity_search_by_vector(&embedding, top_k).await
    }
}
