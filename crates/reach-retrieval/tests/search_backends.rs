use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reach_core::{Embeddings, Passage, PassageSet, ReachError, SimilaritySearch, VectorStore};
use reach_retrieval::{InMemorySearch, VectorSearch};

// ---------------------------------------------------------------------------
// InMemorySearch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn in_memory_ranks_by_shared_terms() {
    let search = InMemorySearch::new(vec![
        Passage::new("cooking dinner at home"),
        Passage::new("sleep and fatigue during treatment"),
        Passage::new("sleep routines"),
    ]);

    let results = search.search("Sleep fatigue?", 5).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, "sleep and fatigue during treatment");
    assert_eq!(results[1].text, "sleep routines");
}

#[tokio::test]
async fn in_memory_respects_top_k() {
    let passages: Vec<Passage> = (0..20)
        .map(|i| Passage::new(format!("passage about topic number {i}")))
        .collect();
    let search = InMemorySearch::new(passages);

    let results = search.search("topic", 3).await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].text, "passage about topic number 0");
}

#[tokio::test]
async fn in_memory_empty_corpus_returns_empty() {
    let search = InMemorySearch::default();
    assert!(search.is_empty());
    assert!(search.search("anything", 5).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// VectorSearch
// ---------------------------------------------------------------------------

struct FixedEmbeddings;

#[async_trait]
impl Embeddings for FixedEmbeddings {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ReachError> {
        Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ReachError> {
        Ok(vec![text.len() as f32])
    }
}

struct FailingEmbeddings;

#[async_trait]
impl Embeddings for FailingEmbeddings {
    async fn embed_documents(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, ReachError> {
        Err(ReachError::Embedding("offline".to_string()))
    }

    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, ReachError> {
        Err(ReachError::Embedding("offline".to_string()))
    }
}

#[derive(Default)]
struct RecordingStore {
    seen: Mutex<Vec<(Vec<f32>, usize)>>,
}

#[async_trait]
impl VectorStore for RecordingStore {
    async fn similarity_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<PassageSet, ReachError> {
        self.seen.lock().unwrap().push((embedding.to_vec(), k));
        Ok(vec![Passage::new("from the index")])
    }
}

#[tokio::test]
async fn vector_search_embeds_query_then_queries_store() {
    let store = Arc::new(RecordingStore::default());
    let search = VectorSearch::new(store.clone(), Arc::new(FixedEmbeddings));

    let results = search.search("abcd", 7).await.unwrap();

    assert_eq!(results, vec![Passage::new("from the index")]);
    assert_eq!(store.seen.lock().unwrap().clone(), vec![(vec![4.0], 7)]);
}

#[tokio::test]
async fn vector_search_propagates_embedding_failure() {
    let store = Arc::new(RecordingStore::default());
    let search = VectorSearch::new(store.clone(), Arc::new(FailingEmbeddings));

    let err = search.search("abcd", 7).await.unwrap_err();
    assert!(matches!(err, ReachError::Embedding(_)));
    assert!(store.seen.lock().unwrap().is_empty());
}
