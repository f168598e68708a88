use std::sync::Arc;

use reach_core::{ReachError, VectorStore};
use reach_models::FakeBackend;
use reach_pinecone::{PineconeConfig, PineconeVectorStore};
use serde_json::json;

#[test]
fn config_new_sets_defaults() {
    let config = PineconeConfig::new("my-api-key", "https://my-index.svc.pinecone.io");
    assert_eq!(config.api_key, "my-api-key");
    assert_eq!(config.host, "https://my-index.svc.pinecone.io");
    assert!(config.namespace.is_none());
    assert_eq!(config.text_key, "text");
}

#[test]
fn empty_namespace_means_default_namespace() {
    let config = PineconeConfig::new("key", "https://host.pinecone.io").with_namespace("");
    assert!(config.namespace.is_none());
    let config = config.with_namespace("prod");
    assert_eq!(config.namespace.as_deref(), Some("prod"));
}

#[test]
fn build_query_includes_namespace_and_api_key() {
    let config =
        PineconeConfig::new("secret", "https://idx.svc.pinecone.io").with_namespace("docs");
    let store = PineconeVectorStore::new(config, Arc::new(FakeBackend::new()));

    let req = store.build_query(&[0.1, 0.2], 10);
    assert_eq!(req.url, "https://idx.svc.pinecone.io/query");
    assert!(req
        .headers
        .contains(&("Api-Key".to_string(), "secret".to_string())));
    assert_eq!(req.body["topK"], json!(10));
    assert_eq!(req.body["includeMetadata"], json!(true));
    assert_eq!(req.body["namespace"], json!("docs"));
}

#[tokio::test]
async fn matches_become_passages_in_rank_order() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_json(
        200,
        json!({"matches": [
            {"id": "a", "score": 0.91, "metadata": {"text": "first passage", "source": "book.pdf"}},
            {"id": "b", "score": 0.80, "metadata": {"text": "second passage"}}
        ]}),
    );
    let store = PineconeVectorStore::new(PineconeConfig::new("k", "https://h"), backend);

    let passages = store.similarity_search_by_vector(&[1.0], 2).await.unwrap();
    assert_eq!(passages.len(), 2);
    assert_eq!(passages[0].text, "first passage");
    assert_eq!(passages[0].metadata["source"], json!("book.pdf"));
    assert_eq!(passages[0].metadata["id"], json!("a"));
    assert!(!passages[0].metadata.contains_key("text"));
    assert_eq!(passages[1].text, "second passage");
}

#[tokio::test]
async fn custom_text_key_is_honoured() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_json(
        200,
        json!({"matches": [{"id": "a", "metadata": {"content": "body"}}]}),
    );
    let config = PineconeConfig::new("k", "https://h").with_text_key("content");
    let store = PineconeVectorStore::new(config, backend);

    let passages = store.similarity_search_by_vector(&[1.0], 1).await.unwrap();
    assert_eq!(passages[0].text, "body");
}

#[tokio::test]
async fn http_error_is_search_error() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_json(503, json!({"message": "unavailable"}));
    let store = PineconeVectorStore::new(PineconeConfig::new("k", "https://h"), backend);

    let err = store.similarity_search_by_vector(&[1.0], 1).await.unwrap_err();
    assert!(matches!(err, ReachError::Search(_)));
}
