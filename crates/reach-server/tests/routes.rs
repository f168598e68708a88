use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use reach_cache::{CacheConfig, TtlCache};
use reach_core::{ChatResponse, Message, Passage, ReachError};
use reach_generation::Generator;
use reach_models::ScriptedChatModel;
use reach_retrieval::{AdaptiveRetriever, InMemorySearch, RetrieverConfig};
use reach_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn corpus() -> Vec<Passage> {
    vec![
        Passage::new("Sleep changes are common. Keep a steady bedtime routine, limit caffeine after noon and keep the bedroom dark and quiet at night."),
        Passage::new("Nutrition matters during treatment. Offer small frequent meals, keep favourite snacks close by and encourage plenty of fluids every day."),
    ]
}

fn app(model: Arc<ScriptedChatModel>) -> (Router, Arc<AppState>) {
    let config = CacheConfig::default();
    let retriever = Arc::new(AdaptiveRetriever::new(
        Arc::new(InMemorySearch::new(corpus())),
        Arc::new(TtlCache::new(config.clone())),
        RetrieverConfig::default(),
    ));
    let generator = Generator::new(retriever, model, Arc::new(TtlCache::new(config)));
    let state = Arc::new(AppState::new(Arc::new(generator)));
    (build_router(state.clone()), state)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn query_returns_answer_and_caches_it() {
    let model = Arc::new(ScriptedChatModel::from_texts(["Keep a steady routine."]));
    let (router, _) = app(model.clone());

    for _ in 0..2 {
        let request = post("/api/query", json!({"question": "sleep tips"}));
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "Keep a steady routine."}));
    }
    assert_eq!(model.calls(), 1);

    let health = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&router, health).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["retrievalCacheEntries"], 1);
    assert_eq!(body["responseCacheEntries"], 1);
}

#[tokio::test]
async fn generate_slide_returns_slide_content() {
    let model = Arc::new(ScriptedChatModel::from_texts(["* Offer small meals"]));
    let (router, _) = app(model.clone());

    let (status, body) = send(
        &router,
        post("/api/generateSlide", json!({"lessonHeader": "Nutrition"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"slideContent": "* Offer small meals"}));

    let prompt = model.requests().await[0].messages[0].content().to_string();
    assert!(prompt.contains("Topic for this slide:\nNutrition"));
}

#[tokio::test]
async fn missing_or_blank_fields_are_rejected() {
    let model = Arc::new(ScriptedChatModel::from_texts(["unused"]));
    let (router, state) = app(model.clone());

    let cases = [
        ("/api/query", json!({}), "question is required"),
        ("/api/query", json!({"question": "  "}), "question is required"),
        ("/api/generateSlide", json!({"lessonHeader": ""}), "lessonHeader is required"),
        ("/api/retrieve", json!({"other": "x"}), "query is required"),
    ];
    for (uri, payload, message) in cases {
        let (status, body) = send(&router, post(uri, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"error": message}));
    }

    assert_eq!(model.calls(), 0);
    assert!(state.generator.cache().is_empty().await);
    assert!(state.generator.retriever().cache().is_empty().await);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let model = Arc::new(ScriptedChatModel::from_texts(["unused"]));
    let (router, _) = app(model);

    let request = Request::builder()
        .method("POST")
        .uri("/api/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn generation_failure_is_a_server_error_and_not_cached() {
    let model = Arc::new(ScriptedChatModel::from_results(vec![
        Err(ReachError::Timeout("model timed out".to_string())),
        Ok(ChatResponse {
            message: Message::ai("second try"),
            usage: None,
        }),
    ]));
    let (router, state) = app(model.clone());

    let (status, body) = send(&router, post("/api/query", json!({"question": "sleep"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
    assert!(state.generator.cache().is_empty().await);

    let (status, body) = send(&router, post("/api/query", json!({"question": "sleep"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "second try");
}

#[tokio::test]
async fn retrieve_exposes_clean_passages() {
    let model = Arc::new(ScriptedChatModel::from_texts(Vec::<String>::new()));
    let (router, _) = app(model.clone());

    let request = post("/api/retrieve", json!({"query": "nutrition meals"}));
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    let passages = body["passages"].as_array().unwrap();
    assert_eq!(passages.len(), 1);
    assert!(passages[0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Nutrition matters"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let model = Arc::new(ScriptedChatModel::from_texts(Vec::<String>::new()));
    let (router, _) = app(model);

    let request = Request::get("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
