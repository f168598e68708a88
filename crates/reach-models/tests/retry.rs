use std::sync::Arc;
use std::time::Duration;

use reach_core::{ChatModel, ChatRequest, ChatResponse, Message, ReachError};
use reach_models::{RetryChatModel, RetryPolicy, ScriptedChatModel};

fn ok(text: &str) -> Result<ChatResponse, ReachError> {
    Ok(ChatResponse {
        message: Message::ai(text),
        usage: None,
    })
}

fn fast_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn retries_on_rate_limit() {
    let inner = ScriptedChatModel::from_results(vec![
        Err(ReachError::RateLimit("rate limited".to_string())),
        Err(ReachError::RateLimit("rate limited".to_string())),
        ok("success"),
    ]);
    let model = RetryChatModel::new(Arc::new(inner.clone()), fast_policy(3));

    let response = model.chat(ChatRequest::from_prompt("hi")).await.unwrap();
    assert_eq!(response.message.content(), "success");
    assert_eq!(inner.calls(), 3);
}

#[tokio::test]
async fn retries_on_timeout() {
    let inner = ScriptedChatModel::from_results(vec![
        Err(ReachError::Timeout("timed out".to_string())),
        ok("success"),
    ]);
    let model = RetryChatModel::new(Arc::new(inner.clone()), fast_policy(3));

    let response = model.chat(ChatRequest::from_prompt("hi")).await.unwrap();
    assert_eq!(response.message.content(), "success");
    assert_eq!(inner.calls(), 2);
}

#[tokio::test]
async fn does_not_retry_model_errors() {
    let inner = ScriptedChatModel::from_results(vec![
        Err(ReachError::Model("bad request".to_string())),
        ok("never reached"),
    ]);
    let model = RetryChatModel::new(Arc::new(inner.clone()), fast_policy(3));

    let err = model.chat(ChatRequest::from_prompt("hi")).await.unwrap_err();
    assert!(matches!(err, ReachError::Model(_)));
    assert_eq!(inner.calls(), 1);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let inner = ScriptedChatModel::from_results(vec![
        Err(ReachError::Timeout("1".to_string())),
        Err(ReachError::Timeout("2".to_string())),
        ok("too late"),
    ]);
    let model = RetryChatModel::new(Arc::new(inner.clone()), fast_policy(2));

    let err = model.chat(ChatRequest::from_prompt("hi")).await.unwrap_err();
    assert!(matches!(err, ReachError::Timeout(_)));
    assert_eq!(inner.calls(), 2);
}
