//! Route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use reach_core::PassageSet;
use reach_generation::GenerationTask;
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub retrieval_cache_entries: usize,
    pub response_cache_entries: usize,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideRequest {
    #[serde(default)]
    pub lesson_header: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideResponse {
    pub slide_content: String,
}

#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RetrieveResponse {
    pub passages: PassageSet,
}

/// Unwrap a JSON body, turning every rejection into a 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::required(field)),
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        retrieval_cache_entries: state.generator.retriever().cache().len().await,
        response_cache_entries: state.generator.cache().len().await,
    })
}

pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let question = required(body(payload)?.question, "question")?;
    let answer = state.generator.generate(GenerationTask::Qa, &question).await?;
    Ok(Json(QueryResponse { answer }))
}

pub async fn generate_slide(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SlideRequest>, JsonRejection>,
) -> Result<Json<SlideResponse>, ApiError> {
    let header = required(body(payload)?.lesson_header, "lessonHeader")?;
    let slide_content = state
        .generator
        .generate(GenerationTask::TopicSlide, &header)
        .await?;
    Ok(Json(SlideResponse { slide_content }))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RetrieveRequest>, JsonRejection>,
) -> Result<Json<RetrieveResponse>, ApiError> {
    let query = required(body(payload)?.query, "query")?;
    let passages = state.generator.retriever().retrieve(&query).await;
    Ok(Json(RetrieveResponse { passages }))
}
