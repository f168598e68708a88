use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use reach_core::{ChatModel, ChatRequest, ChatResponse, Message, ReachError};
use tokio::sync::Mutex;

/// A chat model that replays a fixed script of responses and errors.
#[derive(Clone)]
pub struct ScriptedChatModel {
    script: Arc<Mutex<VecDeque<Result<ChatResponse, ReachError>>>>,
    prompts: Arc<Mutex<Vec<ChatRequest>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedChatModel {
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self::from_results(responses.into_iter().map(Ok).collect())
    }

    /// Script of plain AI text replies.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|t| ChatResponse {
                    message: Message::ai(t),
                    usage: None,
                })
                .collect(),
        )
    }

    pub fn from_results(script: Vec<Result<ChatResponse, ReachError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(script))),
            prompts: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `chat` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ReachError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(request);
        let mut script = self.script.lock().await;
        script
            .pop_front()
            .unwrap_or_else(|| Err(ReachError::Model("script exhausted".to_string())))
    }
}
