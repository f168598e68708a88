use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use reach_cache::TtlCache;
use reach_core::{join_passages, ChatModel, ChatRequest, ReachError};
use reach_retrieval::AdaptiveRetriever;
use tracing::{debug, error, info};

use crate::{GenerationTask, PromptTemplate};

/// Runs retrieval, prompt assembly and generation for a [`GenerationTask`], caching
/// successful outputs per task and input.
///
/// Retrieval is fail-open (an empty context still produces an answer); generation is
/// fail-closed. A failed model call is returned to the caller and nothing is cached.
pub struct Generator {
    retriever: Arc<AdaptiveRetriever>,
    model: Arc<dyn ChatModel>,
    cache: Arc<TtlCache<String>>,
    templates: HashMap<GenerationTask, PromptTemplate>,
}

impl Generator {
    pub fn new(
        retriever: Arc<AdaptiveRetriever>,
        model: Arc<dyn ChatModel>,
        cache: Arc<TtlCache<String>>,
    ) -> Self {
        let templates = [GenerationTask::Qa, GenerationTask::TopicSlide]
            .into_iter()
            .map(|task| (task, task.default_template()))
            .collect();
        Self {
            retriever,
            model,
            cache,
            templates,
        }
    }

    /// Replace the prompt used for `task`. The template must reference `context`
    /// and the task's input variable.
    pub fn with_template(mut self, task: GenerationTask, template: PromptTemplate) -> Self {
        self.templates.insert(task, template);
        self
    }

    pub fn retriever(&self) -> &Arc<AdaptiveRetriever> {
        &self.retriever
    }

    pub fn cache(&self) -> &Arc<TtlCache<String>> {
        &self.cache
    }

    pub fn cache_key(task: GenerationTask, input: &str) -> String {
        format!("response:{}:{input}", task.namespace())
    }

    /// Retrieve context for `input` and render the task prompt around it.
    pub async fn build_prompt(
        &self,
        task: GenerationTask,
        input: &str,
    ) -> Result<String, ReachError> {
        let passages = self.retriever.retrieve(&task.retrieval_query(input)).await;
        debug!(task = %task, passages = passages.len(), "assembling prompt");
        let context = join_passages(&passages);

        let template = self
            .templates
            .get(&task)
            .ok_or_else(|| ReachError::Prompt(format!("no template for task {task}")))?;
        let values = HashMap::from([
            ("context", context.as_str()),
            (task.input_variable(), input),
        ]);
        template.render(&values)
    }

    pub async fn generate(&self, task: GenerationTask, input: &str) -> Result<String, ReachError> {
        if input.trim().is_empty() {
            return Err(ReachError::Validation(format!(
                "{} is required",
                task.input_variable()
            )));
        }

        let key = Self::cache_key(task, input);
        if let Some(cached) = self.cache.get(&key).await {
            info!(task = %task, input, "response cache hit");
            return Ok(cached);
        }
        info!(task = %task, input, "response cache miss");

        let started = Instant::now();
        let prompt = self.build_prompt(task, input).await?;
        let response = match self.model.chat(ChatRequest::from_prompt(prompt)).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    task = %task,
                    input,
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "generation failed"
                );
                return Err(e);
            }
        };

        let output = response.message.content().to_string();
        self.cache.set(key, output.clone()).await;
        info!(
            task = %task,
            input,
            chars = output.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated response"
        );
        Ok(output)
    }
}
