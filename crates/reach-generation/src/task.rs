use std::fmt;

use crate::{PromptTemplate, QA_PROMPT_TEMPLATE, TOPIC_SLIDE_PROMPT_TEMPLATE};

/// The two generation pipelines. Each has its own prompt and response-cache namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTask {
    /// Free-form question answering; the input is the question.
    Qa,
    /// Slide content for a lesson topic; the input is the topic header.
    TopicSlide,
}

impl GenerationTask {
    pub fn namespace(&self) -> &'static str {
        match self {
            GenerationTask::Qa => "qa",
            GenerationTask::TopicSlide => "slide",
        }
    }

    /// Template variable the user input is bound to.
    pub fn input_variable(&self) -> &'static str {
        match self {
            GenerationTask::Qa => "question",
            GenerationTask::TopicSlide => "topic",
        }
    }

    /// Query sent to the retriever for `input`.
    pub fn retrieval_query(&self, input: &str) -> String {
        match self {
            GenerationTask::Qa => input.to_string(),
            GenerationTask::TopicSlide => {
                format!("Information relevant to: {input} for parents of children with cancer.")
            }
        }
    }

    pub fn default_template(&self) -> PromptTemplate {
        match self {
            GenerationTask::Qa => PromptTemplate::new(QA_PROMPT_TEMPLATE),
            GenerationTask::TopicSlide => PromptTemplate::new(TOPIC_SLIDE_PROMPT_TEMPLATE),
        }
    }
}

impl fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}
