mod generator;
mod prompts;
mod task;
mod template;

pub use generator::Generator;
pub use prompts::{QA_PROMPT_TEMPLATE, TOPIC_SLIDE_PROMPT_TEMPLATE};
pub use task::GenerationTask;
pub use template::PromptTemplate;
