//! Prompt construction for every model-facing text.

pub mod template;

pub use template::PromptTemplate;
