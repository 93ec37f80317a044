// Document generation: prompt construction, the model call, and rendering to PDF.
// All model calls go through llm_client::CompletionService; nothing here talks HTTP to the model.

pub mod generator;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
