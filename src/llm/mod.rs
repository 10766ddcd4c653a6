//! LLM module for careplan
//!
//! Builds the care plan prompt, sends it to a text-generation provider, and
//! parses the completion.

mod client;
mod gemini;
mod openai;
pub mod parser;
pub mod prompts;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use parser::parse_completion;
pub use prompts::build_plan_prompt;
