// Bullet forge: form validation, prompt assembly, and the single completion call.
// All LLM calls go through llm_client — nothing here speaks HTTP to OpenAI directly.

pub mod generator;
pub mod handlers;
pub mod options;
pub mod prompts;
pub mod request;
