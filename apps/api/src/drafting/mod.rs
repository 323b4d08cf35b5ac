// Request Composer: category selection, prompt assembly, the single completion call.
// All LLM calls go through llm_client, no direct HTTP calls here.

pub mod category;
pub mod composer;
pub mod handlers;
pub mod prompts;
