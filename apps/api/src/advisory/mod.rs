// Advisory clients: the free assessment and the paid strategy roadmap.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod assessment;
pub mod prompts;
pub mod roadmap;
