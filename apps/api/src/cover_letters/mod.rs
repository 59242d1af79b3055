// Cover letters: generated from the user's profile plus a target job, stored per user.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
