// Assessment API: prompt building, LLM calls and recommendation validation.
// All LLM calls go through llm_client, never direct provider calls here.

pub mod advisor;
pub mod handlers;
pub mod models;
pub mod prompt_builder;
pub mod prompts;
pub mod questions;
pub mod validator;
