pub mod composer;
pub mod decision;
pub mod error;
pub mod handlers;
pub mod lexicon;
pub mod llm_extractor;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod prompts;
pub mod requirements;
pub mod scorer;
