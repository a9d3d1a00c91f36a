// Generation pipeline: keywords → listings → per-listing cover letter and interview prep.
// All remote calls go through llm_client::TextGenerator; nothing here talks HTTP directly.

pub mod handlers;
pub mod listings;
pub mod packaging;
pub mod pipeline;
pub mod prompts;
