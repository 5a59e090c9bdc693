// AI content generation: slogans, template copy, free-form text, images.
// All provider calls go through ai_client — no direct API calls here.

pub mod fallback;
pub mod handlers;
pub mod images;
pub mod parse;
pub mod prompts;
pub mod slogans;
pub mod templates;
