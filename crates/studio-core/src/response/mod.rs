//! Response template engine.
//!
//! A pure function of (message, persona): no I/O, no randomness, no state.
//!
//! - `engine`: step ordering and the two length policies
//! - `formality`: the ordered formality rewrite table
//! - `templates`: greetings, paragraphs and code samples

mod engine;
pub mod formality;
pub mod templates;

pub use engine::{
    LengthPolicy, ResponseEngine, first_sentence, generate_persona_response,
    generate_preview_response,
};
