//! Persona domain module.
//!
//! This module contains all persona-related domain models, repository interfaces,
//! version snapshots and preset configurations.
//!
//! # Module Structure
//!
//! - `model`: Core persona model (`PersonaConfig`, `Tone`, `ResponseStyle`)
//! - `version`: Immutable snapshots and history retention
//! - `repository`: Repository traits for persona and version persistence
//! - `preset`: Built-in presets and the default persona
//! - `request`: Validation of imported / shared payloads
//!
//! # Usage
//!
//! ```ignore
//! use studio_core::persona::{PersonaConfig, PersonaRepository, get_default_presets};
//! ```

mod model;
mod preset;
mod repository;
pub mod request;
mod version;

// Re-export public API
pub use model::{
    MAX_KNOWLEDGE_DOMAINS, MAX_PERCENT, PersonaConfig, ResponseStyle, Tone, clamp_percent,
};
pub use preset::{default_persona, find_preset, get_default_presets};
pub use repository::{PersonaRepository, PersonaVersionRepository, VersionMap};
pub use request::{PersonaBundle, parse_persona_payload, split_import_payload};
pub use version::{MAX_VERSIONS_PER_PERSONA, PersonaSnapshot, PersonaVersion, push_version};
