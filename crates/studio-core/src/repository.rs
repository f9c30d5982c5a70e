//! Repository trait re-exports.
//!
//! This module provides centralized access to all repository traits.

pub use crate::persona::{PersonaRepository, PersonaVersionRepository, VersionMap};
pub use crate::preferences::ThemeRepository;
