//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of stored personas. They are
//! private to the infrastructure layer and handle the evolution of the
//! storage format over time.
//!
//! ### Persona Version History
//! - **1.0.0**: Initial schema
//! - **1.1.0**: Added `versionNumber`

mod persona;

// Re-export persona DTOs and migrator
pub use persona::{PersonaRecordV1_0_0, PersonaRecordV1_1_0, create_persona_migrator};
