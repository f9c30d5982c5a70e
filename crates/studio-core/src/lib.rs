//! Domain layer for Persona Studio.
//!
//! Holds the persona model, repository traits, and the response template
//! engine. Nothing in this crate performs I/O.

pub mod clock;
pub mod config;
pub mod error;
pub mod persona;
pub mod preferences;
pub mod repository;
pub mod response;

// Re-export common error type
pub use error::{Result, StudioError};
