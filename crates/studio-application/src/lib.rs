//! Application layer for Persona Studio.
//!
//! This crate provides the use cases that coordinate the domain and the
//! storage layer: the persona store, shareable links, theme preferences and
//! delayed reply delivery.

pub mod persona_store;
pub mod responder;
pub mod share_link;
pub mod theme_service;

pub use persona_store::{PersonaExport, PersonaStore, PersonaTarget};
pub use responder::{PendingResponse, ResponseScheduler};
pub use theme_service::ThemeService;
