//! Persona repository traits.
//!
//! Define the interface for persona persistence operations. Each call is a
//! full read or a full replace of one collection; there is no partial update
//! and no conflict detection between concurrent writers.

use std::collections::HashMap;

use super::model::PersonaConfig;
use super::version::PersonaVersion;
use crate::error::Result;

/// An abstract repository for the saved-persona collection.
///
/// This trait decouples the persona store from the specific storage mechanism
/// (key-value file, in-memory test double, ...).
#[async_trait::async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Retrieves all saved personas in their stored order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<PersonaConfig>)`: All stored personas (empty when nothing is stored)
    /// - `Err(StudioError)`: Error if retrieval fails
    async fn get_all(&self) -> Result<Vec<PersonaConfig>>;

    /// Saves all personas, replacing the stored collection.
    async fn save_all(&self, personas: &[PersonaConfig]) -> Result<()>;
}

/// Version history keyed by persona id, newest first.
pub type VersionMap = HashMap<String, Vec<PersonaVersion>>;

/// An abstract repository for persona version histories.
#[async_trait::async_trait]
pub trait PersonaVersionRepository: Send + Sync {
    /// Retrieves every stored history.
    async fn load_all(&self) -> Result<VersionMap>;

    /// Replaces every stored history.
    async fn save_all(&self, versions: &VersionMap) -> Result<()>;
}
