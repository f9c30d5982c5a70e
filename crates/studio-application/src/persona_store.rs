//! Persona Store
//!
//! Owns the persona being edited, the saved persona list and the per-persona
//! version history. Every mutation writes through to the injected
//! repositories; persistence failures are logged and never surfaced.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::share_link;
use studio_core::clock::Clock;
use studio_core::error::{Result, StudioError};
use studio_core::persona::request::{EXPORT_BUNDLE_VERSION, persona_from_value};
use studio_core::persona::{
    PersonaBundle, PersonaConfig, PersonaRepository, PersonaVersion, PersonaVersionRepository,
    VersionMap, default_persona, find_preset, parse_persona_payload, push_version,
    split_import_payload,
};

/// Which persona an export or share operation works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaTarget {
    /// The persona currently being edited.
    Current,
    /// A saved persona, by id.
    Saved(String),
}

impl PersonaTarget {
    /// `"current"` selects the edited persona, anything else is a saved id.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("current") {
            Self::Current
        } else {
            Self::Saved(value.to_string())
        }
    }
}

/// A serialized export ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaExport {
    pub file_name: String,
    pub contents: String,
}

/// Persona state plus its persistence.
pub struct PersonaStore {
    persona_repository: Arc<dyn PersonaRepository>,
    version_repository: Arc<dyn PersonaVersionRepository>,
    clock: Arc<dyn Clock>,
    share_base_url: String,
    current: PersonaConfig,
    is_customized: bool,
    saved: Vec<PersonaConfig>,
    versions: VersionMap,
    /// Last millisecond handed out for an id or version timestamp.
    last_issued_millis: i64,
}

impl PersonaStore {
    /// Opens the store, loading saved personas and version history.
    ///
    /// Loading is best effort: whatever fails to load starts out empty.
    pub async fn open(
        persona_repository: Arc<dyn PersonaRepository>,
        version_repository: Arc<dyn PersonaVersionRepository>,
        clock: Arc<dyn Clock>,
        share_base_url: impl Into<String>,
    ) -> Self {
        let saved = match persona_repository.get_all().await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to load saved personas, starting empty: {}", e);
                Vec::new()
            }
        };
        let versions = match version_repository.load_all().await {
            Ok(versions) => versions,
            Err(e) => {
                tracing::warn!("Failed to load persona versions, starting empty: {}", e);
                VersionMap::new()
            }
        };

        let last_issued_millis = versions
            .values()
            .flatten()
            .map(|version| version.timestamp)
            .max()
            .unwrap_or(i64::MIN);

        tracing::info!(
            "Persona store opened with {} saved persona(s) and {} version history(ies)",
            saved.len(),
            versions.len()
        );

        Self {
            persona_repository,
            version_repository,
            clock,
            share_base_url: share_base_url.into(),
            current: default_persona(),
            is_customized: false,
            saved,
            versions,
            last_issued_millis,
        }
    }

    pub fn current(&self) -> &PersonaConfig {
        &self.current
    }

    /// Whether the current persona differs from the untouched default.
    pub fn is_customized(&self) -> bool {
        self.is_customized
    }

    /// Saved personas in insertion order.
    pub fn saved_personas(&self) -> &[PersonaConfig] {
        &self.saved
    }

    pub fn find_saved(&self, id: &str) -> Option<&PersonaConfig> {
        self.saved.iter().find(|p| p.id.as_deref() == Some(id))
    }

    pub fn share_base_url(&self) -> &str {
        &self.share_base_url
    }

    // ============================================================================
    // Current persona
    // ============================================================================

    pub fn set_current(&mut self, config: PersonaConfig) {
        self.current = config;
        self.current.normalize();
        self.is_customized = true;
    }

    /// Edits the current persona in place.
    pub fn update_current(&mut self, edit: impl FnOnce(&mut PersonaConfig)) {
        edit(&mut self.current);
        self.current.normalize();
        self.is_customized = true;
    }

    /// Replaces the current persona with a preset. Unknown names change nothing.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match find_preset(name) {
            Some(preset) => {
                tracing::debug!("Applying preset '{}'", preset.name);
                self.set_current(preset);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.current = default_persona();
        self.is_customized = false;
    }

    // ============================================================================
    // Saved personas
    // ============================================================================

    /// Saves a persona and makes it current. Returns its id.
    ///
    /// Re-saving an existing id snapshots the previously stored value into
    /// the version history first.
    pub async fn save(&mut self, config: PersonaConfig) -> String {
        let mut persona = config;
        persona.normalize();

        let millis = self.next_millis();
        let id = match persona.id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => format!("persona_{millis}"),
        };
        persona.id = Some(id.clone());
        persona.last_modified = Some(self.datetime_at(millis));

        let existing = self
            .saved
            .iter()
            .position(|p| p.id.as_deref() == Some(id.as_str()));

        match existing {
            Some(index) => {
                let previous = &self.saved[index];
                persona.version_number = persona
                    .version_number
                    .max(previous.version_number)
                    .saturating_add(1);
                let snapshot = PersonaVersion::capture(previous, millis, None);
                push_version(self.versions.entry(id.clone()).or_default(), snapshot);
                self.saved[index] = persona.clone();
                self.persist_personas().await;
                self.persist_versions().await;
            }
            None => {
                persona.version_number = persona.version_number.saturating_add(1);
                self.saved.push(persona.clone());
                self.persist_personas().await;
            }
        }

        tracing::info!(
            "Saved persona '{}' ({}) as version {}",
            persona.name,
            id,
            persona.version_number
        );

        self.current = persona;
        self.is_customized = true;
        id
    }

    /// Removes a saved persona. Its version history stays queryable.
    pub async fn delete(&mut self, id: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|p| p.id.as_deref() != Some(id));
        if self.saved.len() == before {
            return false;
        }
        self.persist_personas().await;
        tracing::info!("Deleted persona {}", id);
        true
    }

    /// Makes a saved persona current. Unknown ids are a silent no-op.
    pub fn load(&mut self, id: &str) -> bool {
        match self.find_saved(id).cloned() {
            Some(persona) => {
                self.current = persona;
                self.is_customized = true;
                true
            }
            None => {
                tracing::debug!("No saved persona with id {}", id);
                false
            }
        }
    }

    // ============================================================================
    // Export / import
    // ============================================================================

    pub fn export(&self, target: &PersonaTarget) -> Result<PersonaExport> {
        let persona = self.resolve(target)?;
        Ok(PersonaExport {
            file_name: format!("{}.json", slugify(&persona.name)),
            contents: serde_json::to_string_pretty(persona)?,
        })
    }

    /// Exports every saved persona as one bundle.
    pub fn export_all(&self) -> Result<PersonaExport> {
        let now = self.clock.now();
        let personas = self
            .saved
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()?;
        let bundle = PersonaBundle {
            personas,
            export_date: Some(now.to_rfc3339()),
            version: Some(EXPORT_BUNDLE_VERSION.to_string()),
        };
        Ok(PersonaExport {
            file_name: format!("personas-export-{}.json", now.format("%Y-%m-%d")),
            contents: serde_json::to_string_pretty(&bundle)?,
        })
    }

    /// Imports a single persona from JSON text. Invalid input yields `false`.
    pub async fn import(&mut self, json: &str) -> bool {
        match parse_persona_payload(json) {
            Ok(persona) => {
                self.save_imported(persona).await;
                true
            }
            Err(e) => {
                tracing::warn!("Rejected persona import: {}", e);
                false
            }
        }
    }

    /// Imports a bundle or a single persona; returns how many were imported.
    pub async fn import_bundle(&mut self, json: &str) -> usize {
        let entries = match split_import_payload(json) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Rejected persona bundle: {}", e);
                return 0;
            }
        };

        let total = entries.len();
        let mut imported = 0;
        for entry in entries {
            match persona_from_value(entry) {
                Ok(persona) => {
                    self.save_imported(persona).await;
                    imported += 1;
                }
                Err(e) => tracing::warn!("Skipping bundle entry: {}", e),
            }
        }

        tracing::info!("Imported {} of {} persona(s)", imported, total);
        imported
    }

    async fn save_imported(&mut self, mut persona: PersonaConfig) -> String {
        persona.id = Some(format!("imported_{}", self.next_millis()));
        self.save(persona).await
    }

    // ============================================================================
    // Shareable links
    // ============================================================================

    pub fn generate_shareable_link(&self, target: &PersonaTarget) -> Result<String> {
        let persona = self.resolve(target)?;
        let encoded = share_link::encode_persona(persona)?;
        share_link::build_share_url(&self.share_base_url, &encoded)
    }

    /// Imports a persona from a link payload. Any failure yields `false`.
    pub async fn import_from_shareable_link(&mut self, encoded: &str) -> bool {
        match share_link::decode_payload(encoded) {
            Ok(json) => self.import(&json).await,
            Err(e) => {
                tracing::warn!("Invalid shared persona payload: {}", e);
                false
            }
        }
    }

    /// Checks a full URL for a shared persona.
    ///
    /// Returns `None` when the URL carries no `sharedPersona` parameter.
    /// Otherwise returns the import outcome and the URL with the parameter
    /// removed.
    pub async fn import_from_url(&mut self, url: &str) -> Option<(bool, String)> {
        let encoded = share_link::extract_shared_persona(url)?;
        let imported = self.import_from_shareable_link(&encoded).await;
        let cleaned = share_link::strip_shared_persona(url).unwrap_or_else(|_| url.to_string());
        Some((imported, cleaned))
    }

    // ============================================================================
    // Version history
    // ============================================================================

    /// Newest-first history for `id`; empty when there is none.
    pub fn get_versions(&self, id: &str) -> &[PersonaVersion] {
        self.versions.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Snapshots the stored value of a saved persona.
    pub async fn save_version(
        &mut self,
        id: &str,
        notes: Option<String>,
    ) -> Result<PersonaVersion> {
        let persona = self
            .find_saved(id)
            .cloned()
            .ok_or_else(|| StudioError::not_found("persona", id))?;

        let version = PersonaVersion::capture(&persona, self.next_millis(), notes);
        push_version(self.versions.entry(id.to_string()).or_default(), version.clone());
        self.persist_versions().await;

        tracing::info!("Saved version {} of persona {}", version.timestamp, id);
        Ok(version)
    }

    /// Restores a snapshot by saving it over the persona, which makes it
    /// current and pushes the replaced value into the history.
    pub async fn restore_version(&mut self, id: &str, timestamp: i64) -> Result<()> {
        let existing = self
            .find_saved(id)
            .ok_or_else(|| StudioError::not_found("persona", id))?;
        let version_number = existing.version_number;

        let version = self
            .get_versions(id)
            .iter()
            .find(|v| v.timestamp == timestamp)
            .cloned()
            .ok_or_else(|| StudioError::not_found("persona version", format!("{id}@{timestamp}")))?;

        let mut restored = version.data.into_persona(id);
        restored.version_number = version_number;
        self.save(restored).await;

        tracing::info!("Restored persona {} to version {}", id, timestamp);
        Ok(())
    }

    pub async fn delete_version(&mut self, id: &str, timestamp: i64) -> bool {
        let Some(history) = self.versions.get_mut(id) else {
            return false;
        };
        let before = history.len();
        history.retain(|v| v.timestamp != timestamp);
        if history.len() == before {
            return false;
        }
        self.persist_versions().await;
        true
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn resolve(&self, target: &PersonaTarget) -> Result<&PersonaConfig> {
        match target {
            PersonaTarget::Current => Ok(&self.current),
            PersonaTarget::Saved(id) => self
                .find_saved(id)
                .ok_or_else(|| StudioError::not_found("persona", id.as_str())),
        }
    }

    /// Current time in epoch milliseconds, strictly after anything issued
    /// before.
    fn next_millis(&mut self) -> i64 {
        let now = self.clock.now().timestamp_millis();
        let millis = now.max(self.last_issued_millis.saturating_add(1));
        self.last_issued_millis = millis;
        millis
    }

    fn datetime_at(&self, millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or_else(|| self.clock.now())
    }

    async fn persist_personas(&self) {
        if let Err(e) = self.persona_repository.save_all(&self.saved).await {
            tracing::warn!("Failed to persist saved personas: {}", e);
        }
    }

    async fn persist_versions(&self) {
        if let Err(e) = self.version_repository.save_all(&self.versions).await {
            tracing::warn!("Failed to persist persona versions: {}", e);
        }
    }
}

/// File-name slug: lowercase, non-alphanumeric runs collapsed to `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "persona".to_string()
    } else {
        slug
    }
}
