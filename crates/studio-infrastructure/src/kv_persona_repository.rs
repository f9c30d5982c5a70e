//! Key-value backed persona and version repositories.
//!
//! Personas live under `bolt_diy_saved_personas` as a JSON array of
//! versioned records; histories live under `bolt_diy_persona_versions` as a
//! JSON object keyed by persona id.

use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::dto::{PersonaRecordV1_1_0, create_persona_migrator};
use crate::storage::{KeyValueStore, PERSONA_VERSIONS_KEY, SAVED_PERSONAS_KEY};
use studio_core::error::{Result, StudioError};
use studio_core::persona::PersonaConfig;
use studio_core::repository::{PersonaRepository, PersonaVersionRepository, VersionMap};

/// A repository storing saved personas in a key-value store.
///
/// Responsibilities:
/// - Load/save the persona array under one key
/// - Execute migrations (V1.0.0 → V1.1.0 → PersonaConfig)
/// - Convert between DTOs and domain models
///
/// Does NOT:
/// - Handle file locking (delegated to the store)
pub struct KvPersonaRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvPersonaRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl PersonaRepository for KvPersonaRepository {
    async fn get_all(&self) -> Result<Vec<PersonaConfig>> {
        let Some(raw) = self.store.get(SAVED_PERSONAS_KEY)? else {
            return Ok(Vec::new());
        };

        let values: Vec<JsonValue> = serde_json::from_str(&raw)?;
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let values = values.into_iter().map(tag_unversioned_record).collect();

        let migrator = create_persona_migrator();
        let personas = migrator.load_vec_flat_from("persona", values)?;
        Ok(personas)
    }

    async fn save_all(&self, personas: &[PersonaConfig]) -> Result<()> {
        if let Some(missing) = personas.iter().find(|p| p.id.as_deref().is_none_or(str::is_empty)) {
            return Err(StudioError::validation(format!(
                "Persona '{}' has no id and cannot be stored",
                missing.name
            )));
        }

        let records: Vec<PersonaRecordV1_1_0> = personas.iter().map(Into::into).collect();

        let migrator = create_persona_migrator();
        let json_str = migrator.save_vec_flat(records)?;

        self.store.set(SAVED_PERSONAS_KEY, &json_str)?;
        Ok(())
    }
}

/// Records written before schema tagging carry no `version` field. Those
/// with a `versionNumber` already match V1.1.0.
fn tag_unversioned_record(mut value: JsonValue) -> JsonValue {
    if let Some(object) = value.as_object_mut() {
        if !object.contains_key("version") {
            let version = if object.contains_key("versionNumber") {
                "1.1.0"
            } else {
                "1.0.0"
            };
            object.insert("version".to_string(), JsonValue::String(version.to_string()));
        }
    }
    value
}

/// A repository storing every version history under one key.
pub struct KvPersonaVersionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvPersonaVersionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl PersonaVersionRepository for KvPersonaVersionRepository {
    async fn load_all(&self) -> Result<VersionMap> {
        match self.store.get(PERSONA_VERSIONS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(VersionMap::new()),
        }
    }

    async fn save_all(&self, versions: &VersionMap) -> Result<()> {
        let json = serde_json::to_string(versions)?;
        self.store.set(PERSONA_VERSIONS_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
    use studio_core::persona::{PersonaVersion, Tone};
    use tempfile::TempDir;

    fn saved(id: &str, name: &str) -> PersonaConfig {
        PersonaConfig {
            id: Some(id.to_string()),
            name: name.to_string(),
            version_number: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_repository() {
        let repo = KvPersonaRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_personas() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileKeyValueStore::new(temp_dir.path().join("storage.json")));
        let repo = KvPersonaRepository::new(store);

        let mut second = saved("persona_2", "Bob");
        second.tone = Tone::Educational;
        repo.save_all(&[saved("persona_1", "Alice"), second.clone()])
            .await
            .unwrap();

        let personas = repo.get_all().await.unwrap();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[0].name, "Alice");
        assert_eq!(personas[1], second);
    }

    #[tokio::test]
    async fn test_stored_records_carry_schema_version() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KvPersonaRepository::new(store.clone());
        repo.save_all(&[saved("persona_1", "Alice")]).await.unwrap();

        let raw = store.get(SAVED_PERSONAS_KEY).unwrap().unwrap();
        let values: Vec<JsonValue> = serde_json::from_str(&raw).unwrap();
        assert_eq!(values[0]["version"], "1.1.0");
        assert_eq!(values[0]["knowledgeDomains"][0], "technology");
    }

    #[tokio::test]
    async fn test_untagged_browser_records_load() {
        let raw = r#"[{"id":"persona_9","name":"Browser","tone":"friendly","knowledgeDomains":[],
            "responseStyle":"balanced","verbosity":20,"creativity":80,"formality":50,
            "useEmojis":false,"useCodeExamples":true,"customInstructions":"","versionNumber":3}]"#;
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(SAVED_PERSONAS_KEY, raw)]));
        let repo = KvPersonaRepository::new(store);

        let personas = repo.get_all().await.unwrap();
        assert_eq!(personas.len(), 1);
        assert_eq!(personas[0].version_number, 3);
        assert_eq!(personas[0].creativity, 80);
    }

    #[tokio::test]
    async fn test_corrupted_value_is_an_error() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            SAVED_PERSONAS_KEY,
            "{not json",
        )]));
        let repo = KvPersonaRepository::new(store);
        assert!(repo.get_all().await.is_err());
    }

    #[tokio::test]
    async fn test_refuses_personas_without_id() {
        let repo = KvPersonaRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        let err = repo.save_all(&[PersonaConfig::default()]).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_version_histories_round_trip() {
        let repo = KvPersonaVersionRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(repo.load_all().await.unwrap().is_empty());

        let mut versions = VersionMap::new();
        versions.insert(
            "persona_1".to_string(),
            vec![PersonaVersion::capture(
                &PersonaConfig::default(),
                1_700_000_000_000,
                Some("before tweak".to_string()),
            )],
        );
        repo.save_all(&versions).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded, versions);
    }
}
