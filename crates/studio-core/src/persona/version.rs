//! Persona version snapshots.

use serde::{Deserialize, Serialize};

use super::model::{PersonaConfig, ResponseStyle, Tone};

/// Number of snapshots retained per saved persona.
pub const MAX_VERSIONS_PER_PERSONA: usize = 20;

/// The versioned part of a persona: everything except identity and
/// bookkeeping (`id`, `lastModified`, `versionNumber`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSnapshot {
    pub name: String,
    pub description: String,
    pub tone: Tone,
    pub knowledge_domains: Vec<String>,
    pub response_style: ResponseStyle,
    pub verbosity: u8,
    pub creativity: u8,
    pub formality: u8,
    pub use_emojis: bool,
    pub use_code_examples: bool,
    pub custom_instructions: String,
}

impl From<&PersonaConfig> for PersonaSnapshot {
    fn from(persona: &PersonaConfig) -> Self {
        Self {
            name: persona.name.clone(),
            description: persona.description.clone(),
            tone: persona.tone.clone(),
            knowledge_domains: persona.knowledge_domains.clone(),
            response_style: persona.response_style.clone(),
            verbosity: persona.verbosity,
            creativity: persona.creativity,
            formality: persona.formality,
            use_emojis: persona.use_emojis,
            use_code_examples: persona.use_code_examples,
            custom_instructions: persona.custom_instructions.clone(),
        }
    }
}

impl PersonaSnapshot {
    /// Rebuilds a persona under the given id. Bookkeeping fields start empty;
    /// the store fills them on save.
    pub fn into_persona(self, id: &str) -> PersonaConfig {
        PersonaConfig {
            id: Some(id.to_string()),
            name: self.name,
            description: self.description,
            tone: self.tone,
            knowledge_domains: self.knowledge_domains,
            response_style: self.response_style,
            verbosity: self.verbosity,
            creativity: self.creativity,
            formality: self.formality,
            use_emojis: self.use_emojis,
            use_code_examples: self.use_code_examples,
            custom_instructions: self.custom_instructions,
            last_modified: None,
            version_number: 0,
        }
    }
}

/// An immutable snapshot of a saved persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaVersion {
    /// Creation time in epoch milliseconds; identifies the version.
    pub timestamp: i64,
    pub data: PersonaSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PersonaVersion {
    pub fn capture(persona: &PersonaConfig, timestamp: i64, notes: Option<String>) -> Self {
        Self {
            timestamp,
            data: PersonaSnapshot::from(persona),
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Prepends `version` to a newest-first history and drops whatever falls
/// beyond `MAX_VERSIONS_PER_PERSONA`.
pub fn push_version(history: &mut Vec<PersonaVersion>, version: PersonaVersion) {
    history.insert(0, version);
    history.truncate(MAX_VERSIONS_PER_PERSONA);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_excludes_bookkeeping() {
        let persona = PersonaConfig {
            id: Some("persona_1".to_string()),
            version_number: 7,
            ..Default::default()
        };
        let json = serde_json::to_value(PersonaSnapshot::from(&persona)).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("versionNumber").is_none());
        assert!(json.get("lastModified").is_none());
        assert_eq!(json["name"], "Default Assistant");
    }

    #[test]
    fn test_into_persona_restores_fields() {
        let persona = PersonaConfig {
            name: "Snap".to_string(),
            formality: 90,
            ..Default::default()
        };
        let restored = PersonaSnapshot::from(&persona).into_persona("persona_9");
        assert_eq!(restored.id.as_deref(), Some("persona_9"));
        assert_eq!(restored.name, "Snap");
        assert_eq!(restored.formality, 90);
    }

    #[test]
    fn test_push_version_caps_history() {
        let persona = PersonaConfig::default();
        let mut history = Vec::new();
        for ts in 0..25 {
            push_version(&mut history, PersonaVersion::capture(&persona, ts, None));
        }
        assert_eq!(history.len(), MAX_VERSIONS_PER_PERSONA);
        assert_eq!(history[0].timestamp, 24);
        assert_eq!(history.last().unwrap().timestamp, 5);
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let version = PersonaVersion::capture(&PersonaConfig::default(), 1, Some("  ".into()));
        assert!(version.notes.is_none());
    }
}
