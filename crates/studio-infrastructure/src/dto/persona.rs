//! Stored persona DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, MigratesTo, Migrator, Versioned};

use studio_core::persona::{PersonaConfig, ResponseStyle, Tone, clamp_percent};

/// Represents V1.0.0 of the stored persona schema.
///
/// Personas were saved without a version counter.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct PersonaRecordV1_0_0 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub tone: String,
    #[serde(default)]
    pub knowledge_domains: Vec<String>,
    pub response_style: String,
    pub verbosity: i64,
    pub creativity: i64,
    pub formality: i64,
    #[serde(default)]
    pub use_emojis: bool,
    #[serde(default)]
    pub use_code_examples: bool,
    #[serde(default)]
    pub custom_instructions: String,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Represents V1.1.0 of the stored persona schema.
///
/// Adds `versionNumber`, bumped on every save.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct PersonaRecordV1_1_0 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub tone: String,
    #[serde(default)]
    pub knowledge_domains: Vec<String>,
    pub response_style: String,
    pub verbosity: i64,
    pub creativity: i64,
    pub formality: i64,
    #[serde(default)]
    pub use_emojis: bool,
    #[serde(default)]
    pub use_code_examples: bool,
    #[serde(default)]
    pub custom_instructions: String,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version_number: u32,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from PersonaRecordV1_0_0 to PersonaRecordV1_1_0.
///
/// Anything stored under V1.0.0 has been saved at least once.
impl MigratesTo<PersonaRecordV1_1_0> for PersonaRecordV1_0_0 {
    fn migrate(self) -> PersonaRecordV1_1_0 {
        PersonaRecordV1_1_0 {
            id: self.id,
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
            last_modified: self.last_modified,
            version_number: 1,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert PersonaRecordV1_1_0 DTO to domain model.
impl IntoDomain<PersonaConfig> for PersonaRecordV1_1_0 {
    fn into_domain(self) -> PersonaConfig {
        let mut persona = PersonaConfig {
            id: Some(self.id),
            name: self.name,
            description: self.description,
            tone: Tone::from(self.tone),
            knowledge_domains: self.knowledge_domains,
            response_style: ResponseStyle::from(self.response_style),
            verbosity: clamp_percent(self.verbosity),
            creativity: clamp_percent(self.creativity),
            formality: clamp_percent(self.formality),
            use_emojis: self.use_emojis,
            use_code_examples: self.use_code_examples,
            custom_instructions: self.custom_instructions,
            last_modified: self.last_modified,
            version_number: self.version_number,
        };
        persona.normalize();
        persona
    }
}

/// Convert domain model to PersonaRecordV1_1_0 DTO for persistence.
impl From<&PersonaConfig> for PersonaRecordV1_1_0 {
    fn from(persona: &PersonaConfig) -> Self {
        PersonaRecordV1_1_0 {
            id: persona.id.clone().unwrap_or_default(),
            name: persona.name.clone(),
            description: persona.description.clone(),
            tone: persona.tone.to_string(),
            knowledge_domains: persona.knowledge_domains.clone(),
            response_style: persona.response_style.to_string(),
            verbosity: i64::from(persona.verbosity),
            creativity: i64::from(persona.creativity),
            formality: i64::from(persona.formality),
            use_emojis: persona.use_emojis,
            use_code_examples: persona.use_code_examples,
            custom_instructions: persona.custom_instructions.clone(),
            last_modified: persona.last_modified,
            version_number: persona.version_number,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for stored personas.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Adds `versionNumber` (starts at 1)
/// - V1.1.0 → PersonaConfig: Converts DTO to domain model
pub fn create_persona_migrator() -> Migrator {
    let mut migrator = Migrator::builder().build();

    let persona_path = Migrator::define("persona")
        .from::<PersonaRecordV1_0_0>()
        .step::<PersonaRecordV1_1_0>()
        .into::<PersonaConfig>();

    migrator
        .register(persona_path)
        .expect("Failed to register persona migration path");

    migrator
}
