//! Parsing of persona payloads coming from outside the store.
//!
//! The same rules apply to file imports, bundle imports and shareable links:
//! the payload must be a JSON object with a non-empty string `name`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::PersonaConfig;
use crate::error::{Result, StudioError};

/// Schema tag written into bulk export files.
pub const EXPORT_BUNDLE_VERSION: &str = "1.0";

/// Parses a single persona payload.
///
/// Any `id` in the payload is discarded; the caller assigns a fresh one.
pub fn parse_persona_payload(json: &str) -> Result<PersonaConfig> {
    let value: Value = serde_json::from_str(json)?;
    persona_from_value(value)
}

/// Converts an already-parsed JSON value into a persona.
pub fn persona_from_value(value: Value) -> Result<PersonaConfig> {
    let has_name = value
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(StudioError::validation(
            "Persona payload requires a non-empty string `name`",
        ));
    }

    let mut persona: PersonaConfig = serde_json::from_value(value)?;
    persona.id = None;
    persona.normalize();
    Ok(persona)
}

/// Wrapper used for bulk export and import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaBundle {
    pub personas: Vec<Value>,
    #[serde(default)]
    pub export_date: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Splits an import payload into individual persona values.
///
/// Accepts either a bundle (`{ "personas": [...] }`) or a single persona
/// object. Entries are not validated here.
pub fn split_import_payload(json: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(json)?;
    if value.get("personas").is_some_and(Value::is_array) {
        let bundle: PersonaBundle = serde_json::from_value(value)?;
        return Ok(bundle.personas);
    }
    if value.is_object() {
        return Ok(vec![value]);
    }
    Err(StudioError::validation(
        "Import payload must be a persona object or a persona bundle",
    ))
}
