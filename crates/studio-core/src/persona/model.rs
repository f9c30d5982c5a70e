//! Persona domain model.
//!
//! A persona is the set of response-shaping parameters the template engine
//! reads: tone, response style, three percentage sliders, knowledge domains
//! and a couple of switches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum number of knowledge domains a persona may carry.
pub const MAX_KNOWLEDGE_DOMAINS: usize = 20;

/// Upper bound of the verbosity / creativity / formality sliders.
pub const MAX_PERCENT: u8 = 100;

/// Communication tone of a persona.
///
/// Unknown values read from storage or an import are kept verbatim in
/// `Unrecognized` so they survive a round-trip; they select no greeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    Friendly,
    Professional,
    Casual,
    Enthusiastic,
    Educational,
    Unrecognized(String),
}

impl Tone {
    /// All recognised tones, in display order.
    pub const KNOWN: [Tone; 5] = [
        Tone::Friendly,
        Tone::Professional,
        Tone::Casual,
        Tone::Enthusiastic,
        Tone::Educational,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Educational => "educational",
            Tone::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        match value.as_str() {
            "friendly" => Tone::Friendly,
            "professional" => Tone::Professional,
            "casual" => Tone::Casual,
            "enthusiastic" => Tone::Enthusiastic,
            "educational" => Tone::Educational,
            _ => Tone::Unrecognized(value),
        }
    }
}

impl From<&str> for Tone {
    fn from(value: &str) -> Self {
        Tone::from(value.to_string())
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the response length and wording is shaped by the style-aware engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseStyle {
    Concise,
    Detailed,
    Balanced,
    Precise,
    Exploratory,
    Unrecognized(String),
}

impl ResponseStyle {
    /// All recognised styles, in display order.
    pub const KNOWN: [ResponseStyle; 5] = [
        ResponseStyle::Concise,
        ResponseStyle::Detailed,
        ResponseStyle::Balanced,
        ResponseStyle::Precise,
        ResponseStyle::Exploratory,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ResponseStyle::Concise => "concise",
            ResponseStyle::Detailed => "detailed",
            ResponseStyle::Balanced => "balanced",
            ResponseStyle::Precise => "precise",
            ResponseStyle::Exploratory => "exploratory",
            ResponseStyle::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for ResponseStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "concise" => ResponseStyle::Concise,
            "detailed" => ResponseStyle::Detailed,
            "balanced" => ResponseStyle::Balanced,
            "precise" => ResponseStyle::Precise,
            "exploratory" => ResponseStyle::Exploratory,
            _ => ResponseStyle::Unrecognized(value),
        }
    }
}

impl From<&str> for ResponseStyle {
    fn from(value: &str) -> Self {
        ResponseStyle::from(value.to_string())
    }
}

impl From<ResponseStyle> for String {
    fn from(style: ResponseStyle) -> Self {
        match style {
            ResponseStyle::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configuration driving response generation.
///
/// `id` is absent while the persona is only being edited; the store assigns
/// one on the first save. Missing JSON fields fall back to the default
/// persona, and slider values outside `0..=100` are clamped while reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub tone: Tone,
    /// Earlier entries take priority.
    pub knowledge_domains: Vec<String>,
    pub response_style: ResponseStyle,
    #[serde(deserialize_with = "deserialize_percent")]
    pub verbosity: u8,
    #[serde(deserialize_with = "deserialize_percent")]
    pub creativity: u8,
    #[serde(deserialize_with = "deserialize_percent")]
    pub formality: u8,
    pub use_emojis: bool,
    pub use_code_examples: bool,
    pub custom_instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    pub version_number: u32,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            id: None,
            name: "Default Assistant".to_string(),
            description: "A helpful AI assistant with balanced settings".to_string(),
            tone: Tone::Friendly,
            knowledge_domains: vec!["technology".to_string(), "general knowledge".to_string()],
            response_style: ResponseStyle::Balanced,
            verbosity: 50,
            creativity: 50,
            formality: 50,
            use_emojis: true,
            use_code_examples: true,
            custom_instructions: String::new(),
            last_modified: None,
            version_number: 0,
        }
    }
}

impl PersonaConfig {
    pub fn set_verbosity(&mut self, value: i64) {
        self.verbosity = clamp_percent(value);
    }

    pub fn set_creativity(&mut self, value: i64) {
        self.creativity = clamp_percent(value);
    }

    pub fn set_formality(&mut self, value: i64) {
        self.formality = clamp_percent(value);
    }

    /// Appends a knowledge domain at the lowest priority.
    ///
    /// Blank and duplicate domains are ignored (returns `false`). When the
    /// list is full the oldest entry is evicted to make room.
    pub fn add_knowledge_domain(&mut self, domain: &str) -> bool {
        let domain = domain.trim();
        if domain.is_empty() || self.knowledge_domains.iter().any(|d| d == domain) {
            return false;
        }
        self.knowledge_domains.push(domain.to_string());
        if self.knowledge_domains.len() > MAX_KNOWLEDGE_DOMAINS {
            let overflow = self.knowledge_domains.len() - MAX_KNOWLEDGE_DOMAINS;
            self.knowledge_domains.drain(..overflow);
        }
        true
    }

    /// Removes a knowledge domain, returning whether it was present.
    pub fn remove_knowledge_domain(&mut self, domain: &str) -> bool {
        let before = self.knowledge_domains.len();
        self.knowledge_domains.retain(|d| d != domain);
        self.knowledge_domains.len() != before
    }

    /// Moves a domain to `position` (clamped to the end), changing its priority.
    pub fn move_knowledge_domain(&mut self, domain: &str, position: usize) -> bool {
        let Some(from) = self.knowledge_domains.iter().position(|d| d == domain) else {
            return false;
        };
        let entry = self.knowledge_domains.remove(from);
        let to = position.min(self.knowledge_domains.len());
        self.knowledge_domains.insert(to, entry);
        true
    }

    pub fn has_knowledge_domain(&self, domain: &str) -> bool {
        self.knowledge_domains.iter().any(|d| d == domain)
    }

    /// Re-establishes the invariants on data that bypassed the setters.
    ///
    /// Sliders are clamped, blank and duplicate domains dropped (first
    /// occurrence wins) and only the newest `MAX_KNOWLEDGE_DOMAINS` kept.
    pub fn normalize(&mut self) {
        self.verbosity = self.verbosity.min(MAX_PERCENT);
        self.creativity = self.creativity.min(MAX_PERCENT);
        self.formality = self.formality.min(MAX_PERCENT);

        let mut unique: Vec<String> = Vec::with_capacity(self.knowledge_domains.len());
        for domain in self.knowledge_domains.drain(..) {
            let domain = domain.trim().to_string();
            if !domain.is_empty() && !unique.contains(&domain) {
                unique.push(domain);
            }
        }
        if unique.len() > MAX_KNOWLEDGE_DOMAINS {
            let overflow = unique.len() - MAX_KNOWLEDGE_DOMAINS;
            unique.drain(..overflow);
        }
        self.knowledge_domains = unique;
    }

    /// Returns a copy without identity, suitable for sharing.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// Clamps an arbitrary integer into the slider range.
pub fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, MAX_PERCENT as i64) as u8
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, MAX_PERCENT as f64) as u8)
}
