//! Built-in persona presets.
//!
//! Presets are unsaved personas (no id) that replace the current persona
//! wholesale when selected.

use super::model::{PersonaConfig, ResponseStyle, Tone};

/// Returns the persona used at startup and after a reset.
pub fn default_persona() -> PersonaConfig {
    PersonaConfig::default()
}

/// Returns the built-in presets, one per tone.
///
/// - **Friendly Helper**: warm, balanced defaults
/// - **Professional Expert**: formal and precise
/// - **Casual Buddy**: relaxed and short
/// - **Enthusiastic Motivator**: energetic and creative
/// - **Patient Teacher**: detailed, step-by-step explanations
pub fn get_default_presets() -> Vec<PersonaConfig> {
    vec![
        PersonaConfig {
            name: "Friendly Helper".to_string(),
            description: "A warm, approachable assistant that keeps things light".to_string(),
            tone: Tone::Friendly,
            knowledge_domains: domains(&["general knowledge", "technology"]),
            response_style: ResponseStyle::Balanced,
            verbosity: 50,
            creativity: 60,
            formality: 30,
            use_emojis: true,
            use_code_examples: true,
            ..Default::default()
        },
        PersonaConfig {
            name: "Professional Expert".to_string(),
            description: "A formal consultant focused on accuracy and clarity".to_string(),
            tone: Tone::Professional,
            knowledge_domains: domains(&["business", "technology"]),
            response_style: ResponseStyle::Precise,
            verbosity: 60,
            creativity: 30,
            formality: 85,
            use_emojis: false,
            use_code_examples: true,
            ..Default::default()
        },
        PersonaConfig {
            name: "Casual Buddy".to_string(),
            description: "A laid-back companion that gets straight to the point".to_string(),
            tone: Tone::Casual,
            knowledge_domains: domains(&["general knowledge"]),
            response_style: ResponseStyle::Concise,
            verbosity: 25,
            creativity: 55,
            formality: 15,
            use_emojis: true,
            use_code_examples: false,
            ..Default::default()
        },
        PersonaConfig {
            name: "Enthusiastic Motivator".to_string(),
            description: "An energetic cheerleader full of creative ideas".to_string(),
            tone: Tone::Enthusiastic,
            knowledge_domains: domains(&["business", "general knowledge"]),
            response_style: ResponseStyle::Exploratory,
            verbosity: 65,
            creativity: 85,
            formality: 40,
            use_emojis: true,
            use_code_examples: false,
            ..Default::default()
        },
        PersonaConfig {
            name: "Patient Teacher".to_string(),
            description: "A methodical educator who explains concepts thoroughly".to_string(),
            tone: Tone::Educational,
            knowledge_domains: domains(&["technology", "general knowledge"]),
            response_style: ResponseStyle::Detailed,
            verbosity: 80,
            creativity: 45,
            formality: 60,
            use_emojis: false,
            use_code_examples: true,
            custom_instructions: "Explain things step by step with an example.".to_string(),
            ..Default::default()
        },
    ]
}

/// Looks up a preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<PersonaConfig> {
    get_default_presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

fn domains(list: &[&str]) -> Vec<String> {
    list.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_cover_every_tone() {
        let presets = get_default_presets();
        for tone in Tone::KNOWN {
            assert!(presets.iter().any(|p| p.tone == tone), "missing {tone}");
        }
        assert!(presets.iter().all(|p| p.id.is_none()));
    }

    #[test]
    fn test_find_preset_is_case_insensitive() {
        let preset = find_preset("patient teacher").expect("preset exists");
        assert_eq!(preset.tone, Tone::Educational);
        assert!(find_preset("Nobody").is_none());
    }
}
