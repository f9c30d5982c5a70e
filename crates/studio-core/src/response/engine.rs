//! Persona-driven response composition.

use once_cell::sync::Lazy;
use regex::Regex;

use super::formality::apply_formality;
use super::templates;
use crate::persona::{PersonaConfig, ResponseStyle};

const CREATIVITY_THRESHOLD: u8 = 70;
const HIGH_VERBOSITY_THRESHOLD: u8 = 70;
const LOW_VERBOSITY_THRESHOLD: u8 = 30;
const DETAILED_VERBOSITY_THRESHOLD: u8 = 50;
const EXPLORATORY_CREATIVITY_THRESHOLD: u8 = 50;

/// Hedging phrases firmed up by the `precise` style, applied in order.
static HEDGE_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)\bI think\b").expect("valid regex"), "I am confident"),
        (
            Regex::new(r"(?i)\b(?:perhaps|maybe|possibly)\b").expect("valid regex"),
            "certainly",
        ),
        (Regex::new(r"(?i)\bmight\b").expect("valid regex"), "will"),
    ]
});

/// Which persona field decides the length adjustment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Plain verbosity thresholds (chat view).
    #[default]
    Verbosity,
    /// `responseStyle`-aware rules (persona preview).
    ResponseStyle,
}

/// Deterministic template engine turning a message and a persona into text.
///
/// The steps run in a fixed order and each one works on the text produced
/// so far, so later rewrites can match earlier output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseEngine {
    policy: LengthPolicy,
}

impl ResponseEngine {
    pub const fn new(policy: LengthPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LengthPolicy {
        self.policy
    }

    pub fn generate(&self, message: &str, persona: &PersonaConfig) -> String {
        let message_lower = message.to_lowercase();

        let mut response = templates::greeting(&persona.tone, persona.use_emojis);

        for trigger in templates::DOMAIN_TRIGGERS {
            if persona.has_knowledge_domain(trigger.domain)
                && message_lower.contains(trigger.keyword)
            {
                response.push_str(trigger.paragraph);
            }
        }

        response = apply_formality(&response, persona.formality);

        if persona.creativity > CREATIVITY_THRESHOLD {
            response.push_str(&templates::creativity_paragraph(persona.use_emojis));
        }

        response = match self.policy {
            LengthPolicy::Verbosity => adjust_for_verbosity(response, persona),
            LengthPolicy::ResponseStyle => adjust_for_style(response, persona),
        };

        if persona.use_code_examples
            && templates::CODE_KEYWORDS
                .iter()
                .any(|keyword| message_lower.contains(keyword))
        {
            response.push_str(templates::code_sample(&message_lower));
        }

        let instructions = persona.custom_instructions.to_lowercase();
        if instructions.contains("step by step") {
            response.push_str(templates::STEP_BY_STEP_TEMPLATE);
        }
        if instructions.contains("example") && !response.contains("example") {
            response.push_str(templates::PRACTICAL_EXAMPLE_PARAGRAPH);
        }

        response
    }
}

fn adjust_for_verbosity(mut response: String, persona: &PersonaConfig) -> String {
    if persona.verbosity > HIGH_VERBOSITY_THRESHOLD {
        response.push_str(templates::ELABORATION_PARAGRAPH);
        response
    } else if persona.verbosity < LOW_VERBOSITY_THRESHOLD {
        first_sentence(&response)
    } else {
        response
    }
}

fn adjust_for_style(mut response: String, persona: &PersonaConfig) -> String {
    match &persona.response_style {
        ResponseStyle::Concise => first_sentence(&response),
        ResponseStyle::Detailed => {
            if persona.verbosity > DETAILED_VERBOSITY_THRESHOLD {
                response.push_str(templates::ELABORATION_PARAGRAPH);
            }
            response
        }
        ResponseStyle::Precise => HEDGE_REWRITES
            .iter()
            .fold(response, |acc, (pattern, replacement)| {
                pattern.replace_all(&acc, *replacement).into_owned()
            }),
        ResponseStyle::Exploratory => {
            if persona.creativity > EXPLORATORY_CREATIVITY_THRESHOLD {
                response.push_str(templates::PERSPECTIVES_PARAGRAPH);
            }
            response
        }
        ResponseStyle::Balanced | ResponseStyle::Unrecognized(_) => response,
    }
}

/// Text before the first `.`, terminated with a `.`. An empty input yields ".".
pub fn first_sentence(text: &str) -> String {
    let head = text.split('.').next().unwrap_or_default();
    format!("{head}.")
}

/// Chat-view response: length follows the verbosity slider.
pub fn generate_persona_response(message: &str, persona: &PersonaConfig) -> String {
    ResponseEngine::new(LengthPolicy::Verbosity).generate(message, persona)
}

/// Preview response: length and wording follow the response style.
pub fn generate_preview_response(message: &str, persona: &PersonaConfig) -> String {
    ResponseEngine::new(LengthPolicy::ResponseStyle).generate(message, persona)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Tone;

    fn neutral(tone: Tone) -> PersonaConfig {
        PersonaConfig {
            tone,
            knowledge_domains: Vec::new(),
            verbosity: 50,
            creativity: 50,
            formality: 50,
            use_emojis: false,
            use_code_examples: false,
            custom_instructions: String::new(),
            ..Default::default()
        }
    }

    fn contains_emoji(text: &str) -> bool {
        text.chars().any(|c| {
            let code = c as u32;
            (0x1F000..=0x1FAFF).contains(&code) || (0x2600..=0x27BF).contains(&code)
        })
    }

    #[test]
    fn test_friendly_greeting_without_emoji() {
        let response = generate_persona_response("Hello", &neutral(Tone::Friendly));
        assert_eq!(
            response,
            "Hey there! I'd be happy to help you with that. Let me share what I know."
        );
    }

    #[test]
    fn test_emoji_inlined_when_enabled() {
        let persona = PersonaConfig {
            use_emojis: true,
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("Hello", &persona);
        assert!(response.starts_with("Hey there! 😊 I'd be happy"));
    }

    #[test]
    fn test_no_emoji_when_disabled() {
        for tone in Tone::KNOWN {
            for creativity in [10, 90] {
                let persona = PersonaConfig {
                    creativity,
                    verbosity: 90,
                    use_code_examples: true,
                    knowledge_domains: vec!["technology".into(), "business".into()],
                    custom_instructions: "step by step with an example".into(),
                    ..neutral(tone.clone())
                };
                let message = "tech business code in python";
                assert!(!contains_emoji(&generate_persona_response(message, &persona)));
                assert!(!contains_emoji(&generate_preview_response(message, &persona)));
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let persona = PersonaConfig::default();
        assert_eq!(
            generate_persona_response("", &persona),
            generate_persona_response("", &persona)
        );
    }

    #[test]
    fn test_low_verbosity_truncates_to_first_sentence() {
        let persona = PersonaConfig {
            verbosity: 20,
            ..neutral(Tone::Friendly)
        };
        assert_eq!(
            generate_persona_response("Hello", &persona),
            "Hey there! I'd be happy to help you with that."
        );
    }

    #[test]
    fn test_high_verbosity_appends_elaboration() {
        let persona = PersonaConfig {
            verbosity: 71,
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("Hello", &persona);
        assert!(response.ends_with(templates::ELABORATION_PARAGRAPH));
    }

    #[test]
    fn test_unrecognized_tone_truncates_to_lone_period() {
        let persona = PersonaConfig {
            verbosity: 10,
            ..neutral(Tone::Unrecognized("grumpy".into()))
        };
        assert_eq!(generate_persona_response("Hello", &persona), ".");
        assert_eq!(generate_persona_response("Hello", &neutral(Tone::from("grumpy"))), "");
    }

    #[test]
    fn test_high_formality_rewrites_friendly_greeting() {
        let persona = PersonaConfig {
            formality: 85,
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("Hello", &persona);
        assert!(response.starts_with("Greetings,"));
        assert!(!response.contains("Hey there!"));
    }

    #[test]
    fn test_low_formality_loosens_professional_greeting() {
        let persona = PersonaConfig {
            formality: 10,
            ..neutral(Tone::Professional)
        };
        assert_eq!(
            generate_persona_response("Hello", &persona),
            "Thanks for asking! Here's the lowdown."
        );
    }

    #[test]
    fn test_domain_paragraphs_stack_in_order() {
        let persona = PersonaConfig {
            knowledge_domains: vec!["business".into(), "technology".into()],
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("Any TECH tips for my Business?", &persona);
        let tech = response.find("technology perspective").expect("tech paragraph");
        let business = response.find("business standpoint").expect("business paragraph");
        assert!(tech < business);
    }

    #[test]
    fn test_domain_requires_both_domain_and_keyword() {
        let persona = neutral(Tone::Friendly);
        let response = generate_persona_response("tech question", &persona);
        assert!(!response.contains("technology perspective"));
    }

    #[test]
    fn test_creativity_paragraph() {
        let persona = PersonaConfig {
            creativity: 71,
            use_emojis: true,
            ..neutral(Tone::Casual)
        };
        let response = generate_persona_response("Hello", &persona);
        assert!(response.contains("think outside the box here! 💡"));
    }

    #[test]
    fn test_code_example_defaults_to_javascript() {
        let persona = PersonaConfig {
            use_code_examples: true,
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("Show me some code", &persona);
        assert!(response.contains("```javascript"));
    }

    #[test]
    fn test_code_example_language_sniffing() {
        let persona = PersonaConfig {
            use_code_examples: true,
            ..neutral(Tone::Friendly)
        };
        assert!(generate_persona_response("Python programming", &persona).contains("```python"));
        assert!(generate_persona_response("A React example", &persona).contains("```jsx"));
        assert!(!generate_persona_response("Hello", &persona).contains("```"));
    }

    #[test]
    fn test_code_example_disabled() {
        let response = generate_persona_response("code please", &neutral(Tone::Friendly));
        assert!(!response.contains("```"));
    }

    #[test]
    fn test_custom_instruction_triggers() {
        let persona = PersonaConfig {
            custom_instructions: "Please go Step By Step and give an Example".into(),
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("Hello", &persona);
        assert!(response.contains("step-by-step approach"));
        assert!(response.ends_with(templates::PRACTICAL_EXAMPLE_PARAGRAPH));
    }

    #[test]
    fn test_practical_example_skipped_after_code_sample() {
        let persona = PersonaConfig {
            use_code_examples: true,
            custom_instructions: "example".into(),
            ..neutral(Tone::Friendly)
        };
        let response = generate_persona_response("code", &persona);
        assert!(!response.contains("For a practical example"));
    }

    #[test]
    fn test_concise_style_truncates() {
        let persona = PersonaConfig {
            response_style: ResponseStyle::Concise,
            verbosity: 90,
            ..neutral(Tone::Professional)
        };
        assert_eq!(
            generate_preview_response("Hello", &persona),
            "Thank you for your inquiry."
        );
    }

    #[test]
    fn test_detailed_style_needs_verbosity() {
        let mut persona = PersonaConfig {
            response_style: ResponseStyle::Detailed,
            verbosity: 50,
            ..neutral(Tone::Friendly)
        };
        assert!(!generate_preview_response("Hello", &persona).contains("To elaborate further"));
        persona.verbosity = 51;
        assert!(generate_preview_response("Hello", &persona).contains("To elaborate further"));
    }

    #[test]
    fn test_precise_style_firms_up_hedges() {
        let persona = PersonaConfig {
            response_style: ResponseStyle::Precise,
            creativity: 80,
            ..neutral(Tone::Friendly)
        };
        let response = generate_preview_response("Hello", &persona);
        assert!(response.contains("There will be unconventional approaches"));
        assert!(!response.contains("might"));
    }

    #[test]
    fn test_exploratory_style_adds_perspectives() {
        let persona = PersonaConfig {
            response_style: ResponseStyle::Exploratory,
            creativity: 60,
            ..neutral(Tone::Educational)
        };
        assert!(generate_preview_response("Hello", &persona).contains("multiple perspectives"));
    }

    #[test]
    fn test_style_policy_ignores_verbosity_thresholds() {
        let persona = PersonaConfig {
            response_style: ResponseStyle::Balanced,
            verbosity: 5,
            ..neutral(Tone::Friendly)
        };
        assert_eq!(
            generate_preview_response("Hello", &persona),
            generate_persona_response("Hello", &neutral(Tone::Friendly))
        );
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("One. Two."), "One.");
        assert_eq!(first_sentence("No period"), "No period.");
        assert_eq!(first_sentence(""), ".");
    }
}
