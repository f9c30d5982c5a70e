//! Formality rewrites.
//!
//! Each rule is a literal find/replace guarded by a formality predicate.
//! Rules run in table order over the whole accumulated response and replace
//! the first occurrence only, so a rule whose phrase was never produced is a
//! no-op.

/// Above this value the formal rules apply.
pub const FORMAL_THRESHOLD: u8 = 70;
/// Below this value the casual rules apply.
pub const CASUAL_THRESHOLD: u8 = 30;

#[derive(Debug, Clone, Copy)]
pub struct FormalityRule {
    pub applies: fn(u8) -> bool,
    pub find: &'static str,
    pub replace: &'static str,
}

fn is_formal(formality: u8) -> bool {
    formality > FORMAL_THRESHOLD
}

fn is_casual(formality: u8) -> bool {
    formality < CASUAL_THRESHOLD
}

pub const FORMALITY_RULES: &[FormalityRule] = &[
    FormalityRule {
        applies: is_formal,
        find: "Hey there!",
        replace: "Greetings,",
    },
    FormalityRule {
        applies: is_formal,
        find: "Hey!",
        replace: "Hello,",
    },
    FormalityRule {
        applies: is_formal,
        find: "I'd be happy to",
        replace: "I would be pleased to",
    },
    FormalityRule {
        applies: is_formal,
        find: "So you wanna know about this?",
        replace: "You wish to learn more about this topic.",
    },
    FormalityRule {
        applies: is_formal,
        find: "Cool, let's dive in!",
        replace: "Let us proceed.",
    },
    FormalityRule {
        applies: is_formal,
        find: "Wow, great question!",
        replace: "That is an excellent question.",
    },
    FormalityRule {
        applies: is_formal,
        find: "I'm super excited to",
        replace: "I am glad to",
    },
    FormalityRule {
        applies: is_casual,
        find: "Thank you for your inquiry.",
        replace: "Thanks for asking!",
    },
    FormalityRule {
        applies: is_casual,
        find: "I'll provide you with a comprehensive response to address your question.",
        replace: "Here's the lowdown.",
    },
    FormalityRule {
        applies: is_casual,
        find: "That's an excellent question to explore.",
        replace: "Ooh, good one!",
    },
    FormalityRule {
        applies: is_casual,
        find: "Let's break this down step by step so you can understand the concepts clearly.",
        replace: "Let's walk through it together.",
    },
];

/// Applies every rule whose predicate accepts `formality`.
pub fn apply_formality(text: &str, formality: u8) -> String {
    FORMALITY_RULES
        .iter()
        .filter(|rule| (rule.applies)(formality))
        .fold(text.to_string(), |acc, rule| {
            acc.replacen(rule.find, rule.replace, 1)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_range_leaves_text_untouched() {
        let text = "Hey there! Thank you for your inquiry.";
        for formality in [30, 50, 70] {
            assert_eq!(apply_formality(text, formality), text);
        }
    }

    #[test]
    fn test_formal_rules() {
        assert_eq!(
            apply_formality("Hey there! I'd be happy to help.", 71),
            "Greetings, I would be pleased to help."
        );
    }

    #[test]
    fn test_casual_rules() {
        assert_eq!(
            apply_formality("Thank you for your inquiry. Bye.", 29),
            "Thanks for asking! Bye."
        );
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        assert_eq!(apply_formality("Hey! Hey!", 90), "Hello, Hey!");
    }

    #[test]
    fn test_rule_sets_are_disjoint() {
        for rule in FORMALITY_RULES {
            assert!(
                !((rule.applies)(80) && (rule.applies)(20)),
                "rule for {:?} applies at both ends",
                rule.find
            );
        }
    }
}
