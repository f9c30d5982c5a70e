//! Fixed text fragments the response engine composes.

use crate::persona::Tone;

/// Opening line for each tone. Emoji are inlined only when enabled; an
/// unrecognized tone has no greeting at all.
pub fn greeting(tone: &Tone, use_emojis: bool) -> String {
    let emoji = |glyph: &str| {
        if use_emojis {
            format!("{glyph} ")
        } else {
            String::new()
        }
    };

    match tone {
        Tone::Friendly => format!(
            "Hey there! {}I'd be happy to help you with that. Let me share what I know.",
            emoji("😊")
        ),
        Tone::Professional => format!(
            "{}Thank you for your inquiry. I'll provide you with a comprehensive response to address your question.",
            emoji("📊")
        ),
        Tone::Casual => format!(
            "Hey! {}So you wanna know about this? Cool, let's dive in!",
            emoji("👋")
        ),
        Tone::Enthusiastic => format!(
            "Wow, great question! {}I'm super excited to help you explore this topic! Let's get started.",
            emoji("🚀")
        ),
        Tone::Educational => format!(
            "{}That's an excellent question to explore. Let's break this down step by step so you can understand the concepts clearly.",
            emoji("📚")
        ),
        Tone::Unrecognized(_) => String::new(),
    }
}

/// A knowledge domain that adds a paragraph when the message mentions it.
pub struct DomainTrigger {
    /// Literal entry looked up in `knowledgeDomains`.
    pub domain: &'static str,
    /// Lowercase substring looked up in the message.
    pub keyword: &'static str,
    pub paragraph: &'static str,
}

pub const DOMAIN_TRIGGERS: &[DomainTrigger] = &[
    DomainTrigger {
        domain: "technology",
        keyword: "tech",
        paragraph: "\n\nFrom a technology perspective, it's worth considering current best practices, the tools available, and how the different pieces fit together in a modern stack.",
    },
    DomainTrigger {
        domain: "business",
        keyword: "business",
        paragraph: "\n\nFrom a business standpoint, think about the value this creates, the costs involved, and how it aligns with your broader goals.",
    },
];

pub fn creativity_paragraph(use_emojis: bool) -> String {
    format!(
        "\n\nLet's think outside the box here! {}There might be unconventional approaches that lead to surprising results.",
        if use_emojis { "💡 " } else { "" }
    )
}

pub const ELABORATION_PARAGRAPH: &str = "\n\nTo elaborate further, there are several nuances worth considering. The context in which you apply this matters, and small details can have a significant impact on the outcome. I'd recommend experimenting with different approaches and observing what works best in your particular situation.";

pub const PERSPECTIVES_PARAGRAPH: &str = "\n\nLooking at this from multiple perspectives, each angle reveals something different. Considering alternative viewpoints might uncover options you hadn't thought of.";

/// Message keywords that make a code sample relevant.
pub const CODE_KEYWORDS: &[&str] = &["code", "example", "programming"];

pub const PYTHON_SAMPLE: &str = r#"

Here's a code example to illustrate:

```python
# A simple helper function
def greet(name):
    return f"Hello, {name}!"

print(greet("World"))
```"#;

pub const JSX_SAMPLE: &str = r#"

Here's a code example to illustrate:

```jsx
// A simple React component
function Greeting({ name }) {
  return <h1>Hello, {name}!</h1>;
}

export default Greeting;
```"#;

pub const JAVASCRIPT_SAMPLE: &str = r#"

Here's a code example to illustrate:

```javascript
// A simple helper function
function greet(name) {
  return `Hello, ${name}!`;
}

console.log(greet('World'));
```"#;

/// Picks the sample matching the language the (lowercased) message hints at.
pub fn code_sample(message_lower: &str) -> &'static str {
    if message_lower.contains("python") {
        PYTHON_SAMPLE
    } else if message_lower.contains("react") || message_lower.contains("component") {
        JSX_SAMPLE
    } else {
        JAVASCRIPT_SAMPLE
    }
}

pub const STEP_BY_STEP_TEMPLATE: &str = "\n\nHere's a step-by-step approach:\n1. First, understand the core problem.\n2. Break it down into smaller, manageable parts.\n3. Address each part methodically.\n4. Review and refine your solution.";

pub const PRACTICAL_EXAMPLE_PARAGRAPH: &str = "\n\nFor a practical example, imagine applying this to a small project first, observing the results, and then scaling up once you're confident it works.";
