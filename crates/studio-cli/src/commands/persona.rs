use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use studio_core::persona::{PersonaConfig, ResponseStyle, Tone, get_default_presets};
use studio_infrastructure::persona_file::read_import_file;

use super::context::AppContext;

/// Field overrides shared by `create` and `edit`.
#[derive(Args, Debug, Default)]
pub struct PersonaArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// friendly, professional, casual, enthusiastic or educational
    #[arg(long)]
    pub tone: Option<String>,
    /// concise, detailed, balanced, precise or exploratory
    #[arg(long)]
    pub style: Option<String>,
    #[arg(long)]
    pub verbosity: Option<i64>,
    #[arg(long)]
    pub creativity: Option<i64>,
    #[arg(long)]
    pub formality: Option<i64>,
    /// Add a knowledge domain (repeatable)
    #[arg(long = "domain")]
    pub add_domains: Vec<String>,
    /// Remove a knowledge domain (repeatable)
    #[arg(long = "remove-domain")]
    pub remove_domains: Vec<String>,
    #[arg(long)]
    pub emojis: Option<bool>,
    #[arg(long)]
    pub code_examples: Option<bool>,
    #[arg(long)]
    pub instructions: Option<String>,
}

impl PersonaArgs {
    fn apply(self, persona: &mut PersonaConfig) {
        if let Some(name) = self.name {
            persona.name = name;
        }
        if let Some(description) = self.description {
            persona.description = description;
        }
        if let Some(tone) = self.tone {
            let tone = Tone::from(tone);
            if let Tone::Unrecognized(raw) = &tone {
                tracing::warn!("Unknown tone '{}' will produce no greeting", raw);
            }
            persona.tone = tone;
        }
        if let Some(style) = self.style {
            let style = ResponseStyle::from(style);
            if let ResponseStyle::Unrecognized(raw) = &style {
                tracing::warn!("Unknown response style '{}' is treated as balanced", raw);
            }
            persona.response_style = style;
        }
        if let Some(value) = self.verbosity {
            persona.set_verbosity(value);
        }
        if let Some(value) = self.creativity {
            persona.set_creativity(value);
        }
        if let Some(value) = self.formality {
            persona.set_formality(value);
        }
        for domain in &self.remove_domains {
            persona.remove_knowledge_domain(domain);
        }
        for domain in &self.add_domains {
            if !persona.add_knowledge_domain(domain) {
                tracing::debug!("Skipped knowledge domain '{}'", domain);
            }
        }
        if let Some(value) = self.emojis {
            persona.use_emojis = value;
        }
        if let Some(value) = self.code_examples {
            persona.use_code_examples = value;
        }
        if let Some(instructions) = self.instructions {
            persona.custom_instructions = instructions;
        }
    }
}

pub fn presets() {
    println!("📋 Presets:");
    for preset in get_default_presets() {
        println!(
            "  {:<24} {:<13} {:<12} {}",
            preset.name,
            preset.tone.as_str(),
            preset.response_style.as_str(),
            preset.description
        );
    }
}

pub fn list(ctx: &AppContext) {
    let saved = ctx.store.saved_personas();
    if saved.is_empty() {
        println!("No saved personas.");
        return;
    }
    println!("📋 Saved personas:");
    for persona in saved {
        println!(
            "  {:<28} {:<24} v{:<4} {}",
            persona.id.as_deref().unwrap_or("-"),
            persona.name,
            persona.version_number,
            persona
                .last_modified
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default()
        );
    }
}

pub fn show(ctx: &AppContext, target: &str) -> Result<()> {
    let persona = if target.eq_ignore_ascii_case("default") {
        ctx.store.current().clone()
    } else {
        match ctx.store.find_saved(target) {
            Some(persona) => persona.clone(),
            None => bail!("No saved persona with id {target}"),
        }
    };
    println!("{}", serde_json::to_string_pretty(&persona)?);
    Ok(())
}

pub async fn create(
    ctx: &mut AppContext,
    preset: Option<String>,
    file: Option<PathBuf>,
    fields: PersonaArgs,
) -> Result<()> {
    if let Some(name) = preset.as_deref() {
        if !ctx.store.apply_preset(name) {
            bail!("Unknown preset '{name}' (see `persona-studio presets`)");
        }
    }
    if let Some(path) = file.as_deref() {
        let json = read_import_file(path)?;
        let persona = studio_core::persona::parse_persona_payload(&json)
            .with_context(|| format!("Invalid persona file {}", path.display()))?;
        ctx.store.set_current(persona);
    }

    ctx.store.update_current(|persona| fields.apply(persona));
    let persona = ctx.store.current().clone();
    let id = ctx.store.save(persona).await;
    println!("✅ Saved '{}' as {}", ctx.store.current().name, id);
    Ok(())
}

pub async fn edit(ctx: &mut AppContext, id: &str, fields: PersonaArgs) -> Result<()> {
    if !ctx.store.load(id) {
        bail!("No saved persona with id {id}");
    }
    ctx.store.update_current(|persona| fields.apply(persona));
    let persona = ctx.store.current().clone();
    ctx.store.save(persona).await;
    println!(
        "✅ Updated '{}' (version {})",
        ctx.store.current().name,
        ctx.store.current().version_number
    );
    Ok(())
}

pub async fn delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    if !ctx.store.delete(id).await {
        bail!("No saved persona with id {id}");
    }
    println!("🗑  Deleted {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut persona = PersonaConfig::default();
        PersonaArgs {
            name: Some("Tuned".to_string()),
            tone: Some("casual".to_string()),
            verbosity: Some(150),
            add_domains: vec!["rust".to_string()],
            remove_domains: vec!["general knowledge".to_string()],
            emojis: Some(false),
            ..Default::default()
        }
        .apply(&mut persona);

        assert_eq!(persona.name, "Tuned");
        assert_eq!(persona.tone, Tone::Casual);
        assert_eq!(persona.verbosity, 100);
        assert_eq!(persona.knowledge_domains, vec!["technology", "rust"]);
        assert!(!persona.use_emojis);
    }
}
