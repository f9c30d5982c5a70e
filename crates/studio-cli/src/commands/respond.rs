use anyhow::{Result, bail};
use studio_application::ResponseScheduler;
use studio_core::config::ResponseConfig;
use studio_core::persona::{PersonaConfig, find_preset};
use studio_core::response::LengthPolicy;

use super::context::AppContext;

pub struct RespondOptions {
    pub persona: Option<String>,
    pub preset: Option<String>,
    pub preview: bool,
    pub no_delay: bool,
}

fn resolve_persona(ctx: &AppContext, options: &RespondOptions) -> Result<PersonaConfig> {
    if let Some(id) = options.persona.as_deref() {
        return match ctx.store.find_saved(id) {
            Some(persona) => Ok(persona.clone()),
            None => bail!("No saved persona with id {id}"),
        };
    }
    if let Some(name) = options.preset.as_deref() {
        return match find_preset(name) {
            Some(preset) => Ok(preset),
            None => bail!("Unknown preset '{name}'"),
        };
    }
    Ok(ctx.store.current().clone())
}

pub async fn respond(ctx: &AppContext, message: &str, options: RespondOptions) -> Result<()> {
    let persona = resolve_persona(ctx, &options)?;

    let delay = if options.no_delay {
        ResponseConfig {
            base_delay_ms: 0,
            jitter_ms: 0,
        }
    } else {
        ctx.config.response
    };
    let policy = if options.preview {
        LengthPolicy::ResponseStyle
    } else {
        LengthPolicy::Verbosity
    };

    tracing::debug!("Responding as '{}' with {:?} policy", persona.name, policy);
    let scheduler = ResponseScheduler::with_policy(delay, policy);
    match scheduler.schedule(message, persona).wait().await {
        Some(reply) => println!("{reply}"),
        None => bail!("The response was cancelled"),
    }
    Ok(())
}
