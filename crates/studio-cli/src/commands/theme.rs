use anyhow::Result;
use studio_core::preferences::{ThemeMode, ThemePreferences};

use super::context::AppContext;

fn print(preferences: &ThemePreferences) {
    println!("mode:   {}", preferences.mode);
    println!("accent: {}", preferences.accent_color);
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    print(&ctx.theme.preferences().await?);
    Ok(())
}

pub async fn toggle(ctx: &AppContext) -> Result<()> {
    print(&ctx.theme.toggle_mode().await?);
    Ok(())
}

pub async fn set_mode(ctx: &AppContext, mode: &str) -> Result<()> {
    let mode: ThemeMode = mode.parse()?;
    print(&ctx.theme.set_mode(mode).await?);
    Ok(())
}

pub async fn set_accent(ctx: &AppContext, color: &str) -> Result<()> {
    print(&ctx.theme.set_accent_color(color).await?);
    Ok(())
}
