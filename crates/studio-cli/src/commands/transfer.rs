use std::path::Path;

use anyhow::{Result, bail};
use studio_application::PersonaTarget;
use studio_infrastructure::persona_file::{read_import_file, write_export_file};

use super::context::AppContext;

pub fn export(ctx: &AppContext, id: &str, out: &Path) -> Result<()> {
    let export = ctx.store.export(&PersonaTarget::Saved(id.to_string()))?;
    let path = write_export_file(out, &export.file_name, &export.contents)?;
    println!("📦 Exported to {}", path.display());
    Ok(())
}

pub fn export_all(ctx: &AppContext, out: &Path) -> Result<()> {
    let export = ctx.store.export_all()?;
    let path = write_export_file(out, &export.file_name, &export.contents)?;
    println!(
        "📦 Exported {} persona(s) to {}",
        ctx.store.saved_personas().len(),
        path.display()
    );
    Ok(())
}

pub async fn import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let json = read_import_file(file)?;
    let imported = ctx.store.import_bundle(&json).await;
    if imported == 0 {
        bail!("No valid persona found in {}", file.display());
    }
    println!("✅ Imported {imported} persona(s)");
    Ok(())
}

pub fn share(ctx: &AppContext, id: &str) -> Result<()> {
    let link = ctx
        .store
        .generate_shareable_link(&PersonaTarget::Saved(id.to_string()))?;
    println!("{link}");
    Ok(())
}

/// Accepts a full link or the bare `sharedPersona` payload.
pub async fn import_link(ctx: &mut AppContext, link: &str) -> Result<()> {
    let imported = if link.contains("://") {
        match ctx.store.import_from_url(link).await {
            Some((imported, _)) => imported,
            None => bail!("The link carries no shared persona"),
        }
    } else {
        ctx.store.import_from_shareable_link(link).await
    };

    if !imported {
        bail!("The shared persona could not be imported");
    }
    let current = ctx.store.current();
    println!(
        "✅ Imported '{}' as {}",
        current.name,
        current.id.as_deref().unwrap_or("-")
    );
    Ok(())
}
