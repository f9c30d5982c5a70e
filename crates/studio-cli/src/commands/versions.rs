use anyhow::{Result, bail};
use chrono::DateTime;

use super::context::AppContext;

pub fn list(ctx: &AppContext, id: &str) {
    let versions = ctx.store.get_versions(id);
    if versions.is_empty() {
        println!("No versions for {id}.");
        return;
    }
    if ctx.store.find_saved(id).is_none() {
        println!("⚠️  {id} is no longer saved; showing its remaining history.");
    }
    for version in versions {
        let when = DateTime::from_timestamp_millis(version.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!(
            "  {:<15} {:<20} {:<24} {}",
            version.timestamp,
            when,
            version.data.name,
            version.notes.as_deref().unwrap_or("")
        );
    }
}

pub async fn save(ctx: &mut AppContext, id: &str, notes: Option<String>) -> Result<()> {
    let version = ctx.store.save_version(id, notes).await?;
    println!("✅ Saved version {} of {id}", version.timestamp);
    Ok(())
}

pub async fn restore(ctx: &mut AppContext, id: &str, timestamp: i64) -> Result<()> {
    ctx.store.restore_version(id, timestamp).await?;
    println!(
        "✅ Restored {id} to version {timestamp} (now v{})",
        ctx.store.current().version_number
    );
    Ok(())
}

pub async fn delete(ctx: &mut AppContext, id: &str, timestamp: i64) -> Result<()> {
    if !ctx.store.delete_version(id, timestamp).await {
        bail!("No version {timestamp} for {id}");
    }
    println!("🗑  Deleted version {timestamp} of {id}");
    Ok(())
}
