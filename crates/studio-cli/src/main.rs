use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::AppContext;
use commands::persona::PersonaArgs;

#[derive(Parser)]
#[command(name = "persona-studio")]
#[command(about = "Persona Studio - design assistant personas and preview their replies", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "PERSONA_STUDIO_CONFIG")]
    config: Option<PathBuf>,

    /// Storage file (overrides `storage_file` from the config)
    #[arg(long, global = true, env = "PERSONA_STUDIO_STORAGE")]
    storage: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in presets
    Presets,
    /// List saved personas
    List,
    /// Print a saved persona (or the default one) as JSON
    Show {
        /// Saved persona id, or "default"
        target: String,
    },
    /// Create and save a new persona
    Create {
        /// Start from a preset instead of the default persona
        #[arg(long, conflicts_with = "file")]
        preset: Option<String>,
        /// Start from a persona JSON file
        #[arg(long)]
        file: Option<PathBuf>,
        #[command(flatten)]
        fields: PersonaArgs,
    },
    /// Edit a saved persona
    Edit {
        id: String,
        #[command(flatten)]
        fields: PersonaArgs,
    },
    /// Delete a saved persona (its version history is kept)
    Delete { id: String },
    /// Export a saved persona to a JSON file
    Export {
        id: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Export every saved persona into one bundle file
    ExportAll {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Import a persona or a persona bundle from a JSON file
    Import { file: PathBuf },
    /// Print a shareable link for a saved persona
    Share { id: String },
    /// Import a persona from a shareable link or its payload
    ImportLink { link: String },
    /// Manage version history
    Versions {
        #[command(subcommand)]
        action: VersionAction,
    },
    /// Generate a reply as the given persona
    Respond {
        message: String,
        /// Saved persona id
        #[arg(long, conflicts_with = "preset")]
        persona: Option<String>,
        /// Preset name
        #[arg(long)]
        preset: Option<String>,
        /// Use the response-style rules of the persona preview
        #[arg(long)]
        preview: bool,
        /// Skip the simulated thinking delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Show or change theme preferences
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum VersionAction {
    /// List versions, newest first
    List { id: String },
    /// Snapshot the stored persona
    Save {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Restore a version by timestamp
    Restore { id: String, timestamp: i64 },
    /// Delete a version by timestamp
    Delete { id: String, timestamp: i64 },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between dark and light
    Toggle,
    /// Set the mode explicitly
    Mode { mode: String },
    /// Set the accent color
    Accent { color: String },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = AppContext::open(cli.config, cli.storage).await?;

    match cli.command {
        Commands::Presets => commands::persona::presets(),
        Commands::List => commands::persona::list(&ctx),
        Commands::Show { target } => commands::persona::show(&ctx, &target)?,
        Commands::Create {
            preset,
            file,
            fields,
        } => commands::persona::create(&mut ctx, preset, file, fields).await?,
        Commands::Edit { id, fields } => commands::persona::edit(&mut ctx, &id, fields).await?,
        Commands::Delete { id } => commands::persona::delete(&mut ctx, &id).await?,
        Commands::Export { id, out } => commands::transfer::export(&ctx, &id, &out)?,
        Commands::ExportAll { out } => commands::transfer::export_all(&ctx, &out)?,
        Commands::Import { file } => commands::transfer::import(&mut ctx, &file).await?,
        Commands::Share { id } => commands::transfer::share(&ctx, &id)?,
        Commands::ImportLink { link } => commands::transfer::import_link(&mut ctx, &link).await?,
        Commands::Versions { action } => match action {
            VersionAction::List { id } => commands::versions::list(&ctx, &id),
            VersionAction::Save { id, notes } => {
                commands::versions::save(&mut ctx, &id, notes).await?
            }
            VersionAction::Restore { id, timestamp } => {
                commands::versions::restore(&mut ctx, &id, timestamp).await?
            }
            VersionAction::Delete { id, timestamp } => {
                commands::versions::delete(&mut ctx, &id, timestamp).await?
            }
        },
        Commands::Respond {
            message,
            persona,
            preset,
            preview,
            no_delay,
        } => {
            let options = commands::respond::RespondOptions {
                persona,
                preset,
                preview,
                no_delay,
            };
            commands::respond::respond(&ctx, &message, options).await?
        }
        Commands::Theme { action } => match action {
            None => commands::theme::show(&ctx).await?,
            Some(ThemeAction::Toggle) => commands::theme::toggle(&ctx).await?,
            Some(ThemeAction::Mode { mode }) => commands::theme::set_mode(&ctx, &mode).await?,
            Some(ThemeAction::Accent { color }) => {
                commands::theme::set_accent(&ctx, &color).await?
            }
        },
    }

    Ok(())
}
