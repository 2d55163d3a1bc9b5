mod import;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use friendmap_core::ContactFormat;
use tracing_subscriber::EnvFilter;

use import::OutputMode;

#[derive(Debug, Parser)]
#[command(name = "friendmap-cli")]
#[command(about = "Import contact exports and place them on a map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a vCard or CSV contact export
    Import {
        /// Path to a .vcf or .csv file
        path: PathBuf,
        /// Override format detection (vcard or csv)
        #[arg(long)]
        format: Option<ContactFormat>,
        /// Skip the geocoding provider and use fallback coordinates
        #[arg(long)]
        offline: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Print one line per contact instead of JSON
        #[arg(long, conflicts_with = "pretty")]
        list: bool,
    },
    /// Print the detected format of a contact export
    Detect {
        /// Path to a contact export
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Only the online import path needs a valid config; other commands
    // report a bad one and carry on.
    let config = friendmap_core::load_app_config();
    let log_level = config
        .as_ref()
        .map_or_else(|_| "info".to_string(), |c| c.log_level.clone());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Import {
            path,
            format,
            offline,
            pretty,
            list,
        }) => {
            let mode = OutputMode::from_flags(pretty, list);
            let geocoder = import::build_geocoder(config, offline)?;
            import::run_import(geocoder, &path, format, mode).await?;
        }
        Some(Commands::Detect { path }) => {
            if let Err(err) = &config {
                tracing::warn!(error = %err, "ignoring invalid configuration");
            }
            import::run_detect(&path).await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
