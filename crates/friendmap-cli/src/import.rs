//! Handlers for the `import` and `detect` subcommands.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use friendmap_core::{AppConfig, ConfigError, ContactFormat};
use friendmap_import::{ContactImporter, Geocoder, ImportOutcome};

/// How `import` writes its result to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputMode {
    Json,
    PrettyJson,
    List,
}

impl OutputMode {
    pub(crate) fn from_flags(pretty: bool, list: bool) -> Self {
        if list {
            OutputMode::List
        } else if pretty {
            OutputMode::PrettyJson
        } else {
            OutputMode::Json
        }
    }
}

/// Pick the geocoder for `import`.
///
/// An offline import never touches the geocoder settings, so an invalid
/// config is only logged there.
///
/// # Errors
///
/// Returns an error for an online import when the config is invalid or
/// the geocoding client cannot be built.
pub(crate) fn build_geocoder(
    config: Result<AppConfig, ConfigError>,
    offline: bool,
) -> anyhow::Result<Geocoder> {
    if offline {
        if let Err(err) = &config {
            tracing::warn!(error = %err, "ignoring invalid configuration for offline import");
        }
        return Ok(Geocoder::offline());
    }
    let config = config.context("invalid configuration")?;
    Geocoder::from_config(&config).context("failed to build geocoder")
}

/// Import one contact export and print the outcome.
///
/// Ctrl-C stops the import between records; whatever finished is still
/// printed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its format cannot be
/// determined.
pub(crate) async fn run_import(
    geocoder: Geocoder,
    path: &Path,
    format: Option<ContactFormat>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let content = read_contact_file(path).await?;
    let format = resolve_format(path, &content, format)?;

    tracing::info!(
        path = %path.display(),
        %format,
        online = geocoder.is_online(),
        "importing contacts"
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::Relaxed);
        }
    });

    let importer = ContactImporter::new(geocoder);
    let outcome = importer
        .import_file_with_cancel(&content, format, &cancel)
        .await;

    if outcome.cancelled {
        tracing::warn!(
            imported = outcome.imported.len(),
            "import interrupted; printing partial results"
        );
    }

    let rendered = match mode {
        OutputMode::Json => serde_json::to_string(&outcome)?,
        OutputMode::PrettyJson => serde_json::to_string_pretty(&outcome)?,
        OutputMode::List => render_list(&outcome),
    };
    println!("{rendered}");

    if outcome.is_empty() {
        eprintln!("No contacts with addresses found.");
    }

    Ok(())
}

/// Print the format detected for `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or no format matches.
pub(crate) async fn run_detect(path: &Path) -> anyhow::Result<()> {
    let content = read_contact_file(path).await?;
    let format = resolve_format(path, &content, None)?;
    println!("{format}");
    Ok(())
}

async fn read_contact_file(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

fn resolve_format(
    path: &Path,
    content: &str,
    explicit: Option<ContactFormat>,
) -> anyhow::Result<ContactFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    ContactFormat::detect(file_name, content).with_context(|| {
        format!(
            "could not determine the format of {}; pass --format vcard or --format csv",
            path.display()
        )
    })
}

/// One line per contact: initials, name, address, coordinates.
fn render_list(outcome: &ImportOutcome) -> String {
    let mut lines: Vec<String> = outcome
        .imported
        .iter()
        .map(|record| {
            let coords = record.location.map_or_else(String::new, |loc| {
                let approx = if loc.is_fallback { " (approx.)" } else { "" };
                format!("  ({:.4}, {:.4}){approx}", loc.lat, loc.lng)
            });
            format!(
                "{:<3} {}  {}{coords}",
                record.initials(),
                record.name,
                record.display_address()
            )
        })
        .collect();
    lines.push(format!(
        "{} imported, {} skipped",
        outcome.imported.len(),
        outcome.dropped_count
    ));
    lines.join("\n")
}
