use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::domain::service::{ImportMode, parse_import};
use crate::runtime::Runtime;

use super::config::Config;

/// Import packages from a JSON export, merging into or replacing the saved ones
#[tracing::instrument(skip(runtime, config))]
pub async fn import<R: Runtime>(
    runtime: R,
    config: Config,
    path: &Path,
    mode: Option<ImportMode>,
    yes: bool,
) -> Result<()> {
    let content = runtime
        .read_to_string(path)
        .with_context(|| format!("Failed to read import file {:?}", path))?;
    let incoming = parse_import(&content)?;
    debug!("Parsed {} package(s) from {:?}", incoming.len(), path);

    let mut repo = config.open(&runtime).await?;

    let mode = match mode {
        Some(mode) => mode,
        // An empty repository is replaced without asking.
        None if repo.is_empty() => ImportMode::Replace,
        None => match ask_mode(&runtime, repo.len(), incoming.len())? {
            Some(mode) => mode,
            None => {
                println!("Import cancelled.");
                return Ok(());
            }
        },
    };

    match mode {
        ImportMode::Merge => {
            let total = incoming.len();
            let added = repo.merge(incoming)?;
            info!("Merged {} of {} package(s)", added, total);
            println!(
                "Added {} new package(s); {} already present.",
                added,
                total - added
            );
        }
        ImportMode::Replace => {
            if !yes && !repo.is_empty() {
                let prompt = format!(
                    "Replace all {} saved package(s) with the {} imported?",
                    repo.len(),
                    incoming.len()
                );
                if !runtime.confirm(&prompt)? {
                    println!("Import cancelled.");
                    return Ok(());
                }
            }
            let count = incoming.len();
            repo.replace_all(incoming)?;
            println!("Replaced saved packages with {} imported package(s).", count);
        }
    }

    Ok(())
}

fn ask_mode<R: Runtime>(runtime: &R, saved: usize, incoming: usize) -> Result<Option<ImportMode>> {
    let prompt = format!(
        "{} package(s) are saved. [m]erge the {} imported ones or [r]eplace everything? [m/r/N]",
        saved, incoming
    );
    let answer = runtime.ask(&prompt)?;
    Ok(answer.parse::<ImportMode>().ok())
}
