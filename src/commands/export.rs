use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::info;
use std::path::PathBuf;

use crate::domain::model::DATA_VERSION;
use crate::error::Error;
use crate::runtime::Runtime;

use super::config::Config;

/// File name used when no export path is given.
pub fn default_export_name(date: NaiveDate) -> String {
    format!("cs-calc-database-{}.json", date.format("%Y-%m-%d"))
}

/// Write every saved package to a JSON file that `import` accepts
#[tracing::instrument(skip(runtime, config))]
pub async fn export<R: Runtime>(runtime: R, config: Config, path: Option<PathBuf>) -> Result<()> {
    let repo = config.open(&runtime).await?;
    if repo.is_empty() {
        return Err(Error::validation("there are no saved packages to export").into());
    }

    let path = path.unwrap_or_else(|| PathBuf::from(default_export_name(Local::now().date_naive())));
    let content = serde_json::to_string_pretty(repo.packages())?;
    runtime
        .write(&path, content.as_bytes())
        .with_context(|| format!("Failed to write export to {:?}", path))?;
    info!("Wrote data version {} layout to {}", DATA_VERSION, path.display());

    println!("Exported {} package(s) to {}", repo.len(), path.display());
    Ok(())
}
