use anyhow::Result;
use log::debug;

use crate::domain::model::CurrencyKind;
use crate::domain::service::{Filter, SortBy, filter_and_sort};
use crate::runtime::Runtime;

use super::config::Config;
use super::render::describe_package;

/// List saved packages, optionally filtered by content kinds
#[tracing::instrument(skip(runtime, config))]
pub async fn list<R: Runtime>(
    runtime: R,
    config: Config,
    kinds: Vec<CurrencyKind>,
    comprehensive: bool,
    sort: SortBy,
) -> Result<()> {
    let repo = config.open(&runtime).await?;
    if repo.is_empty() {
        println!("No packages saved.");
        return Ok(());
    }

    let filter = Filter::new(kinds, comprehensive);
    let packages = filter_and_sort(repo.packages(), &filter, sort);
    debug!("{} of {} package(s) match", packages.len(), repo.len());

    if packages.is_empty() {
        println!("No packages match the selected kinds.");
        return Ok(());
    }

    for package in &packages {
        println!("{}", describe_package(package));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_list_first_run_without_seed() {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            seed: None,
        };

        list(RealRuntime, config, vec![], false, SortBy::Date)
            .await
            .unwrap();

        assert!(dir.path().join("data/packages.json").exists());
    }

    #[tokio::test]
    async fn test_list_rejects_corrupted_repository() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("packages.json"), "{").unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            seed: None,
        };

        let err = list(RealRuntime, config, vec![CurrencyKind::Juhwa], true, SortBy::Date)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unrecognized package data"));
    }
}
