use anyhow::{Result, bail};
use log::debug;

use crate::domain::model::Package;
use crate::runtime::Runtime;

use super::config::Config;
use super::render::describe_package;

/// Remove a saved package by id (or a unique id prefix)
#[tracing::instrument(skip(runtime, config))]
pub async fn remove<R: Runtime>(runtime: R, config: Config, id: &str, yes: bool) -> Result<()> {
    let mut repo = config.open(&runtime).await?;
    let package = resolve(repo.packages(), id)?.clone();
    debug!("Resolved {} to {}", id, package.id);

    if !yes {
        println!("{}", describe_package(&package));
        if !runtime.confirm("Delete this package?")? {
            println!("Removal cancelled.");
            return Ok(());
        }
    }

    repo.delete(&package.id)?;
    println!("Removed package {}", package.id);
    Ok(())
}

/// Find the package whose id is `query`, or the only one starting with it.
fn resolve<'p>(packages: &'p [Package], query: &str) -> Result<&'p Package> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Package id must not be empty");
    }

    if let Some(exact) = packages.iter().find(|p| p.id == query) {
        return Ok(exact);
    }

    let mut candidates = packages.iter().filter(|p| p.id.starts_with(query));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => bail!("No saved package with id {}", query),
        (Some(_), Some(_)) => bail!("Id prefix {} matches more than one package", query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use crate::store::DataDir;
    use crate::test_utils::configure_mock_runtime_on_disk;
    use tempfile::tempdir;

    fn package(id: &str) -> Package {
        Package {
            id: id.into(),
            efficiency: 100.0,
            ..Default::default()
        }
    }

    fn setup(ids: &[&str]) -> (tempfile::TempDir, Config) {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let packages: Vec<Package> = ids.iter().map(|id| package(id)).collect();
        DataDir::new(&runtime, dir.path().to_path_buf())
            .save_packages(&packages)
            .unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            seed: None,
        };
        (dir, config)
    }

    fn stored_ids(config: &Config) -> Vec<String> {
        let runtime = RealRuntime;
        config
            .data(&runtime)
            .load_packages()
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect()
    }

    #[test]
    fn test_resolve() {
        let packages = vec![package("abc1"), package("abd2"), package("ab")];
        assert_eq!(resolve(&packages, "ab").unwrap().id, "ab");
        assert_eq!(resolve(&packages, "abc").unwrap().id, "abc1");
        assert!(resolve(&packages, "zz").is_err());
        assert!(resolve(&packages, " ").is_err());

        let packages = vec![package("abc1"), package("abd2")];
        let err = resolve(&packages, "ab").unwrap_err();
        assert!(err.to_string().contains("more than one"));
    }

    #[tokio::test]
    async fn test_remove_with_yes_skips_prompt() {
        let (_dir, config) = setup(&["one", "two"]);
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_on_disk(&mut runtime);
        runtime.expect_confirm().never();

        remove(runtime, config.clone(), "one", true).await.unwrap();
        assert_eq!(stored_ids(&config), vec!["two"]);
    }

    #[tokio::test]
    async fn test_remove_cancelled() {
        let (_dir, config) = setup(&["one", "two"]);
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_on_disk(&mut runtime);
        runtime.expect_confirm().times(1).returning(|_| Ok(false));

        remove(runtime, config.clone(), "one", false).await.unwrap();
        assert_eq!(stored_ids(&config), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_remove_confirmed_by_prefix() {
        let (_dir, config) = setup(&["one", "two"]);
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_on_disk(&mut runtime);
        runtime.expect_confirm().times(1).returning(|_| Ok(true));

        remove(runtime, config.clone(), "tw", false).await.unwrap();
        assert_eq!(stored_ids(&config), vec!["one"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_id() {
        let (_dir, config) = setup(&["one"]);
        let err = remove(RealRuntime, config, "nope", true).await.unwrap_err();
        assert!(err.to_string().contains("No saved package"));
    }
}
