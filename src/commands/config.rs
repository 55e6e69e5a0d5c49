use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::path::PathBuf;

use crate::{
    http::HttpClient,
    runtime::Runtime,
    store::{DataDir, FileSeed, HttpSeed, PackageRepository, SeedSource},
};

use super::paths::default_data_dir;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding `rates.json` and `packages.json`.
    pub data_dir: PathBuf,
    /// First-run seed: an http(s) URL or a file path.
    pub seed: Option<String>,
}

impl Config {
    pub fn new<R: Runtime>(
        runtime: &R,
        data_dir: Option<PathBuf>,
        seed: Option<String>,
    ) -> Result<Self> {
        let data_dir = match data_dir {
            Some(path) => path,
            None => default_data_dir(runtime)?,
        };
        debug!("Using data directory: {}", data_dir.display());

        let seed = seed.filter(|s| !s.trim().is_empty());
        Ok(Self { data_dir, seed })
    }

    pub fn data<'a, R: Runtime>(&self, runtime: &'a R) -> DataDir<'a, R> {
        DataDir::new(runtime, self.data_dir.clone())
    }

    /// Build the seed source named by `seed`, if any.
    pub fn seed_source<'a, R: Runtime>(
        &self,
        runtime: &'a R,
    ) -> Result<Option<Box<dyn SeedSource + 'a>>> {
        let Some(location) = self.seed.as_deref() else {
            return Ok(None);
        };

        if location.starts_with("http://") || location.starts_with("https://") {
            let client = Client::builder()
                .user_agent(concat!("packcalc/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Some(Box::new(HttpSeed::new(HttpClient::new(client), location))))
        } else {
            Ok(Some(Box::new(FileSeed::new(runtime, PathBuf::from(location)))))
        }
    }

    /// Open the package repository, seeding it on first run.
    pub async fn open<'a, R: Runtime>(&self, runtime: &'a R) -> Result<PackageRepository<'a, R>> {
        let seed = self.seed_source(runtime)?;
        let repo = PackageRepository::open(self.data(runtime), seed.as_deref()).await?;
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use tempfile::tempdir;

    #[test]
    fn test_config_uses_default_data_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_data_dir()
            .returning(|| Some(PathBuf::from("/home/user/.local/share")));

        let config = Config::new(&runtime, None, Some("  ".into())).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/user/.local/share/packcalc"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_explicit_data_dir_skips_lookup() {
        let mut runtime = MockRuntime::new();
        runtime.expect_data_dir().never();

        let config = Config::new(&runtime, Some(PathBuf::from("/tmp/pc")), None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pc"));
    }

    #[test]
    fn test_seed_source_kind() {
        let runtime = MockRuntime::new();
        let mut config = Config {
            data_dir: PathBuf::from("/data"),
            seed: Some("https://example.com/database.json".into()),
        };
        let seed = config.seed_source(&runtime).unwrap().unwrap();
        assert_eq!(seed.location(), "https://example.com/database.json");

        config.seed = Some("./database.json".into());
        let seed = config.seed_source(&runtime).unwrap().unwrap();
        assert_eq!(seed.location(), "./database.json");

        config.seed = None;
        assert!(config.seed_source(&runtime).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_seeds_from_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/database.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "s1", "saleDate": "상시", "efficiency": 120}]"#)
            .expect(1)
            .create_async()
            .await;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            seed: Some(format!("{}/database.json", server.url())),
        };

        let repo = config.open(&runtime).await.unwrap();
        assert_eq!(repo.len(), 1);
        drop(repo);

        // Already initialised: the seed is not fetched again.
        let repo = config.open(&runtime).await.unwrap();
        assert_eq!(repo.packages()[0].id, "s1");
        mock.assert_async().await;
    }
}
