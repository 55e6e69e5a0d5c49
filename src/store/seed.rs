//! First-run sources for the initial package list.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;

use crate::domain::model::Package;
use crate::domain::service::{decode_import, parse_import};
use crate::http::HttpClient;
use crate::runtime::Runtime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the package list.
    async fn fetch(&self) -> Result<Vec<Package>>;

    /// Where the list comes from, for log messages.
    fn location(&self) -> String;
}

/// Seed published as a JSON document on a web server.
pub struct HttpSeed {
    client: HttpClient,
    url: String,
}

impl HttpSeed {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SeedSource for HttpSeed {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<Package>> {
        let payload: serde_json::Value = self.client.get_json(&self.url).await?;
        let packages = decode_import(payload)
            .with_context(|| format!("Invalid seed data at {}", self.url))?;
        Ok(packages)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Seed read from a local file.
pub struct FileSeed<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> FileSeed<'a, R> {
    pub fn new(runtime: &'a R, path: PathBuf) -> Self {
        Self { runtime, path }
    }
}

#[async_trait]
impl<R: Runtime> SeedSource for FileSeed<'_, R> {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<Package>> {
        debug!("Reading seed from {}", self.path.display());
        let content = self
            .runtime
            .read_to_string(&self.path)
            .with_context(|| format!("Failed to read seed file {:?}", self.path))?;
        let packages = parse_import(&content)
            .with_context(|| format!("Invalid seed data in {:?}", self.path))?;
        Ok(packages)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
