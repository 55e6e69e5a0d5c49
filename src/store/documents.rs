//! The two JSON documents kept in the data directory.

use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::lock::StoreLock;
use crate::domain::model::{Package, RateTable};
use crate::error::{Error, Result};
use crate::runtime::Runtime;

pub const RATES_FILE: &str = "rates.json";
pub const PACKAGES_FILE: &str = "packages.json";
pub const LOCK_FILE: &str = ".lock";

/// Data directory holding the rate table and the package repository.
///
/// Layout:
/// - `<root>/rates.json` - flat object of the nine rates
/// - `<root>/packages.json` - array of package records
/// - `<root>/.lock` - present while a write is in flight
pub struct DataDir<'a, R: Runtime> {
    runtime: &'a R,
    root: PathBuf,
}

impl<'a, R: Runtime> DataDir<'a, R> {
    pub fn new(runtime: &'a R, root: PathBuf) -> Self {
        Self { runtime, root }
    }

    pub fn rates_path(&self) -> PathBuf {
        self.root.join(RATES_FILE)
    }

    pub fn packages_path(&self) -> PathBuf {
        self.root.join(PACKAGES_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// Load the rate table, falling back to the defaults when none was saved yet.
    ///
    /// The stored table is taken as is. A zero reference rate is left to the
    /// valuation engine, which values such amounts at 0, and can be repaired
    /// with a later `apply_rates`.
    #[tracing::instrument(skip(self))]
    pub fn load_rates(&self) -> Result<RateTable> {
        let path = self.rates_path();
        if !self.runtime.exists(&path) {
            debug!("No rate table at {}, using defaults", path.display());
            return Ok(RateTable::default());
        }

        let content = self
            .runtime
            .read_to_string(&path)
            .map_err(|e| Error::persistence("read", &path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::format(format!("{}: {}", path.display(), e)))
    }

    /// Load the package repository.
    ///
    /// Returns `None` if no repository was saved yet (first run).
    pub fn load_packages(&self) -> Result<Option<Vec<Package>>> {
        Ok(self.load_packages_document()?.map(|(packages, _)| packages))
    }

    /// Load the package repository together with the raw document it was
    /// decoded from.
    #[tracing::instrument(skip(self))]
    pub fn load_packages_document(&self) -> Result<Option<(Vec<Package>, String)>> {
        let Some(content) = self.read_packages_document()? else {
            return Ok(None);
        };
        let path = self.packages_path();
        let packages: Vec<Package> = serde_json::from_str(&content)
            .map_err(|e| Error::format(format!("{}: {}", path.display(), e)))?;
        Ok(Some((packages, content)))
    }

    /// The repository document as stored, or `None` before the first save.
    pub fn read_packages_document(&self) -> Result<Option<String>> {
        let path = self.packages_path();
        if !self.runtime.exists(&path) {
            return Ok(None);
        }
        self.runtime
            .read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::persistence("read", &path, e))
    }

    pub fn save_rates(&self, rates: &RateTable) -> Result<()> {
        self.write_document(&self.rates_path(), rates).map(|_| ())
    }

    /// Write the repository document. Returns the text that was written.
    pub fn save_packages(&self, packages: &[Package]) -> Result<String> {
        self.write_document(&self.packages_path(), packages)
    }

    /// Take the in-flight lock for a write. Fails with `Busy` when another
    /// writer holds it.
    pub fn lock(&self) -> Result<StoreLock<'a, R>> {
        self.ensure_root()?;
        StoreLock::acquire(self.runtime, &self.root, self.lock_path())
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.runtime.exists(&self.root) {
            debug!("Creating data directory {}", self.root.display());
            self.runtime
                .create_dir_all(&self.root)
                .map_err(|e| Error::persistence("create", &self.root, e))?;
        }
        Ok(())
    }

    /// Write to a sibling temp file, then rename it over the target so a
    /// reader never sees a half-written document.
    #[tracing::instrument(skip(self, document))]
    fn write_document<T: Serialize + ?Sized>(&self, path: &Path, document: &T) -> Result<String> {
        let content = serde_json::to_string_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        self.ensure_root()?;

        self.runtime
            .write(&tmp, content.as_bytes())
            .map_err(|e| Error::persistence("write", &tmp, e))?;

        if let Err(e) = self.runtime.rename(&tmp, path) {
            let _ = self.runtime.remove_file(&tmp);
            return Err(Error::persistence("replace", path, e));
        }

        debug!("Saved {}", path.display());
        Ok(content)
    }
}
