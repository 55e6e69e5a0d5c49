//! Package repository backed by the data directory.
//!
//! Every mutation builds the next collection on the side, writes it while
//! holding the store lock, and only then swaps it in. A failed write leaves
//! both the stored document and the in-memory collection as they were.
//!
//! The repository remembers the document text it last read or wrote. Under
//! the lock, a write first checks that the stored document still has that
//! text; if another run changed it in the meantime the write is rejected with
//! `Conflict` instead of overwriting that run's changes.

use log::{debug, info, warn};

use super::documents::DataDir;
use super::seed::SeedSource;
use crate::domain::model::{Package, RateTable};
use crate::domain::service::{self, revalue_package, sort_by_sale_date};
use crate::error::{Error, Result};
use crate::runtime::Runtime;

pub struct PackageRepository<'a, R: Runtime> {
    store: DataDir<'a, R>,
    packages: Vec<Package>,
    /// Stored document text the in-memory collection was taken from.
    revision: Option<String>,
}

impl<'a, R: Runtime> PackageRepository<'a, R> {
    /// Open the repository stored in `store`.
    ///
    /// On first run (no repository document yet) the packages come from
    /// `seed`. A missing or failing seed yields an empty repository; either
    /// way the result is written so the next run is no longer the first.
    #[tracing::instrument(skip(store, seed))]
    pub async fn open(store: DataDir<'a, R>, seed: Option<&dyn SeedSource>) -> Result<Self> {
        if let Some((packages, document)) = store.load_packages_document()? {
            debug!("Loaded {} packages", packages.len());
            return Ok(Self {
                store,
                packages,
                revision: Some(document),
            });
        }

        let packages = match seed {
            Some(seed) => match seed.fetch().await {
                Ok(packages) => {
                    info!("Seeded {} packages from {}", packages.len(), seed.location());
                    packages
                }
                Err(e) => {
                    warn!("Failed to load seed from {}: {:#}", seed.location(), e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut repo = Self {
            store,
            packages: Vec::new(),
            revision: None,
        };
        repo.commit(packages)?;
        Ok(repo)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn store(&self) -> &DataDir<'a, R> {
        &self.store
    }

    /// Add a package, then re-sort by sale date.
    ///
    /// The new package is placed first before the stable sort, so it leads
    /// among packages of equal sale-date rank.
    #[tracing::instrument(skip(self, package), fields(id = %package.id))]
    pub fn insert(&mut self, package: Package) -> Result<()> {
        if self.get(&package.id).is_some() {
            return Err(Error::validation(format!(
                "a package with id {} already exists",
                package.id
            )));
        }

        let mut next = Vec::with_capacity(self.packages.len() + 1);
        next.push(package);
        next.extend(self.packages.iter().cloned());
        sort_by_sale_date(&mut next);

        self.commit(next)
    }

    /// Remove the package with `id`. Returns false if there was none, in
    /// which case nothing is written.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let next = self
            .packages
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Replace the whole collection, keeping the given order.
    #[tracing::instrument(skip(self, packages), fields(count = packages.len()))]
    pub fn replace_all(&mut self, packages: Vec<Package>) -> Result<()> {
        self.commit(service::replace(packages))
    }

    /// Append the incoming packages whose ids are not stored yet. Returns the
    /// number added; nothing is written when it is zero.
    #[tracing::instrument(skip(self, incoming), fields(count = incoming.len()))]
    pub fn merge(&mut self, incoming: Vec<Package>) -> Result<usize> {
        let outcome = service::merge(&self.packages, incoming);
        if outcome.added == 0 {
            return Ok(0);
        }
        self.commit(outcome.packages)?;
        Ok(outcome.added)
    }

    /// Recompute the cached valuation of every package against `rates`.
    #[tracing::instrument(skip(self, rates))]
    pub fn revalue(&mut self, rates: &RateTable) -> Result<()> {
        let next = self.revalued(rates);
        self.commit(next)
    }

    /// Persist a new rate table together with the re-valued repository.
    ///
    /// The repository is written first. If the rate table cannot be written
    /// afterwards, the previous repository document is written back before
    /// the error is returned, so the stored pair stays consistent.
    #[tracing::instrument(skip(self, rates))]
    pub fn apply_rates(&mut self, rates: &RateTable) -> Result<()> {
        rates.validate()?;
        let next = self.revalued(rates);

        let _lock = self.store.lock()?;
        self.ensure_unchanged()?;
        let written = self.store.save_packages(&next)?;

        if let Err(e) = self.store.save_rates(rates) {
            match self.store.save_packages(&self.packages) {
                Ok(restored) => self.revision = Some(restored),
                Err(restore) => {
                    warn!("Failed to restore previous packages: {}", restore);
                    self.revision = Some(written);
                }
            }
            return Err(e);
        }

        self.packages = next;
        self.revision = Some(written);
        info!("Re-valued {} packages", self.packages.len());
        Ok(())
    }

    fn revalued(&self, rates: &RateTable) -> Vec<Package> {
        let mut next = self.packages.clone();
        for package in &mut next {
            revalue_package(package, rates);
        }
        next
    }

    /// Must be called with the store lock held.
    fn ensure_unchanged(&self) -> Result<()> {
        if self.store.read_packages_document()? != self.revision {
            return Err(Error::Conflict {
                path: self.store.packages_path(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Package>) -> Result<()> {
        let _lock = self.store.lock()?;
        self.ensure_unchanged()?;
        let written = self.store.save_packages(&next)?;
        self.packages = next;
        self.revision = Some(written);
        Ok(())
    }
}
