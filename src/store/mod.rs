//! Persistence for the rate table and the package repository.
//!
//! # Structure
//!
//! - `documents` - JSON documents in the data directory, written atomically
//! - `lock` - in-flight lock file guarding writes
//! - `repository` - the package collection and its mutation API
//! - `seed` - first-run sources for the initial package list

mod documents;
mod lock;
mod repository;
mod seed;

pub use documents::{DataDir, LOCK_FILE, PACKAGES_FILE, RATES_FILE};
pub use lock::StoreLock;
pub use repository::PackageRepository;
pub use seed::{FileSeed, HttpSeed, SeedSource};
