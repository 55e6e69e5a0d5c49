use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// In-flight marker for a write to the data directory.
///
/// The lock file is created exclusively and removed when the guard drops.
/// A stale file left by a crashed process has to be removed by hand.
#[must_use]
pub struct StoreLock<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> StoreLock<'a, R> {
    pub fn acquire(runtime: &'a R, dir: &Path, path: PathBuf) -> Result<Self> {
        let owner = std::process::id().to_string();
        match runtime.create_exclusive(&path, owner.as_bytes()) {
            Ok(true) => {
                debug!("Acquired {}", path.display());
                Ok(Self { runtime, path })
            }
            Ok(false) => Err(Error::Busy {
                dir: dir.to_path_buf(),
                lock: path,
            }),
            Err(e) => Err(Error::persistence("lock", &path, e)),
        }
    }
}

impl<R: Runtime> Drop for StoreLock<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.runtime.remove_file(&self.path) {
            warn!("Failed to release {}: {}", self.path.display(), e);
        }
    }
}
