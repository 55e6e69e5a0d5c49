//! Platform directory lookups.

use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn data_dir_impl(&self) -> Option<PathBuf> {
        dirs::data_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};

    #[test]
    fn test_real_runtime_data_dir() {
        // CI containers may lack a home directory
        if let Some(dir) = RealRuntime.data_dir() {
            assert!(dir.is_absolute());
        }
    }
}
