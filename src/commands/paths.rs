use anyhow::Result;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Get the default data directory: `<platform data dir>/packcalc`
#[tracing::instrument(skip(runtime))]
pub fn default_data_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let base = runtime.data_dir().ok_or_else(|| {
        anyhow::anyhow!("Could not determine the data directory; pass --data-dir")
    })?;
    Ok(base.join("packcalc"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    #[test]
    fn test_default_data_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_data_dir()
            .returning(|| Some(PathBuf::from("/home/user/.local/share")));

        let dir = default_data_dir(&runtime).unwrap();
        assert_eq!(dir, PathBuf::from("/home/user/.local/share/packcalc"));
    }

    #[test]
    fn test_default_data_dir_unavailable() {
        let mut runtime = MockRuntime::new();
        runtime.expect_data_dir().returning(|| None);

        let err = default_data_dir(&runtime).unwrap_err();
        assert!(err.to_string().contains("--data-dir"));
    }
}
