//! Error kinds reported by the valuation core.
//!
//! `Validation` and `Format` are refusals: the operation was not applied and
//! the previous state is still authoritative. `Persistence` means the backing
//! store could not be read or written; mutating operations that hit it leave
//! the last persisted snapshot in place. `Busy` and `Conflict` reject a write
//! that would interleave with another run. Degenerate rates never surface here,
//! the valuation engine maps a zero divisor to a zero value instead.

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("unrecognized package data: {0}")]
    Format(String),

    #[error("failed to {action} {}: {source}", .path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error(
        "another operation is already modifying the data in {} (remove {} if no other packcalc is running)",
        .dir.display(),
        .lock.display()
    )]
    Busy { dir: PathBuf, lock: PathBuf },

    #[error("{} was changed by another packcalc run since it was read; run the command again", .path.display())]
    Conflict { path: PathBuf },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    pub fn persistence(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Persistence {
            action,
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Format(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
