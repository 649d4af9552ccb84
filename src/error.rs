//! Errors raised while reading, writing or benchmarking key data. The tree
//! itself never fails; only the code around it does.

use std::io;
use std::path::PathBuf;

/// Everything that can stop a `generate` or `run`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A data file couldn't be opened, read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// The data file contained no keys.
    #[error("{} contains no keys, run `generate` to create it", path.display())]
    EmptyInput {
        /// The file that was read.
        path: PathBuf,
    },

    /// The options can't describe a sensible run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type used throughout the harness.
pub type Result<T> = std::result::Result<T, Error>;
