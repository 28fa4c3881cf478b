//! Error types for destination and transfer operations

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Filesystem failure while managing the backup destination
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to scan {path}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} exists and is not a symlink; refusing to replace it")]
    AliasNotSymlink { path: PathBuf },

    #[error("deletion task did not complete")]
    TaskAborted(#[from] tokio::task::JoinError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of the external synchronization step
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("unbalanced quoting in transfer arguments: {0}")]
    InvalidArgs(String),

    #[error("failed to prepare {path}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}
