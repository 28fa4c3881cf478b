//! Backup destination management for snapkeep
//!
//! This crate provides the side-effecting collaborators around the
//! retention selector:
//! - Timestamped snapshot naming
//! - Discovery of dated snapshot directories
//! - Parallel, idempotent deletion
//! - The "latest" alias symlink
//! - Delta-sync transfer via an external tool (rsync)

pub mod alias;
pub mod discover;
pub mod error;
pub mod name;
pub mod prune;
pub mod transfer;

// Re-exports
pub use alias::LatestAlias;
pub use discover::discover;
pub use error::{StoreError, TransferError};
pub use name::{parse_snapshot_date, SnapshotName};
pub use prune::{prune, PruneReport};
pub use transfer::Transfer;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
