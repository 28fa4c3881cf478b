//! Grandfather-father-son retention selection
//!
//! This crate provides:
//! - Dated snapshot records with opaque identifiers
//! - Period keys at day / ISO week / month / year granularity
//! - Per-tier bucket selection (most recent representative per bucket)
//! - Keep/delete partitioning of a snapshot set
//!
//! Everything here is pure: no filesystem access, no clock.

pub mod period;
pub mod policy;
pub mod select;
pub mod snapshot;

// Re-exports
pub use period::{Granularity, PeriodKey};
pub use policy::{PolicyError, RetentionPolicy, Tier, MAX_TIER_COUNT};
pub use select::{bucket_select, compute_keep_and_delete, RetentionPlan, TierSelection};
pub use snapshot::Snapshot;
