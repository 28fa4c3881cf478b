//! Bucket selection and keep/delete partitioning

use crate::period::Granularity;
use crate::policy::RetentionPolicy;
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Pick one representative per bucket and return the most recent `n` buckets
///
/// `snapshots` must be in ascending chronological order. Each snapshot is
/// written into the bucket map in that order, so the last write per key wins:
/// the representative of a bucket is its most recent snapshot, and among
/// snapshots of the same date the one observed last.
///
/// The result holds at most `n` snapshots, one per distinct key, ordered
/// chronologically ascending.
pub fn bucket_select<'a, Id, K, F>(snapshots: &'a [Snapshot<Id>], key: F, n: usize) -> Vec<&'a Snapshot<Id>>
where
    K: Ord,
    F: Fn(NaiveDate) -> K,
{
    if n == 0 {
        return Vec::new();
    }

    let mut buckets: BTreeMap<K, &'a Snapshot<Id>> = BTreeMap::new();
    for snapshot in snapshots {
        buckets.insert(key(snapshot.date), snapshot);
    }

    let skip = buckets.len().saturating_sub(n);
    buckets.into_values().skip(skip).collect()
}

impl Granularity {
    /// [`bucket_select`] keyed by this granularity
    pub fn select<Id>(self, snapshots: &[Snapshot<Id>], n: usize) -> Vec<&Snapshot<Id>> {
        bucket_select(snapshots, |date| self.key(date), n)
    }
}

/// Snapshots chosen by one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSelection<Id> {
    pub granularity: Granularity,
    /// Configured bucket count for the tier
    pub count: usize,
    /// Representatives, oldest first
    pub kept: Vec<Snapshot<Id>>,
}

/// Keep/delete partition of a snapshot set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPlan<Id: Ord> {
    /// Per-tier selections, days first
    pub tiers: Vec<TierSelection<Id>>,
    /// Union of all tier selections
    pub keep: BTreeSet<Id>,
    /// Everything not kept
    pub delete: BTreeSet<Id>,
}

impl<Id: Ord> RetentionPlan<Id> {
    /// True when nothing would be deleted
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty()
    }

    /// Selection for one granularity
    pub fn tier(&self, granularity: Granularity) -> Option<&TierSelection<Id>> {
        self.tiers.iter().find(|t| t.granularity == granularity)
    }
}

/// Partition `snapshots` into the identifiers to keep and to delete
///
/// Input order does not matter; a sorted copy is bucketed independently for
/// every tier of `policy`. The keep-set is the union of the tier
/// representatives, the delete-set is every other identifier. Duplicate
/// identifiers collapse into one entry.
pub fn compute_keep_and_delete<Id>(snapshots: &[Snapshot<Id>], policy: &RetentionPolicy) -> RetentionPlan<Id>
where
    Id: Ord + Clone,
{
    let mut sorted = snapshots.to_vec();
    sorted.sort();

    let mut keep = BTreeSet::new();
    let mut tiers = Vec::with_capacity(Granularity::ALL.len());

    for tier in policy.tiers() {
        let kept: Vec<Snapshot<Id>> = tier
            .granularity
            .select(&sorted, tier.count)
            .into_iter()
            .cloned()
            .collect();

        keep.extend(kept.iter().map(|s| s.id.clone()));
        tiers.push(TierSelection {
            granularity: tier.granularity,
            count: tier.count,
            kept,
        });
    }

    let delete = sorted
        .into_iter()
        .map(|s| s.id)
        .filter(|id| !keep.contains(id))
        .collect();

    RetentionPlan { tiers, keep, delete }
}
