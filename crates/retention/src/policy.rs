//! Retention policy configuration

use crate::period::Granularity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound accepted for any single tier count
pub const MAX_TIER_COUNT: usize = 100_000;

/// One retention tier: keep the most recent `count` buckets at `granularity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub granularity: Granularity,
    pub count: usize,
}

/// Invalid retention policy
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("{tier} count {count} exceeds the maximum of {max}")]
    CountTooLarge {
        tier: Granularity,
        count: usize,
        max: usize,
    },
}

/// Grandfather-father-son retention policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Most recent daily snapshots to keep (default: 7)
    pub days: usize,
    /// Most recent ISO weeks to keep one snapshot for (default: 4)
    pub weeks: usize,
    /// Most recent months to keep one snapshot for (default: 12)
    pub months: usize,
    /// Most recent years to keep one snapshot for (default: 10)
    pub years: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            days: 7,
            weeks: 4,
            months: 12,
            years: 10,
        }
    }
}

impl RetentionPolicy {
    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn with_weeks(mut self, weeks: usize) -> Self {
        self.weeks = weeks;
        self
    }

    pub fn with_months(mut self, months: usize) -> Self {
        self.months = months;
        self
    }

    pub fn with_years(mut self, years: usize) -> Self {
        self.years = years;
        self
    }

    /// Count configured for a granularity
    pub fn count(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Day => self.days,
            Granularity::Week => self.weeks,
            Granularity::Month => self.months,
            Granularity::Year => self.years,
        }
    }

    /// Tiers in order days, weeks, months, years
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        Granularity::ALL.into_iter().map(move |granularity| Tier {
            granularity,
            count: self.count(granularity),
        })
    }

    /// Reject counts no real destination could need
    pub fn validate(&self) -> Result<(), PolicyError> {
        for tier in self.tiers() {
            if tier.count > MAX_TIER_COUNT {
                return Err(PolicyError::CountTooLarge {
                    tier: tier.granularity,
                    count: tier.count,
                    max: MAX_TIER_COUNT,
                });
            }
        }
        Ok(())
    }
}
