//! Temporal weighting: exponential decay of evidence with age

use crate::config::AnalyzerConfig;
use chrono::{DateTime, Utc};
use mirror_domain::{Behavior, Claim, Evidence};

/// Smallest positive `f64`; the weight of arbitrarily old evidence
const WEIGHT_FLOOR: f64 = 5e-324;

/// Decay weight for a record `age_days` old
///
/// `2^(-age / half_life)`; ages of zero or less weigh exactly 1.0 and the
/// result never reaches 0.
pub fn decay_weight(age_days: i64, half_life_days: u32) -> f64 {
    if age_days <= 0 {
        return 1.0;
    }
    let half_life = f64::from(half_life_days.max(1));
    let weight = (-(age_days as f64) / half_life).exp2();
    weight.max(WEIGHT_FLOOR)
}

/// Calendar days between `at` and `now` (same day is 0, future is negative)
pub fn age_in_days(now: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    (now.date_naive() - at.date_naive()).num_days()
}

/// A record paired with its weight for one run
#[derive(Debug, Clone)]
pub struct Weighted<'a, E> {
    /// The record
    pub record: &'a E,

    /// Decay weight in (0, 1]
    pub decay: f64,

    /// Decay weight times the record's strength
    pub contribution: f64,

    /// Position in extraction order
    pub order: usize,
}

/// Applies decay to both evidence streams against one reference time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalWeighting {
    now: DateTime<Utc>,
    claim_half_life: u32,
    behavior_half_life: u32,
}

impl TemporalWeighting {
    /// Create a weighting with explicit half-lives
    pub fn new(now: DateTime<Utc>, claim_half_life: u32, behavior_half_life: u32) -> Self {
        Self {
            now,
            claim_half_life,
            behavior_half_life,
        }
    }

    /// Create a weighting from the effective half-lives of a configuration
    pub fn from_config(config: &AnalyzerConfig, now: DateTime<Utc>) -> Self {
        Self::new(now, config.claim_half_life(), config.behavior_half_life())
    }

    /// Reference time
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Weigh claims with the claim half-life
    pub fn weigh_claims<'a>(&self, claims: &'a [Claim]) -> Vec<Weighted<'a, Claim>> {
        self.weigh(claims, self.claim_half_life)
    }

    /// Weigh behaviors with the behavior half-life
    pub fn weigh_behaviors<'a>(&self, behaviors: &'a [Behavior]) -> Vec<Weighted<'a, Behavior>> {
        self.weigh(behaviors, self.behavior_half_life)
    }

    fn weigh<'a, E: Evidence>(&self, records: &'a [E], half_life: u32) -> Vec<Weighted<'a, E>> {
        records
            .iter()
            .enumerate()
            .map(|(order, record)| {
                let decay = decay_weight(age_in_days(self.now, record.timestamp()), half_life);
                Weighted {
                    record,
                    decay,
                    contribution: decay * record.strength(),
                    order,
                }
            })
            .collect()
    }
}
