//! Emphasis gap model
//!
//! Each side (claims, behaviors) is reduced to an [`EmphasisProfile`]: the
//! weighted mass per category and the side's total. Gaps are differences of
//! shares, `behavior_share - claim_share`, so a side that keeps growing in
//! volume without changing its mix produces a stable gap.

use crate::weighting::Weighted;
use mirror_domain::{Category, Evidence};
use serde::Serialize;
use std::collections::BTreeMap;

/// Weighted mass and raw count of one category on one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryWeight {
    /// Sum of contributions
    pub mass: f64,

    /// Number of records
    pub count: usize,
}

/// Distribution of weighted evidence over categories for one side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmphasisProfile {
    categories: BTreeMap<Category, CategoryWeight>,
    total_mass: f64,
    unclassified: usize,
}

impl EmphasisProfile {
    /// Aggregate weighted records; unclassified records add no mass
    pub fn from_weighted<E: Evidence>(records: &[Weighted<'_, E>]) -> Self {
        let mut profile = Self::default();
        for weighted in records {
            profile.add(weighted.record.category(), weighted.contribution);
        }
        profile
    }

    /// Add one record's contribution
    pub fn add(&mut self, category: &Category, contribution: f64) {
        if category.is_unclassified() {
            self.unclassified += 1;
            return;
        }
        let entry = self.categories.entry(category.clone()).or_default();
        entry.mass += contribution;
        entry.count += 1;
        self.total_mass += contribution;
    }

    /// Total weighted mass over classified records
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Whether the side carries no classified evidence
    pub fn is_empty(&self) -> bool {
        self.total_mass <= 0.0
    }

    /// Records skipped as unclassified
    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    /// Mass and count for a category (zero when absent)
    pub fn weight(&self, category: &Category) -> CategoryWeight {
        self.categories.get(category).copied().unwrap_or_default()
    }

    /// Share of total mass held by a category; 0 when the side is empty
    pub fn share(&self, category: &Category) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.weight(category).mass / self.total_mass
    }

    /// Categories carrying mass, in order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.keys()
    }
}

/// Share comparison for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGap {
    /// Category compared
    pub category: Category,

    /// Category share of claim mass
    pub claim_share: f64,

    /// Category share of behavior mass
    pub behavior_share: f64,

    /// `behavior_share - claim_share`
    pub raw_gap: f64,

    /// Weighted claim mass in the category
    pub claim_mass: f64,

    /// Weighted behavior mass in the category
    pub behavior_mass: f64,

    /// Claims in the category
    pub claim_count: usize,

    /// Behaviors in the category
    pub behavior_count: usize,

    /// Scale in [0, 1] for sparse evidence
    pub confidence_factor: f64,

    /// `100 * |raw_gap| * confidence_factor`, clamped to [0, 100]
    pub severity: f64,
}

/// Computes one [`CategoryGap`] per category present on either side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapModel {
    min_evidence_count: f64,
}

impl GapModel {
    /// Create a model saturating confidence at `min_evidence_count`
    pub fn new(min_evidence_count: f64) -> Self {
        Self { min_evidence_count }
    }

    /// Compare the two profiles, in category order
    pub fn compare(&self, claims: &EmphasisProfile, behaviors: &EmphasisProfile) -> Vec<CategoryGap> {
        let mut categories: Vec<&Category> = claims.categories().chain(behaviors.categories()).collect();
        categories.sort();
        categories.dedup();

        let either_empty = claims.is_empty() || behaviors.is_empty();

        categories
            .into_iter()
            .map(|category| {
                let claim = claims.weight(category);
                let behavior = behaviors.weight(category);
                let claim_share = claims.share(category);
                let behavior_share = behaviors.share(category);
                let raw_gap = behavior_share - claim_share;

                let confidence_factor = if either_empty {
                    0.0
                } else {
                    self.confidence_factor(claim.mass + behavior.mass)
                };
                let severity = (100.0 * raw_gap.abs() * confidence_factor).clamp(0.0, 100.0);

                CategoryGap {
                    category: category.clone(),
                    claim_share,
                    behavior_share,
                    raw_gap,
                    claim_mass: claim.mass,
                    behavior_mass: behavior.mass,
                    claim_count: claim.count,
                    behavior_count: behavior.count,
                    confidence_factor,
                    severity,
                }
            })
            .collect()
    }

    /// Linear ramp from 0 to 1 over `[0, min_evidence_count]`
    pub fn confidence_factor(&self, mass: f64) -> f64 {
        if self.min_evidence_count <= 0.0 {
            return 1.0;
        }
        (mass / self.min_evidence_count).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(entries: &[(&str, f64)]) -> EmphasisProfile {
        let mut profile = EmphasisProfile::default();
        for (category, contribution) in entries {
            profile.add(&Category::new(category), *contribution);
        }
        profile
    }

    fn find<'a>(gaps: &'a [CategoryGap], category: &str) -> &'a CategoryGap {
        gaps.iter()
            .find(|g| g.category.as_str() == category)
            .unwrap()
    }

    #[test]
    fn test_shares() {
        let p = profile(&[("delegation", 1.0), ("honesty", 3.0), ("unclassified", 10.0)]);
        assert_eq!(p.total_mass(), 4.0);
        assert_eq!(p.share(&Category::new("delegation")), 0.25);
        assert_eq!(p.share(&Category::new("honesty")), 0.75);
        assert_eq!(p.share(&Category::new("autonomy")), 0.0);
        assert_eq!(p.unclassified(), 1);
    }

    #[test]
    fn test_empty_side_has_zero_shares() {
        let p = profile(&[("unclassified", 1.0)]);
        assert!(p.is_empty());
        assert_eq!(p.share(&Category::unclassified()), 0.0);
        assert_eq!(p.share(&Category::new("delegation")), 0.0);
    }

    #[test]
    fn test_gap_is_share_difference() {
        let claims = profile(&[("delegation", 2.0), ("honesty", 2.0)]);
        let behaviors = profile(&[("delegation", 1.0), ("honesty", 9.0)]);
        let gaps = GapModel::new(3.0).compare(&claims, &behaviors);

        let delegation = find(&gaps, "delegation");
        assert_eq!(delegation.claim_share, 0.5);
        assert_eq!(delegation.behavior_share, 0.1);
        assert!((delegation.raw_gap + 0.4).abs() < 1e-12);
        assert_eq!(delegation.confidence_factor, 1.0);
        assert!((delegation.severity - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_sparse_evidence_scaled_down() {
        let claims = profile(&[("delegation", 0.5), ("honesty", 0.5)]);
        let behaviors = profile(&[("honesty", 0.5)]);
        let gaps = GapModel::new(3.0).compare(&claims, &behaviors);

        let delegation = find(&gaps, "delegation");
        assert!((delegation.confidence_factor - 0.5 / 3.0).abs() < 1e-12);
        assert!(delegation.severity < 100.0 * delegation.raw_gap.abs());
    }

    #[test]
    fn test_empty_side_forces_zero_severity() {
        let claims = profile(&[("delegation", 5.0)]);
        let behaviors = EmphasisProfile::default();
        let gaps = GapModel::new(3.0).compare(&claims, &behaviors);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].behavior_share, 0.0);
        assert_eq!(gaps[0].confidence_factor, 0.0);
        assert_eq!(gaps[0].severity, 0.0);
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let claims = profile(&[("honesty", 1.0), ("autonomy", 1.0)]);
        let behaviors = profile(&[("delegation", 1.0), ("honesty", 1.0)]);
        let gaps = GapModel::new(3.0).compare(&claims, &behaviors);
        let names: Vec<_> = gaps.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["autonomy", "delegation", "honesty"]);
    }

    #[test]
    fn test_zero_evidence_minimum_disables_scaling() {
        assert_eq!(GapModel::new(0.0).confidence_factor(0.01), 1.0);
    }

    fn entries() -> impl Strategy<Value = Vec<(usize, f64)>> {
        prop::collection::vec((0usize..5, 0.001f64..10.0), 0..20)
    }

    fn build(entries: &[(usize, f64)]) -> EmphasisProfile {
        const NAMES: [&str; 5] = ["autonomy", "delegation", "honesty", "curiosity", "unclassified"];
        let mut profile = EmphasisProfile::default();
        for (idx, contribution) in entries {
            profile.add(&Category::new(NAMES[*idx]), *contribution);
        }
        profile
    }

    proptest! {
        #[test]
        fn prop_shares_sum_to_one_or_zero(entries in entries()) {
            let p = build(&entries);
            let sum: f64 = p.categories().map(|c| p.share(c)).sum();
            if p.is_empty() {
                prop_assert_eq!(sum, 0.0);
            } else {
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_swap_negates_gap(a in entries(), b in entries()) {
            let model = GapModel::new(3.0);
            let (pa, pb) = (build(&a), build(&b));
            let forward = model.compare(&pa, &pb);
            let swapped = model.compare(&pb, &pa);
            prop_assert_eq!(forward.len(), swapped.len());
            for (f, s) in forward.iter().zip(&swapped) {
                prop_assert_eq!(&f.category, &s.category);
                prop_assert_eq!(f.raw_gap, -s.raw_gap);
                prop_assert_eq!(f.severity, s.severity);
            }
        }

        #[test]
        fn prop_severity_bounded(a in entries(), b in entries()) {
            for gap in GapModel::new(3.0).compare(&build(&a), &build(&b)) {
                prop_assert!((0.0..=100.0).contains(&gap.severity));
                prop_assert!((0.0..=1.0).contains(&gap.confidence_factor));
            }
        }
    }
}
