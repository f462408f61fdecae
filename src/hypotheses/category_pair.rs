//! Pairwise category comparison
//!
//! Tests whether one content category out-reaches another (by default
//! Tutorial vs Career). View counts are heavily right-skewed, so the
//! rank-sum test is authoritative for the significance decision; the Welch
//! t-test is reported alongside for comparison only. Effect size is Cohen's
//! d over the pooled standard deviation.

use serde::{Deserialize, Serialize};

use super::{TestOutcome, Verdict};
use crate::stats::{mann_whitney_u, welch_t_test, Descriptive};
use crate::types::{AnalysisRecord, Category};

/// Descriptive statistics for one compared group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroupStats {
    pub category: Category,
    pub count: usize,
    pub mean_views: f64,
    pub median_views: f64,
    /// Population standard deviation of views
    pub std_dev_views: f64,
    /// Supplementary context, not part of the decision
    pub mean_engagement_rate: f64,
    /// This group's share of all compared items, 0-1
    pub share_of_compared: f64,
}

/// Magnitude band for a standardized mean difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSize {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectSize {
    /// Classify |d| into the conventional bands.
    pub fn from_cohens_d(d: f64) -> Self {
        let magnitude = d.abs();
        if magnitude < 0.2 {
            EffectSize::Negligible
        } else if magnitude < 0.5 {
            EffectSize::Small
        } else if magnitude < 0.8 {
            EffectSize::Medium
        } else {
            EffectSize::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectSize::Negligible => "negligible",
            EffectSize::Small => "small",
            EffectSize::Medium => "medium",
            EffectSize::Large => "large",
        }
    }
}

/// Result of the pairwise category comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPairResult {
    pub group_a: CategoryGroupStats,
    pub group_b: CategoryGroupStats,
    /// Welch t-test on raw view counts, reported for comparison only
    pub t_statistic: f64,
    pub t_p_value: f64,
    /// Mann-Whitney U test; authoritative for the decision
    pub u_statistic: f64,
    pub u_p_value: f64,
    pub cohens_d: f64,
    pub effect_size: EffectSize,
    /// Supported when the rank-sum test is significant AND group A's mean
    /// exceeds group B's
    pub verdict: Verdict,
}

/// Compare view counts between two named categories.
///
/// Fewer than two observations in either category yields the indeterminate
/// outcome, never a p-value.
pub fn test_category_pair(
    table: &[AnalysisRecord],
    category_a: Category,
    category_b: Category,
) -> TestOutcome<CategoryPairResult> {
    let group_a: Vec<&AnalysisRecord> =
        table.iter().filter(|r| r.category == category_a).collect();
    let group_b: Vec<&AnalysisRecord> =
        table.iter().filter(|r| r.category == category_b).collect();

    if group_a.len() < 2 || group_b.len() < 2 {
        return TestOutcome::indeterminate(format!(
            "need at least 2 items per category, found {} {} and {} {}",
            group_a.len(),
            category_a,
            group_b.len(),
            category_b,
        ));
    }

    let views_a: Vec<f64> = group_a.iter().map(|r| r.views() as f64).collect();
    let views_b: Vec<f64> = group_b.iter().map(|r| r.views() as f64).collect();

    let (Some(stats_a), Some(stats_b)) =
        (Descriptive::new(&views_a), Descriptive::new(&views_b))
    else {
        return TestOutcome::indeterminate("empty view distribution in a compared category");
    };
    let (Some(t), Some(u)) = (
        welch_t_test(&views_a, &views_b),
        mann_whitney_u(&views_a, &views_b),
    ) else {
        return TestOutcome::indeterminate("degenerate view distribution in a compared category");
    };

    let cohens_d = cohens_d(stats_a.mean, stats_a.std_dev, stats_b.mean, stats_b.std_dev);
    let verdict = Verdict::decide(u.p_value, stats_a.mean > stats_b.mean);

    let total = (group_a.len() + group_b.len()) as f64;

    TestOutcome::Completed(CategoryPairResult {
        group_a: group_stats(category_a, &group_a, &stats_a, total),
        group_b: group_stats(category_b, &group_b, &stats_b, total),
        t_statistic: t.statistic,
        t_p_value: t.p_value,
        u_statistic: u.u_statistic,
        u_p_value: u.p_value,
        cohens_d,
        effect_size: EffectSize::from_cohens_d(cohens_d),
        verdict,
    })
}

/// Standardized mean difference over the pooled standard deviation:
/// d = (mean_a - mean_b) / sqrt((sd_a^2 + sd_b^2) / 2)
fn cohens_d(mean_a: f64, sd_a: f64, mean_b: f64, sd_b: f64) -> f64 {
    let pooled = ((sd_a * sd_a + sd_b * sd_b) / 2.0).sqrt();
    if pooled == 0.0 {
        if mean_a == mean_b {
            0.0
        } else {
            f64::INFINITY * (mean_a - mean_b).signum()
        }
    } else {
        (mean_a - mean_b) / pooled
    }
}

fn group_stats(
    category: Category,
    records: &[&AnalysisRecord],
    views: &Descriptive,
    compared_total: f64,
) -> CategoryGroupStats {
    let mean_engagement_rate =
        records.iter().map(|r| r.engagement_rate).sum::<f64>() / records.len() as f64;
    CategoryGroupStats {
        category,
        count: records.len(),
        mean_views: views.mean,
        median_views: views.median,
        std_dev_views: views.std_dev,
        mean_engagement_rate,
        share_of_compared: records.len() as f64 / compared_total,
    }
}
