//! Day-of-week effect on reach
//!
//! Partitions view counts into seven weekday groups and runs a one-way
//! ANOVA. A weekday with zero observations is an input-validity failure and
//! is reported as such, never silently skipped. When the omnibus test is
//! significant, an all-pairs post-hoc comparison with family-wise error
//! control identifies which specific day pairs differ, and the day with the
//! highest mean views is recommended (the lowest flagged as worst)
//! regardless of which individual pairs reach significance.

use serde::{Deserialize, Serialize};

use super::{TestOutcome, Verdict, ALPHA};
use crate::stats::{one_way_anova, welch_t_test};
use crate::types::AnalysisRecord;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Mean views for one weekday
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMeanViews {
    pub day: String,
    pub count: usize,
    pub mean_views: f64,
}

/// One post-hoc pairwise comparison between two weekdays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub day_a: String,
    pub day_b: String,
    pub mean_diff: f64,
    pub p_value: f64,
    /// Family-wise adjusted p-value (Bonferroni over all 21 pairs)
    pub adjusted_p: f64,
    pub significant: bool,
}

/// Publish-day recommendation derived from per-day mean views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecommendation {
    pub best_day: String,
    pub worst_day: String,
}

/// Result of the day-of-week test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOfWeekResult {
    pub f_statistic: f64,
    pub p_value: f64,
    pub verdict: Verdict,
    /// Mean views per weekday, Monday through Sunday
    pub day_means: Vec<DayMeanViews>,
    /// All-pairs post-hoc comparisons; empty when the omnibus test is not
    /// significant
    pub pairwise: Vec<PairwiseComparison>,
    /// Present only when the omnibus test is significant
    pub recommendation: Option<DayRecommendation>,
}

/// ANOVA of view counts across the seven weekday groups.
pub fn test_day_of_week(table: &[AnalysisRecord]) -> TestOutcome<DayOfWeekResult> {
    let mut groups: [Vec<f64>; 7] = Default::default();
    for record in table {
        groups[record.day_of_week as usize].push(record.views() as f64);
    }

    let missing: Vec<&str> = (0..7)
        .filter(|&d| groups[d].is_empty())
        .map(|d| DAY_NAMES[d])
        .collect();
    if !missing.is_empty() {
        return TestOutcome::indeterminate(format!(
            "no items published on {}",
            missing.join(", ")
        ));
    }

    let refs: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
    let Some(anova) = one_way_anova(&refs) else {
        return TestOutcome::indeterminate(
            "too few observations across weekday groups for ANOVA",
        );
    };

    let day_means: Vec<DayMeanViews> = (0..7)
        .map(|d| DayMeanViews {
            day: DAY_NAMES[d].to_string(),
            count: groups[d].len(),
            mean_views: groups[d].iter().sum::<f64>() / groups[d].len() as f64,
        })
        .collect();

    let significant = anova.p_value < ALPHA;
    let verdict = if significant {
        Verdict::Supported
    } else {
        Verdict::NotSignificant
    };

    let (pairwise, recommendation) = if significant {
        (
            pairwise_comparisons(&groups),
            Some(recommend(&day_means)),
        )
    } else {
        (Vec::new(), None)
    };

    TestOutcome::Completed(DayOfWeekResult {
        f_statistic: anova.f_statistic,
        p_value: anova.p_value,
        verdict,
        day_means,
        pairwise,
        recommendation,
    })
}

/// All-pairs Welch comparisons with Bonferroni family-wise control at
/// [`ALPHA`].
fn pairwise_comparisons(groups: &[Vec<f64>; 7]) -> Vec<PairwiseComparison> {
    let n_pairs = 21.0; // 7 choose 2
    let mut comparisons = Vec::new();

    for a in 0..7 {
        for b in (a + 1)..7 {
            let Some(t) = welch_t_test(&groups[a], &groups[b]) else {
                // A weekday with a single observation cannot be compared;
                // surface the pair with an uninformative p-value.
                comparisons.push(PairwiseComparison {
                    day_a: DAY_NAMES[a].to_string(),
                    day_b: DAY_NAMES[b].to_string(),
                    mean_diff: group_mean(&groups[a]) - group_mean(&groups[b]),
                    p_value: 1.0,
                    adjusted_p: 1.0,
                    significant: false,
                });
                continue;
            };
            let adjusted_p = (t.p_value * n_pairs).min(1.0);
            comparisons.push(PairwiseComparison {
                day_a: DAY_NAMES[a].to_string(),
                day_b: DAY_NAMES[b].to_string(),
                mean_diff: group_mean(&groups[a]) - group_mean(&groups[b]),
                p_value: t.p_value,
                adjusted_p,
                significant: adjusted_p < ALPHA,
            });
        }
    }

    comparisons
}

fn group_mean(group: &[f64]) -> f64 {
    group.iter().sum::<f64>() / group.len() as f64
}

fn recommend(day_means: &[DayMeanViews]) -> DayRecommendation {
    let best = day_means
        .iter()
        .max_by(|a, b| a.mean_views.total_cmp(&b.mean_views))
        .map(|d| d.day.clone())
        .unwrap_or_default();
    let worst = day_means
        .iter()
        .min_by(|a, b| a.mean_views.total_cmp(&b.mean_views))
        .map(|d| d.day.clone())
        .unwrap_or_default();
    DayRecommendation {
        best_day: best,
        worst_day: worst,
    }
}
