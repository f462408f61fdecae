//! Duration vs engagement association
//!
//! Tests whether shorter items draw higher engagement: Pearson correlation
//! between runtime seconds and each per-view ratio metric. The decision is
//! taken on the engagement-rate correlation alone, and only after checking
//! its sign — a significant positive correlation rejects the hypothesis in
//! the reversed direction.

use serde::{Deserialize, Serialize};

use super::{TestOutcome, Verdict};
use crate::stats::pearson;
use crate::types::AnalysisRecord;

/// One correlation against runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationReading {
    pub r: f64,
    pub p_value: f64,
}

/// Result of the duration-engagement test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEngagementResult {
    pub likes_per_view: CorrelationReading,
    pub comments_per_view: CorrelationReading,
    pub engagement_rate: CorrelationReading,
    /// Decision on the engagement-rate correlation: supported when the
    /// correlation is significantly negative
    pub verdict: Verdict,
}

/// Correlate runtime with the three per-view metrics across all records.
pub fn test_duration_engagement(
    table: &[AnalysisRecord],
) -> TestOutcome<DurationEngagementResult> {
    let durations: Vec<f64> = table.iter().map(|r| r.duration_seconds as f64).collect();
    let likes: Vec<f64> = table.iter().map(|r| r.likes_per_view).collect();
    let comments: Vec<f64> = table.iter().map(|r| r.comments_per_view).collect();
    let engagement: Vec<f64> = table.iter().map(|r| r.engagement_rate).collect();

    let (Some(likes_corr), Some(comments_corr), Some(engagement_corr)) = (
        pearson(&durations, &likes),
        pearson(&durations, &comments),
        pearson(&durations, &engagement),
    ) else {
        return TestOutcome::indeterminate(
            "correlation needs at least 3 records with varying duration and engagement",
        );
    };

    let verdict = Verdict::decide(engagement_corr.p_value, engagement_corr.r < 0.0);

    TestOutcome::Completed(DurationEngagementResult {
        likes_per_view: CorrelationReading {
            r: likes_corr.r,
            p_value: likes_corr.p_value,
        },
        comments_per_view: CorrelationReading {
            r: comments_corr.r,
            p_value: comments_corr.p_value,
        },
        engagement_rate: CorrelationReading {
            r: engagement_corr.r,
            p_value: engagement_corr.p_value,
        },
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureDeriver;
    use crate::record::RawItem;

    fn make_item(id: usize, duration: &str, views: u64, likes: u64) -> RawItem {
        RawItem {
            id: format!("v{id}"),
            title: format!("Item {id}"),
            views,
            likes,
            comments: 0,
            duration: duration.to_string(),
            published: "2023-05-01T15:00:00Z".to_string(),
            description: None,
            tags: None,
        }
    }

    #[test]
    fn test_shorter_items_engage_more_is_supported() {
        // Engagement rate falls steadily as runtime grows.
        let items: Vec<RawItem> = (1..=12)
            .map(|i| {
                let minutes = i * 5;
                // 1000 views each; likes shrink with runtime
                make_item(i as usize, &format!("PT{minutes}M"), 1000, (130 - i * 10) as u64)
            })
            .collect();
        let table = FeatureDeriver::derive(&items).unwrap();

        let outcome = test_duration_engagement(&table);
        let result = outcome.completed().expect("test should complete");
        assert!(result.engagement_rate.r < 0.0);
        assert!(result.engagement_rate.p_value < 0.05);
        assert_eq!(result.verdict, Verdict::Supported);
    }

    #[test]
    fn test_positive_correlation_is_reversed_not_supported() {
        let items: Vec<RawItem> = (1..=12)
            .map(|i| {
                let minutes = i * 5;
                make_item(i as usize, &format!("PT{minutes}M"), 1000, (i * 10) as u64)
            })
            .collect();
        let table = FeatureDeriver::derive(&items).unwrap();

        let result = test_duration_engagement(&table);
        let result = result.completed().unwrap();
        assert!(result.engagement_rate.r > 0.0);
        assert_eq!(result.verdict, Verdict::Reversed);
    }

    #[test]
    fn test_flat_engagement_is_indeterminate() {
        // Identical engagement everywhere: zero variance, no correlation defined.
        let items: Vec<RawItem> = (1..=6)
            .map(|i| make_item(i as usize, &format!("PT{}M", i * 3), 1000, 50))
            .collect();
        let table = FeatureDeriver::derive(&items).unwrap();

        assert!(test_duration_engagement(&table).is_indeterminate());
    }

    #[test]
    fn test_tiny_table_is_indeterminate() {
        let items = vec![make_item(1, "PT5M", 100, 10), make_item(2, "PT10M", 100, 5)];
        let table = FeatureDeriver::derive(&items).unwrap();
        assert!(test_duration_engagement(&table).is_indeterminate());
    }
}
