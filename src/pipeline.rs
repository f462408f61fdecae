//! Pipeline orchestration
//!
//! This module provides the public API for Catalytics: it materializes the
//! analysis-ready table once from the raw item sequence, then exposes each
//! hypothesis procedure as an independent pure call over that read-only
//! table. `report()` runs the whole battery and assembles the encoded
//! payload.

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::features::FeatureDeriver;
use crate::hypotheses::{
    test_category_anova, test_category_pair, test_day_of_week, test_duration_engagement,
    top_keywords, CategoryAnovaResult, CategoryPairResult, DayOfWeekResult,
    DurationEngagementResult, KeywordReport, TestOutcome, DEFAULT_KEYWORD_LIMIT,
    DEFAULT_TOP_FRACTION,
};
use crate::record::RawItem;
use crate::report::{
    by_category, by_day, computed_at_now, summarize_metrics, top_items, AnalysisReport,
    RankMetric, ReportProducer, REPORT_VERSION,
};
use crate::types::{AnalysisRecord, Category};

/// Tunable analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Share of the catalog sampled by the keyword procedure
    pub top_fraction: f64,
    /// Number of keywords reported
    pub keyword_limit: usize,
    /// First category of the pairwise comparison
    pub pair_a: Category,
    /// Second category of the pairwise comparison
    pub pair_b: Category,
    /// Rows per top-items table in the report
    pub top_items: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_fraction: DEFAULT_TOP_FRACTION,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            pair_a: Category::Tutorial,
            pair_b: Category::Career,
            top_items: 10,
        }
    }
}

/// Catalog analyzer holding the immutable analysis-ready table.
///
/// Construction is the only fallible step: an empty catalog is fatal before
/// any derivation, and an unparseable publish timestamp fails derivation.
/// Every test method afterwards is pure, reads the same table snapshot, and
/// cannot abort its siblings.
#[derive(Debug)]
pub struct CatalogAnalyzer {
    table: Vec<AnalysisRecord>,
    config: AnalyzerConfig,
}

impl CatalogAnalyzer {
    /// Build the analyzer with default settings.
    pub fn new(items: &[RawItem]) -> Result<Self, AnalyticsError> {
        Self::with_config(items, AnalyzerConfig::default())
    }

    /// Build the analyzer with explicit settings.
    pub fn with_config(items: &[RawItem], config: AnalyzerConfig) -> Result<Self, AnalyticsError> {
        if items.is_empty() {
            return Err(AnalyticsError::EmptyCatalog);
        }
        let table = FeatureDeriver::derive(items)?;
        Ok(Self { table, config })
    }

    /// The analysis-ready table, one record per input item in input order.
    pub fn table(&self) -> &[AnalysisRecord] {
        &self.table
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Test (a): duration vs engagement correlation.
    pub fn duration_engagement(&self) -> TestOutcome<DurationEngagementResult> {
        test_duration_engagement(&self.table)
    }

    /// Test (b): day-of-week effect on views.
    pub fn day_of_week(&self) -> TestOutcome<DayOfWeekResult> {
        test_day_of_week(&self.table)
    }

    /// Test (c): pairwise category comparison using the configured pair.
    pub fn category_pair(&self) -> TestOutcome<CategoryPairResult> {
        test_category_pair(&self.table, self.config.pair_a, self.config.pair_b)
    }

    /// Test (d): ANOVA across all present categories.
    pub fn category_anova(&self) -> TestOutcome<CategoryAnovaResult> {
        test_category_anova(&self.table)
    }

    /// Test (e): keyword salience in top performers.
    pub fn keywords(&self) -> KeywordReport {
        top_keywords(&self.table, self.config.top_fraction, self.config.keyword_limit)
    }

    /// Run every procedure and assemble the full report payload.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer::generate(),
            computed_at: computed_at_now(),
            item_count: self.table.len(),
            summary: summarize_metrics(&self.table),
            by_category: by_category(&self.table),
            by_day: by_day(&self.table),
            top_by_views: top_items(&self.table, RankMetric::Views, self.config.top_items),
            top_by_engagement: top_items(
                &self.table,
                RankMetric::EngagementRate,
                self.config.top_items,
            ),
            duration_engagement: self.duration_engagement(),
            day_of_week: self.day_of_week(),
            category_pair: self.category_pair(),
            category_anova: self.category_anova(),
            keywords: self.keywords(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn make_item(id: usize, title: &str, views: u64, published: &str) -> RawItem {
        RawItem {
            id: format!("v{id}"),
            title: title.to_string(),
            views,
            likes: views / 20,
            comments: views / 100,
            duration: format!("PT{}M", 5 + (id % 40)),
            published: published.to_string(),
            description: None,
            tags: None,
        }
    }

    /// A small catalog spread across several weeks, mixing categories.
    fn make_catalog() -> Vec<RawItem> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(); // a Monday
        let titles = [
            "SQL Tutorial for Beginners",
            "Career switch stories",
            "Portfolio project walkthrough",
            "Excel tips nobody mentions",
            "Live Q&A session",
            "Channel update",
        ];
        (0..36)
            .map(|i| {
                let date = start + Duration::days(i as i64);
                make_item(
                    i,
                    titles[i % titles.len()],
                    1_000 + (i as u64 * 37) % 900,
                    &format!("{date}T15:00:00Z"),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let err = CatalogAnalyzer::new(&[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyCatalog));
    }

    #[test]
    fn test_table_preserves_rows_and_order() {
        let items = make_catalog();
        let analyzer = CatalogAnalyzer::new(&items).unwrap();
        assert_eq!(analyzer.table().len(), items.len());
        assert_eq!(analyzer.table()[0].item.id, "v0");
        assert_eq!(analyzer.table()[35].item.id, "v35");
    }

    #[test]
    fn test_report_runs_every_procedure() {
        let analyzer = CatalogAnalyzer::new(&make_catalog()).unwrap();
        let report = analyzer.report();

        assert_eq!(report.item_count, 36);
        assert_eq!(report.report_version, REPORT_VERSION);
        assert!(!report.summary.is_empty());
        assert!(!report.by_category.is_empty());
        assert_eq!(report.by_day.len(), 7);
        assert!(report.top_by_views.len() <= 10);

        // One procedure being indeterminate must not prevent the others
        // from appearing in the payload.
        let json = report.to_json().unwrap();
        assert!(json.contains("duration_engagement"));
        assert!(json.contains("day_of_week"));
        assert!(json.contains("category_pair"));
        assert!(json.contains("category_anova"));
        assert!(json.contains("keywords"));
    }

    #[test]
    fn test_configured_pair_is_used() {
        let config = AnalyzerConfig {
            pair_a: Category::Tools,
            pair_b: Category::Other,
            ..AnalyzerConfig::default()
        };
        let analyzer = CatalogAnalyzer::with_config(&make_catalog(), config).unwrap();
        let outcome = analyzer.category_pair();
        if let Some(result) = outcome.completed() {
            assert_eq!(result.group_a.category, Category::Tools);
            assert_eq!(result.group_b.category, Category::Other);
        }
    }

    #[test]
    fn test_procedures_are_independent_of_order() {
        let analyzer = CatalogAnalyzer::new(&make_catalog()).unwrap();
        // Running a procedure twice, interleaved with others, yields the
        // same decision: the table is never mutated.
        let first = analyzer.day_of_week();
        let _ = analyzer.category_anova();
        let _ = analyzer.keywords();
        let second = analyzer.day_of_week();
        assert_eq!(
            first.completed().map(|r| r.p_value.to_bits()),
            second.completed().map(|r| r.p_value.to_bits()),
        );
    }

    #[test]
    fn test_bad_timestamp_fails_construction() {
        let mut items = make_catalog();
        items[3].published = "not a timestamp".to_string();
        let err = CatalogAnalyzer::new(&items).unwrap_err();
        assert!(matches!(err, AnalyticsError::Timestamp { .. }));
    }
}
