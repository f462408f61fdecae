//! Report assembly
//!
//! Aggregate tables and the analysis report payload consumed by reporting
//! and visualization collaborators: describe-style metric summaries, grouped
//! summaries by category and by publish day, top-item tables, and a JSON
//! encoding of the full run (producer metadata, aggregates, and the five
//! test outcomes). Also carries the thin CSV export of the analysis table.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalyticsError;
use crate::hypotheses::{
    CategoryAnovaResult, CategoryPairResult, DayOfWeekResult, DurationEngagementResult,
    KeywordReport, TestOutcome,
};
use crate::stats::Descriptive;
use crate::types::{AnalysisRecord, Category};
use crate::{PRODUCER_NAME, VERSION};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Describe-style summary row for one numeric metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Aggregate row for one group (a category or a publish day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub mean_views: f64,
    pub median_views: f64,
    pub total_views: u64,
    pub mean_likes_per_view: f64,
    pub mean_comments_per_view: f64,
    pub mean_engagement_rate: f64,
    pub mean_duration_minutes: f64,
}

/// Metric used to rank top items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Views,
    EngagementRate,
}

/// One row of a top-items table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItem {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_rate: f64,
    pub duration_minutes: f64,
    pub category: Category,
    pub published: String,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete analysis run payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at: String,
    pub item_count: usize,
    pub summary: Vec<MetricSummary>,
    pub by_category: Vec<GroupSummary>,
    pub by_day: Vec<GroupSummary>,
    pub top_by_views: Vec<TopItem>,
    pub top_by_engagement: Vec<TopItem>,
    pub duration_engagement: TestOutcome<DurationEngagementResult>,
    pub day_of_week: TestOutcome<DayOfWeekResult>,
    pub category_pair: TestOutcome<CategoryPairResult>,
    pub category_anova: TestOutcome<CategoryAnovaResult>,
    pub keywords: KeywordReport,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String, AnalyticsError> {
        serde_json::to_string(self).map_err(AnalyticsError::JsonError)
    }

    pub fn to_json_pretty(&self) -> Result<String, AnalyticsError> {
        serde_json::to_string_pretty(self).map_err(AnalyticsError::JsonError)
    }
}

impl ReportProducer {
    /// Producer metadata with a fresh instance id
    pub fn generate() -> Self {
        Self {
            name: PRODUCER_NAME.to_string(),
            version: VERSION.to_string(),
            instance_id: Uuid::new_v4().to_string(),
        }
    }
}

/// RFC 3339 timestamp for the moment the report is assembled
pub(crate) fn computed_at_now() -> String {
    Utc::now().to_rfc3339()
}

/// Describe-style summaries for every numeric column of the table.
pub fn summarize_metrics(table: &[AnalysisRecord]) -> Vec<MetricSummary> {
    let columns: [(&str, fn(&AnalysisRecord) -> f64); 7] = [
        ("views", |r| r.views() as f64),
        ("likes", |r| r.likes() as f64),
        ("comments", |r| r.comments() as f64),
        ("duration_seconds", |r| r.duration_seconds as f64),
        ("likes_per_view", |r| r.likes_per_view),
        ("comments_per_view", |r| r.comments_per_view),
        ("engagement_rate", |r| r.engagement_rate),
    ];

    columns
        .iter()
        .filter_map(|(name, extract)| {
            let values: Vec<f64> = table.iter().map(extract).collect();
            Descriptive::new(&values).map(|stats| MetricSummary {
                metric: (*name).to_string(),
                count: stats.count,
                mean: stats.mean,
                std_dev: stats.std_dev,
                min: stats.min,
                median: stats.median,
                max: stats.max,
            })
        })
        .collect()
}

/// Aggregate rows grouped by content category, in priority order.
/// Categories with no items are omitted.
pub fn by_category(table: &[AnalysisRecord]) -> Vec<GroupSummary> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let rows: Vec<&AnalysisRecord> =
                table.iter().filter(|r| r.category == *category).collect();
            group_summary(category.as_str(), &rows)
        })
        .collect()
}

/// Aggregate rows grouped by publish day, Monday through Sunday.
/// Days with no items are omitted.
pub fn by_day(table: &[AnalysisRecord]) -> Vec<GroupSummary> {
    (0..7u32)
        .filter_map(|day| {
            let rows: Vec<&AnalysisRecord> =
                table.iter().filter(|r| r.day_of_week == day).collect();
            let name = rows.first().map(|r| r.day_name.clone())?;
            group_summary(&name, &rows)
        })
        .collect()
}

fn group_summary(key: &str, rows: &[&AnalysisRecord]) -> Option<GroupSummary> {
    if rows.is_empty() {
        return None;
    }

    let views: Vec<f64> = rows.iter().map(|r| r.views() as f64).collect();
    let stats = Descriptive::new(&views)?;
    let n = rows.len() as f64;

    Some(GroupSummary {
        key: key.to_string(),
        count: rows.len(),
        mean_views: stats.mean,
        median_views: stats.median,
        total_views: rows.iter().map(|r| r.views()).sum(),
        mean_likes_per_view: rows.iter().map(|r| r.likes_per_view).sum::<f64>() / n,
        mean_comments_per_view: rows.iter().map(|r| r.comments_per_view).sum::<f64>() / n,
        mean_engagement_rate: rows.iter().map(|r| r.engagement_rate).sum::<f64>() / n,
        mean_duration_minutes: rows.iter().map(|r| r.duration_minutes).sum::<f64>() / n,
    })
}

/// Top `n` items ranked by the given metric, descending.
/// Ties keep the original table order.
pub fn top_items(table: &[AnalysisRecord], metric: RankMetric, n: usize) -> Vec<TopItem> {
    let mut order: Vec<usize> = (0..table.len()).collect();
    match metric {
        RankMetric::Views => order.sort_by(|&a, &b| table[b].views().cmp(&table[a].views())),
        RankMetric::EngagementRate => {
            order.sort_by(|&a, &b| table[b].engagement_rate.total_cmp(&table[a].engagement_rate));
        }
    }
    order.truncate(n);

    order
        .into_iter()
        .map(|i| {
            let r = &table[i];
            TopItem {
                id: r.item.id.clone(),
                title: r.item.title.clone(),
                views: r.views(),
                likes: r.likes(),
                comments: r.comments(),
                engagement_rate: r.engagement_rate,
                duration_minutes: r.duration_minutes,
                category: r.category,
                published: r.published.to_rfc3339(),
            }
        })
        .collect()
}

/// Encode the analysis table as CSV, one row per record.
///
/// Persistence is a thin external concern; this is the delimited form a
/// spreadsheet or notebook collaborator imports.
pub fn table_to_csv(table: &[AnalysisRecord]) -> String {
    let mut out = String::from(
        "id,title,views,likes,comments,duration,published,duration_seconds,duration_minutes,\
         likes_per_view,comments_per_view,engagement_rate,day_of_week,day_name,month,year,\
         upload_quarter,category,duration_bucket\n",
    );

    for r in table {
        let fields = [
            csv_field(&r.item.id),
            csv_field(&r.item.title),
            r.views().to_string(),
            r.likes().to_string(),
            r.comments().to_string(),
            csv_field(&r.item.duration),
            r.published.to_rfc3339(),
            r.duration_seconds.to_string(),
            r.duration_minutes.to_string(),
            r.likes_per_view.to_string(),
            r.comments_per_view.to_string(),
            r.engagement_rate.to_string(),
            r.day_of_week.to_string(),
            r.day_name.clone(),
            r.month.to_string(),
            r.year.to_string(),
            r.upload_quarter.clone(),
            csv_field(r.category.as_str()),
            csv_field(r.duration_bucket.as_str()),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureDeriver;
    use crate::record::RawItem;
    use pretty_assertions::assert_eq;

    fn make_item(id: usize, title: &str, views: u64, published: &str) -> RawItem {
        RawItem {
            id: format!("v{id}"),
            title: title.to_string(),
            views,
            likes: views / 10,
            comments: views / 50,
            duration: "PT10M".to_string(),
            published: published.to_string(),
            description: None,
            tags: None,
        }
    }

    fn make_table() -> Vec<AnalysisRecord> {
        let items = vec![
            make_item(1, "SQL Tutorial", 1_000, "2023-05-01T10:00:00Z"), // Monday
            make_item(2, "Career chat", 500, "2023-05-02T10:00:00Z"),    // Tuesday
            make_item(3, "Python Tutorial", 2_000, "2023-05-08T10:00:00Z"), // Monday
            make_item(4, "Channel news", 100, "2023-05-03T10:00:00Z"),   // Wednesday
        ];
        FeatureDeriver::derive(&items).unwrap()
    }

    #[test]
    fn test_metric_summaries() {
        let summaries = summarize_metrics(&make_table());
        assert_eq!(summaries.len(), 7);
        let views = &summaries[0];
        assert_eq!(views.metric, "views");
        assert_eq!(views.count, 4);
        assert_eq!(views.mean, 900.0);
        assert_eq!(views.min, 100.0);
        assert_eq!(views.max, 2_000.0);
    }

    #[test]
    fn test_by_category_groups_and_order() {
        let groups = by_category(&make_table());
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Tutorial", "Career", "Other"]);

        let tutorial = &groups[0];
        assert_eq!(tutorial.count, 2);
        assert_eq!(tutorial.mean_views, 1_500.0);
        assert_eq!(tutorial.total_views, 3_000);
        assert_eq!(tutorial.mean_duration_minutes, 10.0);
    }

    #[test]
    fn test_by_day_orders_monday_first() {
        let groups = by_day(&make_table());
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Monday", "Tuesday", "Wednesday"]);
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_top_items_by_views() {
        let top = top_items(&make_table(), RankMetric::Views, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "v3");
        assert_eq!(top[1].id, "v1");
    }

    #[test]
    fn test_csv_export_shape() {
        let csv = table_to_csv(&make_table());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5); // header + 4 rows
        assert!(lines[0].starts_with("id,title,views"));
        assert!(lines[1].starts_with("v1,SQL Tutorial,1000"));
    }

    #[test]
    fn test_csv_escaping() {
        let mut items = vec![make_item(1, "Pandas, explained \"fast\"", 10, "2023-05-01T10:00:00Z")];
        items[0].id = "v,1".to_string();
        let table = FeatureDeriver::derive(&items).unwrap();
        let csv = table_to_csv(&table);
        assert!(csv.contains("\"v,1\""));
        assert!(csv.contains("\"Pandas, explained \"\"fast\"\"\""));
    }

    #[test]
    fn test_producer_metadata() {
        let producer = ReportProducer::generate();
        assert_eq!(producer.name, PRODUCER_NAME);
        assert_eq!(producer.version, VERSION);
        assert!(!producer.instance_id.is_empty());
    }
}
