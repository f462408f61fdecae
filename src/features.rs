//! Feature derivation
//!
//! This module turns raw catalog items into the analysis-ready table:
//! - Runtime in seconds/minutes from the compact duration encoding
//! - Zero-guarded per-view ratio metrics
//! - Temporal features (day of week, month, year, quarter label)
//! - Category label and duration size class
//!
//! Derivation is order-preserving and row-count-preserving: every input item
//! produces exactly one record, in input order.

use chrono::{Datelike, Weekday};

use crate::category::classify;
use crate::duration::parse_duration;
use crate::error::AnalyticsError;
use crate::record::{parse_published, RawItem};
use crate::types::{AnalysisRecord, DurationBucket};

/// Feature deriver producing the analysis-ready table
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Derive one analysis record per raw item, preserving input order.
    ///
    /// Malformed durations degrade to zero seconds and unclassifiable titles
    /// degrade to `Other`; an unparseable publish timestamp is an upstream
    /// contract violation and fails the whole derivation.
    pub fn derive(items: &[RawItem]) -> Result<Vec<AnalysisRecord>, AnalyticsError> {
        items.iter().map(derive_record).collect()
    }
}

fn derive_record(item: &RawItem) -> Result<AnalysisRecord, AnalyticsError> {
    let duration_seconds = parse_duration(&item.duration);
    let duration_minutes = duration_seconds as f64 / 60.0;

    let likes_per_view = per_view(item.likes, item.views);
    let comments_per_view = per_view(item.comments, item.views);
    let engagement_rate = per_view(item.likes.saturating_add(item.comments), item.views);

    let published = parse_published(&item.published).ok_or_else(|| AnalyticsError::Timestamp {
        item_id: item.id.clone(),
        value: item.published.clone(),
    })?;

    let weekday = published.weekday();
    let month = published.month();
    let year = published.year();

    Ok(AnalysisRecord {
        item: item.clone(),
        duration_seconds,
        duration_minutes,
        likes_per_view,
        comments_per_view,
        engagement_rate,
        published,
        day_of_week: weekday.num_days_from_monday(),
        day_name: day_name(weekday).to_string(),
        month,
        year,
        upload_quarter: format!("{}Q{}", year, (month - 1) / 3 + 1),
        category: classify(&item.title),
        duration_bucket: DurationBucket::from_minutes(duration_minutes),
    })
}

/// Zero-guarded per-view ratio.
///
/// A view count of zero is treated as one for division purposes only; the
/// numerator is unaffected. Every ratio metric shares this substitution, so
/// it lives in one place.
pub(crate) fn per_view(count: u64, views: u64) -> f64 {
    count as f64 / views.max(1) as f64
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
