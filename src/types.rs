//! Core types for the Catalytics pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw catalog items, analysis-ready records, and the label enums
//! shared by feature derivation and the hypothesis tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::RawItem;

/// Content category assigned from title keywords.
///
/// The variant order is the classification priority order: a title matching
/// keywords from two categories is assigned to whichever variant appears
/// earlier here. See [`crate::category::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tutorial,
    Career,
    Project,
    Tools,
    #[serde(rename = "Q&A/Livestream")]
    QaLivestream,
    Advice,
    Other,
}

impl Category {
    /// All categories in classification priority order, `Other` last.
    pub const ALL: [Category; 7] = [
        Category::Tutorial,
        Category::Career,
        Category::Project,
        Category::Tools,
        Category::QaLivestream,
        Category::Advice,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tutorial => "Tutorial",
            Category::Career => "Career",
            Category::Project => "Project",
            Category::Tools => "Tools",
            Category::QaLivestream => "Q&A/Livestream",
            Category::Advice => "Advice",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Duration size class, ordered from shortest to longest.
///
/// Intervals are left-closed and right-open: a runtime of exactly 5.0 minutes
/// falls in `Short`, not `VeryShort`. The final class is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "Very Short")]
    VeryShort,
    Short,
    Medium,
    Long,
    #[serde(rename = "Very Long")]
    VeryLong,
}

impl DurationBucket {
    /// Bucket a runtime in minutes into one of the five size classes.
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes < 5.0 {
            DurationBucket::VeryShort
        } else if minutes < 15.0 {
            DurationBucket::Short
        } else if minutes < 30.0 {
            DurationBucket::Medium
        } else if minutes < 60.0 {
            DurationBucket::Long
        } else {
            DurationBucket::VeryLong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::VeryShort => "Very Short",
            DurationBucket::Short => "Short",
            DurationBucket::Medium => "Medium",
            DurationBucket::Long => "Long",
            DurationBucket::VeryLong => "Very Long",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the analysis-ready table: a raw item enriched with every
/// derived feature the hypothesis tests consume.
///
/// The table is materialized once by [`crate::features::FeatureDeriver`] and
/// read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Source item as supplied by the retrieval collaborator
    pub item: RawItem,
    /// Runtime in whole seconds (0 when the encoding was malformed)
    pub duration_seconds: u64,
    /// Runtime in minutes
    pub duration_minutes: f64,
    /// Likes per view, zero-guarded
    pub likes_per_view: f64,
    /// Comments per view, zero-guarded
    pub comments_per_view: f64,
    /// (likes + comments) per view, zero-guarded
    pub engagement_rate: f64,
    /// Parsed publish timestamp (UTC)
    pub published: DateTime<Utc>,
    /// Day of week, Monday = 0 through Sunday = 6
    pub day_of_week: u32,
    /// English day name ("Monday" .. "Sunday")
    pub day_name: String,
    /// Calendar month, 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Quarter label, e.g. "2023Q2"
    pub upload_quarter: String,
    /// Content category from title keywords
    pub category: Category,
    /// Runtime size class
    pub duration_bucket: DurationBucket,
}

impl AnalysisRecord {
    pub fn views(&self) -> u64 {
        self.item.views
    }

    pub fn likes(&self) -> u64 {
        self.item.likes
    }

    pub fn comments(&self) -> u64 {
        self.item.comments
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }
}
