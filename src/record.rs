//! catalog.raw_item.v1 input schema
//!
//! The raw record shape supplied by the external retrieval collaborator:
//! one entry per published media item, with counts, a compact duration
//! encoding, and the publish timestamp. The collaborator guarantees unique
//! identifiers and non-negative counts; `validate_items` re-checks the
//! structural parts of that contract so bad batches are caught before
//! analysis.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AnalyticsError;

/// Current input schema version
pub const SCHEMA_VERSION: &str = "catalog.raw_item.v1";

/// One published media item as retrieved externally.
///
/// Immutable once created; consumed exactly once by feature derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    /// Opaque identifier, unique within a run
    pub id: String,
    /// Item title (free text, drives category classification)
    pub title: String,
    /// View count
    pub views: u64,
    /// Like count
    pub likes: u64,
    /// Comment count
    pub comments: u64,
    /// Compact duration encoding, e.g. "PT15M30S"
    pub duration: String,
    /// Publish timestamp, ISO-8601 (e.g. "2023-05-01T15:00:00Z")
    pub published: String,
    /// Item description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags attached by the creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl RawItem {
    /// Validate a single item against the input contract.
    ///
    /// Malformed durations are not an error here: they degrade to zero
    /// seconds during derivation. Timestamps are checked because an
    /// unparseable one is fatal to the pipeline.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle(self.id.clone()));
        }
        if parse_published(&self.published).is_none() {
            return Err(ValidationError::BadTimestamp {
                id: self.id.clone(),
                value: self.published.clone(),
            });
        }
        Ok(())
    }
}

/// Per-item validation failure
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("item identifier is empty")]
    EmptyId,

    #[error("item {0} has an empty title")]
    EmptyTitle(String),

    #[error("item {id} has an unparseable published timestamp '{value}'")]
    BadTimestamp { id: String, value: String },

    #[error("duplicate item identifier: {0}")]
    DuplicateId(String),
}

/// Result of validating one item within a batch
#[derive(Debug)]
pub struct ValidationIssue {
    pub index: usize,
    pub item_id: String,
    pub error: ValidationError,
}

/// Adapter for loading and validating raw item batches
pub struct RawItemAdapter;

impl RawItemAdapter {
    /// Parse a JSON string containing an array of items
    pub fn parse_array(json: &str) -> Result<Vec<RawItem>, AnalyticsError> {
        let items: Vec<RawItem> = serde_json::from_str(json)?;
        Ok(items)
    }

    /// Parse NDJSON (newline-delimited JSON) containing one item per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawItem>, AnalyticsError> {
        let mut items = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawItem>(trimmed) {
                Ok(item) => items.push(item),
                Err(e) => {
                    return Err(AnalyticsError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(items)
    }

    /// Validate a batch, including the unique-identifier invariant.
    ///
    /// Returns one issue per failing item; an empty vector means the batch
    /// satisfies the input contract.
    pub fn validate_items(items: &[RawItem]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for (index, item) in items.iter().enumerate() {
            if let Err(error) = item.validate() {
                issues.push(ValidationIssue {
                    index,
                    item_id: item.id.clone(),
                    error,
                });
                continue;
            }
            if !seen.insert(item.id.as_str()) {
                issues.push(ValidationIssue {
                    index,
                    item_id: item.id.clone(),
                    error: ValidationError::DuplicateId(item.id.clone()),
                });
            }
        }

        issues
    }
}

/// Parse a published timestamp into UTC.
///
/// Accepts RFC 3339 first, then a naive datetime, then a bare date taken as
/// midnight UTC. Returns `None` for anything else.
pub(crate) fn parse_published(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&chrono::Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
