//! Error types for Catalytics

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Failed to parse records: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unparseable published timestamp '{value}' for item {item_id}")]
    Timestamp { item_id: String, value: String },

    #[error("Empty catalog: at least one item is required before analysis")]
    EmptyCatalog,
}
