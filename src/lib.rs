//! Catalytics - Catalog analytics engine for creator engagement hypothesis testing
//!
//! Catalytics turns a creator's published media catalog into an analysis-ready
//! table and runs a battery of statistical procedures over it through a
//! deterministic pipeline: raw items → feature derivation → analysis table →
//! hypothesis tests → encoded report.
//!
//! ## Modules
//!
//! - **record**: input schema (`catalog.raw_item.v1`), parsing, validation
//! - **features**: duration parsing, category classification, derived metrics
//! - **stats**: correlation, t-test, ANOVA, rank-sum primitives
//! - **hypotheses**: the five independent test procedures
//! - **report**: aggregate tables and the encoded run payload

pub mod category;
pub mod duration;
pub mod error;
pub mod features;
pub mod hypotheses;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod stats;
pub mod types;

pub use error::AnalyticsError;
pub use pipeline::{AnalyzerConfig, CatalogAnalyzer};

// Schema exports
pub use record::{RawItem, RawItemAdapter, SCHEMA_VERSION};

// Result exports
pub use hypotheses::{TestOutcome, Verdict, ALPHA};
pub use report::AnalysisReport;
pub use types::{AnalysisRecord, Category, DurationBucket};

/// Catalytics version embedded in all report payloads
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "catalytics";
