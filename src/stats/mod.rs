//! Statistical primitives
//!
//! Small, pure building blocks consumed by the hypothesis test suite:
//! descriptive summaries, Pearson correlation, Welch's t-test, one-way
//! ANOVA, and the Mann-Whitney rank-sum test. Each returns `None` when its
//! numeric preconditions do not hold (too few observations, zero variance,
//! nonpositive degrees of freedom) so callers can surface a distinct
//! insufficient-data outcome instead of a bogus p-value.

pub mod anova;
pub mod correlation;
pub mod descriptive;
pub mod ranksum;
pub mod ttest;

pub use anova::{one_way_anova, AnovaResult};
pub use correlation::{pearson, PearsonResult};
pub use descriptive::Descriptive;
pub use ranksum::{mann_whitney_u, RankSumResult};
pub use ttest::{welch_t_test, TTestResult};
