//! Hypothesis test suite
//!
//! Five independent procedures, each a pure function over the analysis-ready
//! table (or a grouping derived from it):
//! - Duration vs engagement correlation
//! - Day-of-week effect on views (ANOVA + post-hoc)
//! - Pairwise category comparison (rank-sum authoritative)
//! - All-category comparison (descriptive ANOVA)
//! - Keyword salience in top performers (exploratory)
//!
//! Procedures never panic and never abort one another: statistical
//! precondition failures come back as a distinct indeterminate outcome,
//! not as an error and not as a fake null result.

pub mod category_anova;
pub mod category_pair;
pub mod day_of_week;
pub mod duration_engagement;
pub mod keywords;

use serde::{Deserialize, Serialize};

pub use category_anova::{test_category_anova, CategoryAnovaResult, CategoryCount};
pub use category_pair::{
    test_category_pair, CategoryGroupStats, CategoryPairResult, EffectSize,
};
pub use day_of_week::{
    test_day_of_week, DayMeanViews, DayOfWeekResult, DayRecommendation, PairwiseComparison,
};
pub use duration_engagement::{
    test_duration_engagement, CorrelationReading, DurationEngagementResult,
};
pub use keywords::{
    top_keywords, KeywordCount, KeywordReport, DEFAULT_KEYWORD_LIMIT, DEFAULT_TOP_FRACTION,
};

/// Fixed significance threshold shared by every procedure
pub const ALPHA: f64 = 0.05;

/// Significance decision for a directional hypothesis.
///
/// `Reversed` means the effect was significant but in the opposite direction
/// to the hypothesis; it is never folded into `Supported` on significance
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Supported,
    Reversed,
    NotSignificant,
}

impl Verdict {
    /// Decide from a p-value and whether the observed direction matches the
    /// hypothesis. Sign is only consulted once significance holds.
    pub fn decide(p_value: f64, direction_matches: bool) -> Self {
        if p_value >= ALPHA {
            Verdict::NotSignificant
        } else if direction_matches {
            Verdict::Supported
        } else {
            Verdict::Reversed
        }
    }
}

/// Outcome of one test procedure.
///
/// `Indeterminate` is the distinct insufficient-data outcome: the test's
/// structural preconditions were not met, so neither a supported nor a
/// rejected conclusion may be drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome<T> {
    Indeterminate { reason: String },
    Completed(T),
}

impl<T> TestOutcome<T> {
    pub fn indeterminate(reason: impl Into<String>) -> Self {
        TestOutcome::Indeterminate {
            reason: reason.into(),
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, TestOutcome::Indeterminate { .. })
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            TestOutcome::Completed(result) => Some(result),
            TestOutcome::Indeterminate { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_requires_sign_and_significance() {
        assert_eq!(Verdict::decide(0.01, true), Verdict::Supported);
        assert_eq!(Verdict::decide(0.01, false), Verdict::Reversed);
        assert_eq!(Verdict::decide(0.05, true), Verdict::NotSignificant);
        assert_eq!(Verdict::decide(0.2, false), Verdict::NotSignificant);
    }

    #[test]
    fn test_outcome_accessors() {
        let done: TestOutcome<u32> = TestOutcome::Completed(7);
        assert_eq!(done.completed(), Some(&7));
        assert!(!done.is_indeterminate());

        let missing: TestOutcome<u32> = TestOutcome::indeterminate("too few records");
        assert!(missing.is_indeterminate());
        assert_eq!(missing.completed(), None);
    }
}
