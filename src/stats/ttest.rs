//! Welch's two-sample t-test
//!
//! Unequal-variance form with Welch-Satterthwaite degrees of freedom.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::descriptive::{mean, sample_variance};

/// Result of a two-sample t-test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestResult {
    pub statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

/// Welch's t-test, two-sided.
///
/// Returns `None` when either sample has fewer than two observations. When
/// both samples are constant the standard error is zero; the result then
/// reports p = 1.0 for equal means and p = 0.0 for complete separation.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Option<TTestResult> {
    if a.len() < 2 || b.len() < 2 {
        return None;
    }

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (mean(a), mean(b));
    let (va, vb) = (sample_variance(a), sample_variance(b));

    let se_sq = va / na + vb / nb;
    if se_sq == 0.0 {
        let separated = ma != mb;
        return Some(TTestResult {
            statistic: if separated {
                f64::INFINITY * (ma - mb).signum()
            } else {
                0.0
            },
            p_value: if separated { 0.0 } else { 1.0 },
            df: na + nb - 2.0,
        });
    }

    let statistic = (ma - mb) / se_sq.sqrt();
    let df = se_sq * se_sq
        / ((va / na).powi(2) / (na - 1.0) + (vb / nb).powi(2) / (nb - 1.0));

    Some(TTestResult {
        statistic,
        p_value: two_tailed_t(statistic, df),
        df,
    })
}

/// Two-tailed p-value for a t statistic with the given degrees of freedom.
pub(crate) fn two_tailed_t(t: f64, df: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearly_separated_groups() {
        let a = [100.0, 102.0, 98.0, 101.0, 99.0, 100.0];
        let b = [10.0, 12.0, 8.0, 11.0, 9.0, 10.0];
        let result = welch_t_test(&a, &b).unwrap();
        assert!(result.statistic > 0.0);
        assert!(result.p_value < 0.001);
    }

    #[test]
    fn test_identical_groups_are_not_significant() {
        let a = [5.0, 6.0, 7.0, 8.0];
        let result = welch_t_test(&a, &a).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!(result.p_value > 0.99);
    }

    #[test]
    fn test_direction_of_statistic() {
        let low = [1.0, 2.0, 3.0];
        let high = [10.0, 11.0, 12.0];
        let result = welch_t_test(&low, &high).unwrap();
        assert!(result.statistic < 0.0);
    }

    #[test]
    fn test_too_few_observations() {
        assert!(welch_t_test(&[1.0], &[2.0, 3.0]).is_none());
        assert!(welch_t_test(&[], &[2.0, 3.0]).is_none());
    }

    #[test]
    fn test_constant_groups() {
        let equal = welch_t_test(&[4.0, 4.0], &[4.0, 4.0]).unwrap();
        assert_eq!(equal.p_value, 1.0);

        let separated = welch_t_test(&[4.0, 4.0], &[9.0, 9.0]).unwrap();
        assert_eq!(separated.p_value, 0.0);
    }
}
