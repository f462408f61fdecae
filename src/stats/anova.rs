//! One-way analysis of variance

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use super::descriptive::mean;

/// Result of a one-way ANOVA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: f64,
    pub df_within: f64,
}

/// One-way ANOVA over two or more groups.
///
/// Returns `None` when fewer than two groups are supplied, any group is
/// empty, or the within-group degrees of freedom are nonpositive. When every
/// observation equals its group mean the F statistic degenerates: the result
/// reports p = 1.0 if the group means also coincide and p = 0.0 otherwise.
pub fn one_way_anova(groups: &[&[f64]]) -> Option<AnovaResult> {
    if groups.len() < 2 || groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    let k = groups.len();
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return None;
    }

    let grand_mean =
        groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let group_mean = mean(group);
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;

    if ss_within == 0.0 {
        let separated = ss_between > 0.0;
        return Some(AnovaResult {
            f_statistic: if separated { f64::INFINITY } else { 0.0 },
            p_value: if separated { 0.0 } else { 1.0 },
            df_between,
            df_within,
        });
    }

    let f_statistic = (ss_between / df_between) / (ss_within / df_within);
    let p_value = match FisherSnedecor::new(df_between, df_within) {
        Ok(dist) => (1.0 - dist.cdf(f_statistic)).clamp(0.0, 1.0),
        Err(_) => 1.0,
    };

    Some(AnovaResult {
        f_statistic,
        p_value,
        df_between,
        df_within,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_group_far_from_the_rest() {
        let a = [10.0, 11.0, 9.0, 10.5, 9.5];
        let b = [10.2, 10.8, 9.1, 10.4, 9.6];
        let c = [100.0, 98.0, 102.0, 101.0, 99.0];
        let result = one_way_anova(&[&a, &b, &c]).unwrap();
        assert!(result.f_statistic > 10.0);
        assert!(result.p_value < 0.001);
    }

    #[test]
    fn test_indistinguishable_groups() {
        let a = [5.0, 6.0, 7.0, 8.0];
        let b = [6.0, 5.0, 8.0, 7.0];
        let result = one_way_anova(&[&a, &b]).unwrap();
        assert!(result.p_value > 0.9);
    }

    #[test]
    fn test_degrees_of_freedom() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 3.0, 4.0];
        let c = [3.0, 4.0, 5.0];
        let result = one_way_anova(&[&a, &b, &c]).unwrap();
        assert_eq!(result.df_between, 2.0);
        assert_eq!(result.df_within, 6.0);
    }

    #[test]
    fn test_rejects_empty_group() {
        let a = [1.0, 2.0];
        let empty: [f64; 0] = [];
        assert!(one_way_anova(&[&a, &empty]).is_none());
        assert!(one_way_anova(&[&a]).is_none());
    }

    #[test]
    fn test_constant_groups() {
        let same = one_way_anova(&[&[3.0, 3.0][..], &[3.0, 3.0][..]]).unwrap();
        assert_eq!(same.p_value, 1.0);

        let apart = one_way_anova(&[&[3.0, 3.0][..], &[9.0, 9.0][..]]).unwrap();
        assert_eq!(apart.p_value, 0.0);
    }
}
