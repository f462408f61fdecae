//! Pearson correlation
//!
//! Linear correlation coefficient with a two-tailed p-value from the exact
//! t transform on n - 2 degrees of freedom.

use serde::{Deserialize, Serialize};

use super::descriptive::mean;
use super::ttest::two_tailed_t;

/// Correlation coefficient and its two-tailed p-value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PearsonResult {
    pub r: f64,
    pub p_value: f64,
}

/// Pearson correlation between two equal-length samples.
///
/// Returns `None` when the samples differ in length, have fewer than three
/// observations, or either side has zero variance (the coefficient is
/// undefined there).
pub fn pearson(x: &[f64], y: &[f64]) -> Option<PearsonResult> {
    if x.len() != y.len() || x.len() < 3 {
        return None;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    let df = (x.len() - 2) as f64;

    // |r| of exactly 1 is a degenerate perfect fit
    let p_value = if 1.0 - r * r <= f64::EPSILON {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        two_tailed_t(t, df)
    };

    Some(PearsonResult { r, p_value })
}
