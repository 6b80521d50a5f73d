//! Ordinary least-squares fit between chlorophyll and oxygen.

use log::debug;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use wq_core::{
    error::{PipelineError, Result},
    series::MergedRecord,
};

/// Keeps the t statistic finite when |r| is 1.
const TINY: f64 = 1.0e-20;

/// Result of fitting `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub r: f64,
    /// Coefficient of determination, `r * r`
    pub r_squared: f64,
    /// Two-sided p-value for a zero slope
    pub p_value: f64,
    /// Standard error of the slope
    pub std_err: f64,
    /// Number of points used in the fit
    pub n: usize,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(x, y)` points.
///
/// Fails with `InsufficientPoints` below two points and with
/// `ConstantPredictor` when every x is the same. A constant y gives r = 0.
pub fn linear_regression(points: &[(f64, f64)]) -> Result<Regression> {
    let n = points.len();
    if n < 2 {
        return Err(PipelineError::InsufficientPoints { found: n });
    }
    let count = n as f64;
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / count;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / count;

    // biased (population) second moments
    let (mut ssxm, mut ssym, mut ssxym) = (0.0, 0.0, 0.0);
    for (x, y) in points {
        let dx = x - x_mean;
        let dy = y - y_mean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    ssxm /= count;
    ssym /= count;
    ssxym /= count;

    if ssxm == 0.0 {
        return Err(PipelineError::ConstantPredictor);
    }

    let r_den = (ssxm * ssym).sqrt();
    let r = if r_den == 0.0 {
        0.0
    } else {
        (ssxym / r_den).clamp(-1.0, 1.0)
    };
    let slope = ssxym / ssxm;
    let intercept = y_mean - slope * x_mean;

    let (p_value, std_err) = if n == 2 {
        let p = if points[0].1 == points[1].1 { 1.0 } else { 0.0 };
        (p, 0.0)
    } else {
        let df = (n - 2) as f64;
        let t = r * (df / ((1.0 - r + TINY) * (1.0 + r + TINY))).sqrt();
        let p = StudentsT::new(0.0, 1.0, df)
            .map(|dist| 2.0 * dist.sf(t.abs()))
            .unwrap_or(f64::NAN);
        let std_err = ((1.0 - r * r) * ssym / ssxm / df).sqrt();
        (p, std_err)
    };

    Ok(Regression {
        slope,
        intercept,
        r,
        r_squared: r * r,
        p_value,
        std_err,
        n,
    })
}

/// Fit oxygen against chlorophyll over the days where both are present.
pub fn correlate(records: &[MergedRecord]) -> Result<Regression> {
    let points: Vec<(f64, f64)> = records.iter().filter_map(MergedRecord::pair).collect();
    debug!(
        "regression: {} of {} merged days have both values",
        points.len(),
        records.len()
    );
    linear_regression(&points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn record(d: u32, chlorophyll: Option<f64>, oxygen: Option<f64>) -> MergedRecord {
        MergedRecord {
            date: NaiveDate::from_ymd_opt(2019, 1, d).unwrap(),
            chlorophyll,
            oxygen,
        }
    }

    #[test]
    fn test_perfect_line() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let fit = linear_regression(&points).unwrap();
        assert!((fit.r_squared - 1.0).abs() < EPS);
        assert!((fit.slope - 2.0).abs() < EPS);
        assert!((fit.intercept - 1.0).abs() < EPS);
        assert!(fit.std_err.abs() < EPS);
        assert!(fit.p_value < 1e-6);
        assert_eq!(fit.n, 10);
        assert!((fit.predict(4.0) - 9.0).abs() < EPS);
    }

    #[test]
    fn test_noisy_fit_matches_reference() {
        // reference values from a standard least-squares routine
        let points = [(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 4.0), (5.0, 5.0)];
        let fit = linear_regression(&points).unwrap();
        assert!((fit.slope - 0.6).abs() < EPS);
        assert!((fit.intercept - 2.2).abs() < EPS);
        assert!((fit.r - 0.7745966692414834).abs() < 1e-9);
        assert!((fit.r_squared - 0.6).abs() < 1e-9);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
        assert!((fit.std_err - 0.282842712474619).abs() < 1e-9);
        assert!(fit.p_value > 0.1 && fit.p_value < 0.13);
    }

    #[test]
    fn test_negative_correlation() {
        let points = [(1.0, 9.0), (2.0, 7.0), (3.0, 5.0)];
        let fit = linear_regression(&points).unwrap();
        assert!((fit.r + 1.0).abs() < EPS);
        assert!((fit.r_squared - 1.0).abs() < EPS);
    }

    #[test]
    fn test_no_points_is_an_error() {
        let err = linear_regression(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientPoints { found: 0 }));
    }

    #[test]
    fn test_one_point_is_an_error() {
        let err = linear_regression(&[(1.0, 2.0)]).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientPoints { found: 1 }));
    }

    #[test]
    fn test_constant_predictor_is_an_error() {
        let err = linear_regression(&[(3.0, 1.0), (3.0, 2.0), (3.0, 5.0)]).unwrap_err();
        assert!(matches!(err, PipelineError::ConstantPredictor));
    }

    #[test]
    fn test_constant_response_has_zero_r() {
        let fit = linear_regression(&[(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]).unwrap();
        assert_eq!(fit.r, 0.0);
        assert_eq!(fit.slope, 0.0);
        assert!((fit.intercept - 4.0).abs() < EPS);
    }

    #[test]
    fn test_two_points() {
        let fit = linear_regression(&[(1.0, 1.0), (3.0, 5.0)]).unwrap();
        assert!((fit.slope - 2.0).abs() < EPS);
        assert_eq!(fit.std_err, 0.0);
        assert_eq!(fit.p_value, 0.0);
    }

    #[test]
    fn test_correlate_skips_missing_days() {
        let records = vec![
            record(1, Some(1.0), Some(3.0)),
            record(2, None, Some(4.0)),
            record(3, Some(2.0), None),
            record(4, Some(3.0), Some(7.0)),
            record(5, Some(4.0), Some(9.0)),
        ];
        let fit = correlate(&records).unwrap();
        assert_eq!(fit.n, 3);
        assert!((fit.slope - 2.0).abs() < EPS);
        assert!((fit.intercept - 1.0).abs() < EPS);
    }

    #[test]
    fn test_correlate_with_too_few_pairs_is_an_error() {
        let records = vec![
            record(1, Some(1.0), None),
            record(2, None, Some(4.0)),
            record(3, Some(2.0), Some(5.0)),
        ];
        let err = correlate(&records).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientPoints { found: 1 }));
    }
}
