//! Descriptive statistics over plain `f64` slices.
//!
//! Every function returns `NaN` where the statistic is undefined for the
//! input (empty input, or fewer than two values for a sample deviation).

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// # Examples
/// ```
/// use solar_insights::utils::stats::sample_std_dev;
///
/// assert!((sample_std_dev(&[10.0, 20.0, 30.0]) - 10.0).abs() < 1e-12);
/// assert!(sample_std_dev(&[42.0]).is_nan());
/// ```
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Sort a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile of already-sorted values, interpolating linearly between the
/// two nearest order statistics.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

pub fn median_sorted(sorted: &[f64]) -> f64 {
    quantile_sorted(sorted, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        let values = [30.0, 10.0, 20.0];
        assert_eq!(mean(&values), 20.0);
        assert_eq!(median_sorted(&sorted(&values)), 20.0);
        assert_eq!(median_sorted(&sorted(&[4.0, 1.0, 3.0, 2.0])), 2.5);
        assert!(mean(&[]).is_nan());
        assert!(median_sorted(&[]).is_nan());
    }

    #[test]
    fn test_quantiles_interpolate() {
        let values = sorted(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(quantile_sorted(&values, 0.0), 1.0);
        assert_eq!(quantile_sorted(&values, 0.25), 2.75);
        assert_eq!(quantile_sorted(&values, 0.75), 6.25);
        assert_eq!(quantile_sorted(&values, 1.0), 8.0);
    }

    #[test]
    fn test_sample_std_dev() {
        let std = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((std - 2.138089935299395).abs() < 1e-12);
        assert!(sample_std_dev(&[]).is_nan());
    }
}
