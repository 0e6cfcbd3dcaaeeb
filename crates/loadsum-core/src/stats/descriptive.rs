//! Descriptive measures over response-time samples.
//!
//! Functions taking `sorted` expect ascending order; `None` means the measure is
//! undefined for the given number of samples.

/// Sorted copy of the samples
pub fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

pub fn median(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent values in ascending order.
///
/// When several distinct values all occur equally often there is no mode and the
/// result is empty. A single distinct value is always its own mode.
pub fn mode(sorted: &[f64]) -> Vec<f64> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &value in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }

    let Some(highest) = runs.iter().map(|(_, count)| *count).max() else {
        return vec![];
    };

    if runs.len() > 1 && runs.iter().all(|(_, count)| *count == highest) {
        return vec![];
    }

    runs.into_iter()
        .filter(|(_, count)| *count == highest)
        .map(|(value, _)| value)
        .collect()
}

fn sum_squared_deviations(samples: &[f64], mean: f64) -> f64 {
    samples.iter().map(|x| (x - mean).powi(2)).sum()
}

/// Mean squared deviation (divides by `n`)
pub fn population_variance(samples: &[f64]) -> Option<f64> {
    let mean = mean(samples)?;
    Some(sum_squared_deviations(samples, mean) / samples.len() as f64)
}

/// Unbiased variance (divides by `n - 1`)
pub fn sample_variance(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let mean = mean(samples)?;
    Some(sum_squared_deviations(samples, mean) / (samples.len() - 1) as f64)
}

/// Percentile by linear interpolation between the order statistics bracketing
/// position `p * (n - 1) / 100` (0-based).
pub fn percentile_interpolated(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let position = (p * (n - 1) as f64 / 100.0).clamp(0.0, (n - 1) as f64);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    if lower == upper {
        Some(sorted[lower])
    } else {
        Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
    }
}

/// Percentile by nearest rank: the value at 1-based rank `ceil(p * n / 100)`,
/// with the rank clamped to `[1, n]`.
pub fn percentile_nearest_rank(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let rank = (p * n as f64 / 100.0).ceil();
    let rank = if rank < 1.0 {
        1
    } else {
        (rank as usize).min(n)
    };

    Some(sorted[rank - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mode_single_winner() {
        assert_eq!(mode(&sorted(&[1.0, 1.0, 2.0, 3.0])), vec![1.0]);
    }

    #[test]
    fn test_mode_all_tied_is_empty() {
        assert!(mode(&sorted(&[1.0, 1.0, 2.0, 2.0])).is_empty());
        assert!(mode(&sorted(&[4.0, 2.0, 9.0])).is_empty());
    }

    #[test]
    fn test_mode_partial_tie_returns_all_winners() {
        assert_eq!(mode(&sorted(&[2.0, 1.0, 2.0, 1.0, 3.0])), vec![1.0, 2.0]);
    }

    #[test]
    fn test_mode_single_value() {
        assert_eq!(mode(&[5.0]), vec![5.0]);
        assert_eq!(mode(&[7.0, 7.0, 7.0]), vec![7.0]);
        assert!(mode(&[]).is_empty());
    }

    #[test]
    fn test_variance() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(population_variance(&samples), Some(4.0));
        let sample = sample_variance(&samples).unwrap();
        assert!((sample - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_small_inputs() {
        assert_eq!(population_variance(&[42.0]), Some(0.0));
        assert_eq!(sample_variance(&[42.0]), None);
        assert_eq!(population_variance(&[]), None);
        assert_eq!(sample_variance(&[]), None);
    }

    #[test]
    fn test_percentile_p50() {
        let data = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_interpolated(&data, 50.0), Some(25.0));
        assert_eq!(percentile_nearest_rank(&data, 50.0), Some(20.0));
    }

    #[test]
    fn test_percentile_bounds() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile_interpolated(&data, 100.0), Some(50.0));
        assert_eq!(percentile_nearest_rank(&data, 100.0), Some(50.0));
        assert_eq!(percentile_interpolated(&data, 0.0), Some(10.0));
        // rank 0 is clamped up to the first element
        assert_eq!(percentile_nearest_rank(&data, 0.0), Some(10.0));
    }

    #[test]
    fn test_percentile_interpolates_between_neighbours() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64 * 10.0).collect();
        // position 0.9 * 9 = 8.1 -> 90 + 0.1 * (100 - 90)
        let p90 = percentile_interpolated(&data, 90.0).unwrap();
        assert!((p90 - 91.0).abs() < 1e-9);
        // ceil(0.9 * 10) = 9 -> 90
        assert_eq!(percentile_nearest_rank(&data, 90.0), Some(90.0));
        // ceil(0.95 * 10) = 10 -> 100
        assert_eq!(percentile_nearest_rank(&data, 95.0), Some(100.0));
    }

    #[test]
    fn test_nearest_rank_exact_multiple() {
        let data: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        // 95 * 20 / 100 = 19 exactly, no rounding up to 20
        assert_eq!(percentile_nearest_rank(&data, 95.0), Some(19.0));
    }

    #[test]
    fn test_percentile_single_sample() {
        assert_eq!(percentile_interpolated(&[7.0], 99.0), Some(7.0));
        assert_eq!(percentile_nearest_rank(&[7.0], 99.0), Some(7.0));
        assert_eq!(percentile_interpolated(&[], 99.0), None);
        assert_eq!(percentile_nearest_rank(&[], 99.0), None);
    }
}
