/// Unweighted summary of a window of values.
///
/// Variance is the population variance (divided by `n`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub variance: f32,
    pub std_dev: f32,
    /// `std_dev / |mean|`, or 0 when the mean is 0
    pub coefficient_of_variation: f32,
}

impl DescriptiveStats {
    /// Summarizes `values`. Returns `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laneiq_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([380.0, 420.0, 400.0]).unwrap();
    /// assert_eq!(stats.min, 380.0);
    /// assert_eq!(stats.max, 420.0);
    /// assert_eq!(stats.mean, 400.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f32;
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        let mean = (values.iter().sum::<f32>() / n).clamp(min, max);
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        let std_dev = variance.sqrt();
        Some(Self {
            min,
            max,
            mean,
            variance,
            std_dev,
            coefficient_of_variation: coefficient_of_variation(mean, std_dev),
        })
    }
}

/// `std_dev / |mean|`, or `0.0` when the mean is (numerically) zero.
///
/// ```
/// # use laneiq_stats::descriptive::coefficient_of_variation;
/// assert_eq!(coefficient_of_variation(10.0, 2.0), 0.2);
/// assert_eq!(coefficient_of_variation(0.0, 5.0), 0.0);
/// ```
#[must_use]
pub fn coefficient_of_variation(mean: f32, std_dev: f32) -> f32 {
    if mean.abs() <= f32::EPSILON {
        0.0
    } else {
        std_dev / mean.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new([]).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([7.0]).unwrap();
        assert_eq!((stats.min, stats.max, stats.mean), (7.0, 7.0, 7.0));
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_population_variance() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-6);
        assert!((stats.variance - 4.0).abs() < 1e-6);
        assert!((stats.std_dev - 2.0).abs() < 1e-6);
        assert!((stats.coefficient_of_variation - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_all_zero_values_have_zero_cv() {
        let stats = DescriptiveStats::new([0.0; 5]).unwrap();
        assert_eq!(stats.coefficient_of_variation, 0.0);
    }
}
