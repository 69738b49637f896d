//! Weighted mean and variance.
//!
//! Used for recency-weighted baselines where every match contributes with its
//! own weight. Weights must be non-negative; entries with zero weight are
//! ignored by the mean but still validated.

/// Weighted mean and (population) variance of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedStats {
    /// Weighted arithmetic mean: `Σ wᵢxᵢ / Σ wᵢ`.
    pub mean: f32,
    /// Weighted population variance: `Σ wᵢ(xᵢ - mean)² / Σ wᵢ`.
    pub variance: f32,
    /// Sum of all weights.
    pub total_weight: f32,
}

impl WeightedStats {
    /// Computes weighted statistics from `(value, weight)` pairs.
    ///
    /// # Returns
    ///
    /// * `Some(WeightedStats)` - if the total weight is positive
    /// * `None` - if the dataset is empty or every weight is zero
    ///
    /// # Panics
    ///
    /// Panics if any weight is negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laneiq_stats::weighted::WeightedStats;
    /// let stats = WeightedStats::new([(1.0, 1.0), (3.0, 1.0)]).unwrap();
    /// assert_eq!(stats.mean, 2.0);
    /// assert_eq!(stats.variance, 1.0);
    /// ```
    #[must_use]
    pub fn new<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let pairs = pairs.into_iter().collect::<Vec<_>>();
        assert!(
            pairs.iter().all(|(_, w)| w.is_finite() && *w >= 0.0),
            "weights must be finite and non-negative"
        );

        let total_weight = pairs.iter().map(|(_, w)| w).sum::<f32>();
        if total_weight <= 0.0 {
            return None;
        }

        let mean = pairs.iter().map(|(x, w)| x * w).sum::<f32>() / total_weight;
        let variance = pairs
            .iter()
            .map(|(x, w)| w * (x - mean).powi(2))
            .sum::<f32>()
            / total_weight;

        // rounding can push the mean a hair outside [min, max]
        let (min, max) = pairs
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), (x, _)| {
                (lo.min(*x), hi.max(*x))
            });
        let mean = mean.clamp(min, max);

        Some(Self {
            mean,
            variance,
            total_weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        assert!(WeightedStats::new([]).is_none());
    }

    #[test]
    fn test_zero_weights_is_none() {
        assert!(WeightedStats::new([(1.0, 0.0), (2.0, 0.0)]).is_none());
    }

    #[test]
    fn test_single_value_is_itself() {
        let stats = WeightedStats::new([(42.5, 4.0)]).unwrap();
        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_heavier_weight_pulls_mean() {
        let stats = WeightedStats::new([(10.0, 4.0), (0.0, 1.0)]).unwrap();
        assert!((stats.mean - 8.0).abs() < 1e-6);
        assert_eq!(stats.total_weight, 5.0);
    }

    #[test]
    fn test_mean_stays_within_extremes() {
        let values = [0.1_f32, 0.2, 0.3, 0.7, 1e-7, 3.3];
        let weights = [4.0_f32, 2.0, 2.0, 2.0, 2.0, 1.0];
        let stats = WeightedStats::new(values.iter().copied().zip(weights)).unwrap();
        assert!(stats.mean >= 1e-7 && stats.mean <= 3.3);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_weight_panics() {
        let _ = WeightedStats::new([(1.0, -1.0)]);
    }
}
