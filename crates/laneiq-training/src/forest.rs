//! Random forest of [`DecisionTree`]s.
//!
//! Each tree is grown on a bootstrap resample of the history, with a random feature subset
//! considered at every split. Tree `i` draws from its own `Pcg64Mcg` seeded with
//! `seed + i`, so the forest is reproducible regardless of how trees are spread across
//! worker threads.

use std::{num::NonZeroUsize, thread};

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::{
    importance::normalize_l1,
    tree::{DecisionTree, Sample, TreeParams},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Features tried per split; `None` means `max(1, floor(sqrt(d)))`
    pub max_features: Option<usize>,
    pub seed: u64,
    /// Labelled matches required before a model is fit
    pub min_history: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 6,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
            min_history: 10,
        }
    }
}

impl ForestParams {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    #[must_use]
    pub fn features_per_split(&self, n_features: usize) -> usize {
        let k = self
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().floor() as usize);
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Fits a forest on `rows` with per-row `labels` and `weights`.
    ///
    /// Trees are distributed over scoped worker threads in contiguous chunks.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length or `rows` is empty. A panic in a worker thread is
    /// propagated.
    #[must_use]
    pub fn fit(rows: &[&[f32]], labels: &[bool], weights: &[f32], params: &ForestParams) -> Self {
        assert_eq!(rows.len(), labels.len());
        assert_eq!(rows.len(), weights.len());
        assert!(!rows.is_empty());

        let n_features = rows[0].len();
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_leaf: params.min_samples_leaf,
            max_features: params.features_per_split(n_features),
        };
        let samples = rows
            .iter()
            .zip(labels)
            .zip(weights)
            .map(|((row, win), weight)| Sample {
                row,
                win: *win,
                weight: *weight,
            })
            .collect::<Vec<_>>();

        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = params.n_trees.div_ceil(workers).max(1);
        let mut trees = Vec::with_capacity(params.n_trees);
        thread::scope(|s| {
            let handles = (0..params.n_trees)
                .step_by(chunk_size)
                .map(|start| {
                    let end = (start + chunk_size).min(params.n_trees);
                    let samples = &samples;
                    let tree_params = &tree_params;
                    s.spawn(move || {
                        (start..end)
                            .map(|i| {
                                let mut rng =
                                    Pcg64Mcg::seed_from_u64(params.seed.wrapping_add(i as u64));
                                let resampled = bootstrap(samples, &mut rng);
                                DecisionTree::fit(&resampled, n_features, tree_params, &mut rng)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();
            // chunks are joined in spawn order, so tree i stays at index i
            for handle in handles {
                match handle.join() {
                    Ok(chunk) => trees.extend(chunk),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
        });

        Self { trees, n_features }
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean leaf probability over all trees.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn predict_proba(&self, row: &[f32]) -> f32 {
        if self.trees.is_empty() {
            return 0.5;
        }
        let sum: f32 = self.trees.iter().map(|t| t.predict(row)).sum();
        (sum / self.trees.len() as f32).clamp(0.0, 1.0)
    }

    /// Mean decrease in impurity, averaged over trees and L1-normalized.
    ///
    /// All zeros when no tree ever split.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f32> {
        let mut total = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (acc, v) in total.iter_mut().zip(tree.feature_importances()) {
                *acc += v;
            }
        }
        if !self.trees.is_empty() {
            let n = self.trees.len() as f32;
            for v in &mut total {
                *v /= n;
            }
        }
        normalize_l1(&mut total);
        total
    }

    /// Fraction of `rows` whose thresholded prediction matches the label.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn accuracy(&self, rows: &[&[f32]], labels: &[bool]) -> f32 {
        if rows.is_empty() {
            return 0.0;
        }
        let correct = rows
            .iter()
            .zip(labels)
            .filter(|(row, win)| (self.predict_proba(row) >= 0.5) == **win)
            .count();
        correct as f32 / rows.len() as f32
    }
}

/// Draws `samples.len()` samples with replacement.
fn bootstrap<'a, R>(samples: &[Sample<'a>], rng: &mut R) -> Vec<Sample<'a>>
where
    R: Rng + ?Sized,
{
    (0..samples.len())
        .map(|_| samples[rng.random_range(0..samples.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> (Vec<Vec<f32>>, Vec<bool>) {
        let rows = (0..20)
            .map(|i| {
                let i = i as f32;
                vec![i, (i * 7.0) % 5.0, 3.0]
            })
            .collect::<Vec<_>>();
        let labels = (0..20).map(|i| i >= 10).collect();
        (rows, labels)
    }

    fn fit(params: &ForestParams) -> (RandomForest, Vec<Vec<f32>>, Vec<bool>) {
        let (rows, labels) = dataset();
        let views = rows.iter().map(Vec::as_slice).collect::<Vec<_>>();
        let forest = RandomForest::fit(&views, &labels, &vec![1.0; rows.len()], params);
        (forest, rows, labels)
    }

    #[test]
    fn test_features_per_split() {
        let params = ForestParams::default();
        assert_eq!(params.features_per_split(29), 5);
        assert_eq!(params.features_per_split(1), 1);
        let params = ForestParams {
            max_features: Some(40),
            ..params
        };
        assert_eq!(params.features_per_split(29), 29);
    }

    #[test]
    fn test_forest_is_deterministic() {
        let params = ForestParams {
            n_trees: 17,
            ..ForestParams::default()
        };
        let (a, rows, _) = fit(&params);
        let (b, _, _) = fit(&params);
        assert_eq!(a, b);
        assert_eq!(a.n_trees(), 17);
        assert_eq!(a.predict_proba(&rows[3]), b.predict_proba(&rows[3]));
    }

    #[test]
    fn test_forest_learns_separable_feature() {
        let (forest, rows, labels) = fit(&ForestParams {
            n_trees: 30,
            max_features: Some(3),
            ..ForestParams::default()
        });
        assert!(forest.predict_proba(&[18.0, 0.0, 3.0]) > 0.5);
        assert!(forest.predict_proba(&[1.0, 0.0, 3.0]) < 0.5);

        let views = rows.iter().map(Vec::as_slice).collect::<Vec<_>>();
        assert_eq!(forest.accuracy(&views, &labels), 1.0);

        let importances = forest.feature_importances();
        // constant column never splits
        assert_eq!(importances[2], 0.0);
        assert!(importances[0] > importances[1]);
        let sum: f32 = importances.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_probability_is_never_certain() {
        let (forest, rows, _) = fit(&ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        });
        for row in &rows {
            let p = forest.predict_proba(row);
            assert!(p > 0.0 && p < 1.0);
        }
    }
}
