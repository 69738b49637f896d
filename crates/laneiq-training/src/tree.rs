//! Weighted CART classification tree.
//!
//! Trees split on a single feature threshold per node, choosing the split with the largest
//! weighted Gini impurity decrease among a random subset of features. Every sample carries a
//! weight; duplicates from bootstrap sampling simply appear several times.
//!
//! Leaves predict the Laplace-smoothed win probability `(w_win + 1) / (w_total + 2)`, so a
//! tree never reports exactly 0 or 1.

use rand::Rng;

/// Minimum impurity decrease for a split to be kept.
const MIN_DECREASE: f32 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Number of features considered at each split
    pub max_features: usize,
}

/// One training sample: feature row, label and weight.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    pub row: &'a [f32],
    pub win: bool,
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        probability: f32,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    /// Unnormalized impurity decrease per feature
    importances: Vec<f32>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    win: f32,
    total: f32,
}

impl Totals {
    fn of(samples: &[Sample<'_>]) -> Self {
        let mut totals = Self::default();
        for s in samples {
            totals.add(s);
        }
        totals
    }

    fn add(&mut self, s: &Sample<'_>) {
        self.total += s.weight;
        if s.win {
            self.win += s.weight;
        }
    }

    fn sub(&mut self, s: &Sample<'_>) {
        self.total -= s.weight;
        if s.win {
            self.win -= s.weight;
        }
    }

    /// Gini impurity times total weight.
    fn weighted_gini(self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let p = (self.win / self.total).clamp(0.0, 1.0);
        self.total * 2.0 * p * (1.0 - p)
    }

    fn probability(self) -> f32 {
        (self.win.max(0.0) + 1.0) / (self.total.max(0.0) + 2.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f32,
    /// Number of samples going left after sorting by `feature`
    left_len: usize,
    decrease: f32,
}

impl DecisionTree {
    /// Grows a tree on `samples`, which must all have `n_features` values.
    pub fn fit<R>(
        samples: &[Sample<'_>],
        n_features: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut tree = Self {
            nodes: vec![],
            importances: vec![0.0; n_features],
        };
        let mut samples = samples.to_vec();
        tree.grow(&mut samples, 0, n_features, params, rng);
        tree
    }

    fn grow<R>(
        &mut self,
        samples: &mut [Sample<'_>],
        depth: usize,
        n_features: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> usize
    where
        R: Rng + ?Sized,
    {
        let totals = Totals::of(samples);
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            probability: totals.probability(),
        });

        let splittable = depth < params.max_depth
            && samples.len() >= 2 * params.min_samples_leaf.max(1)
            && totals.weighted_gini() > MIN_DECREASE;
        if !splittable {
            return index;
        }
        let Some(split) = best_split(samples, totals, n_features, params, rng) else {
            return index;
        };

        self.importances[split.feature] += split.decrease;
        samples.sort_by(|a, b| a.row[split.feature].total_cmp(&b.row[split.feature]));
        let (left_samples, right_samples) = samples.split_at_mut(split.left_len);
        let left = self.grow(left_samples, depth + 1, n_features, params, rng);
        let right = self.grow(right_samples, depth + 1, n_features, params, rng);
        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    /// Win probability of `row`.
    #[must_use]
    pub fn predict(&self, row: &[f32]) -> f32 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Impurity decrease per feature, normalized to sum to 1 (all zero for a single leaf).
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f32> {
        let mut importances = self.importances.clone();
        crate::importance::normalize_l1(&mut importances);
        importances
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn best_split<R>(
    samples: &mut [Sample<'_>],
    totals: Totals,
    n_features: usize,
    params: &TreeParams,
    rng: &mut R,
) -> Option<Split>
where
    R: Rng + ?Sized,
{
    let parent = totals.weighted_gini();
    let min_leaf = params.min_samples_leaf.max(1);
    let k = params.max_features.clamp(1, n_features);
    let mut features = rand::seq::index::sample(rng, n_features, k).into_vec();
    // visit candidates in a fixed order so equal decreases resolve by feature index
    features.sort_unstable();

    let mut best: Option<Split> = None;
    for feature in features {
        samples.sort_by(|a, b| a.row[feature].total_cmp(&b.row[feature]));
        let mut left = Totals::default();
        let mut right = totals;
        for i in 0..samples.len() - 1 {
            left.add(&samples[i]);
            right.sub(&samples[i]);
            let (here, next) = (samples[i].row[feature], samples[i + 1].row[feature]);
            let left_len = i + 1;
            if here == next || left_len < min_leaf || samples.len() - left_len < min_leaf {
                continue;
            }
            let decrease = parent - left.weighted_gini() - right.weighted_gini();
            if decrease > MIN_DECREASE && best.is_none_or(|b| decrease > b.decrease) {
                best = Some(Split {
                    feature,
                    threshold: here + (next - here) / 2.0,
                    left_len,
                    decrease,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 6,
            min_samples_leaf: 1,
            max_features: 2,
        }
    }

    #[test]
    fn test_pure_node_is_a_single_leaf() {
        let rows = [[1.0_f32, 2.0], [3.0, 4.0]];
        let samples = rows
            .iter()
            .map(|row| Sample {
                row,
                win: true,
                weight: 1.0,
            })
            .collect::<Vec<_>>();
        let tree = DecisionTree::fit(&samples, 2, &params(), &mut Pcg64Mcg::seed_from_u64(0));
        assert_eq!(tree.node_count(), 1);
        // (2 + 1) / (2 + 2)
        assert_eq!(tree.predict(&[0.0, 0.0]), 0.75);
        assert!(tree.feature_importances().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_separable_feature_is_found() {
        // feature 1 separates perfectly, feature 0 is noise
        let rows = [
            [0.3_f32, 1.0],
            [0.9, 2.0],
            [0.1, 3.0],
            [0.5, 10.0],
            [0.4, 11.0],
            [0.2, 12.0],
        ];
        let samples = rows
            .iter()
            .zip([false, false, false, true, true, true])
            .map(|(row, win)| Sample {
                row,
                win,
                weight: 1.0,
            })
            .collect::<Vec<_>>();
        let tree = DecisionTree::fit(&samples, 2, &params(), &mut Pcg64Mcg::seed_from_u64(7));
        assert!(tree.predict(&[0.5, 12.0]) > 0.5);
        assert!(tree.predict(&[0.5, 1.0]) < 0.5);
        let importances = tree.feature_importances();
        assert_eq!(importances, vec![0.0, 1.0]);
    }

    #[test]
    fn test_depth_zero_is_a_leaf() {
        let rows = [[0.0_f32], [1.0]];
        let samples = rows
            .iter()
            .zip([false, true])
            .map(|(row, win)| Sample {
                row,
                win,
                weight: 1.0,
            })
            .collect::<Vec<_>>();
        let params = TreeParams {
            max_depth: 0,
            ..params()
        };
        let tree = DecisionTree::fit(&samples, 1, &params, &mut Pcg64Mcg::seed_from_u64(0));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[1.0]), 0.5);
    }

    #[test]
    fn test_weights_shift_leaf_probability() {
        let rows = [[0.0_f32], [0.0]];
        let samples = [
            Sample {
                row: &rows[0],
                win: true,
                weight: 4.0,
            },
            Sample {
                row: &rows[1],
                win: false,
                weight: 2.0,
            },
        ];
        let tree = DecisionTree::fit(&samples, 1, &params(), &mut Pcg64Mcg::seed_from_u64(0));
        // identical rows cannot be split: (4 + 1) / (6 + 2)
        assert_eq!(tree.predict(&[0.0]), 0.625);
    }
}
