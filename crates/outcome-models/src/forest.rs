//! Random forest classifier: bootstrap-aggregated CART trees split on
//! class-weighted Gini impurity, predicting the mean of the trees' leaf
//! class distributions.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
    /// Weight per class; missing entries default to 1
    pub class_weights: Vec<f64>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_depth: 10,
            min_samples_split: 5,
            class_weights: vec![1.0, 1.0, 1.0],
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        probs: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn leaf_for(&self, row: &[f64]) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { probs } => return probs,
                Node::Split { feature, threshold, left, right } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    n_classes: usize,
    n_features: usize,
    trees: Vec<Node>,
}

struct TreeBuilder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    weights: &'a [f64],
    n_classes: usize,
    max_features: usize,
    max_depth: usize,
    min_samples_split: usize,
}

impl TreeBuilder<'_> {
    fn class_weights(&self, samples: &[usize]) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_classes];
        for &i in samples {
            totals[self.y[i]] += self.weights[i];
        }
        totals
    }

    fn leaf(totals: &[f64]) -> Node {
        let sum: f64 = totals.iter().sum();
        let probs = if sum > 0.0 {
            totals.iter().map(|t| t / sum).collect()
        } else {
            vec![1.0 / totals.len() as f64; totals.len()]
        };
        Node::Leaf { probs }
    }

    fn build(&self, samples: &mut [usize], depth: usize, rng: &mut StdRng) -> Node {
        let totals = self.class_weights(samples);
        let is_pure = totals.iter().filter(|&&t| t > 0.0).count() <= 1;
        if depth >= self.max_depth || samples.len() < self.min_samples_split || is_pure {
            return Self::leaf(&totals);
        }

        let Some((feature, threshold)) = self.best_split(samples, &totals, rng) else {
            return Self::leaf(&totals);
        };

        let mut cut = 0;
        for i in 0..samples.len() {
            if self.x[samples[i]][feature] <= threshold {
                samples.swap(i, cut);
                cut += 1;
            }
        }
        let (left, right) = samples.split_at_mut(cut);
        Node::Split {
            feature,
            threshold,
            left: Box::new(self.build(left, depth + 1, rng)),
            right: Box::new(self.build(right, depth + 1, rng)),
        }
    }

    /// Lowest weighted Gini over `max_features` randomly drawn features.
    /// Features constant within the node are skipped and do not count
    /// towards `max_features`.
    fn best_split(&self, samples: &[usize], totals: &[f64], rng: &mut StdRng) -> Option<(usize, f64)> {
        let n_features = self.x.first().map_or(0, Vec::len);
        let mut candidates: Vec<usize> = (0..n_features).collect();
        candidates.shuffle(rng);

        let total: f64 = totals.iter().sum();
        let mut best_score = total * gini(totals, total) - 1e-12;
        let mut best = None;

        let mut order = samples.to_vec();
        let mut evaluated = 0;
        for feature in candidates {
            if evaluated == self.max_features {
                break;
            }
            order.sort_by(|&a, &b| self.x[a][feature].total_cmp(&self.x[b][feature]));
            let (Some(&lo), Some(&hi)) = (order.first(), order.last()) else {
                break;
            };
            if self.x[lo][feature] >= self.x[hi][feature] {
                continue;
            }
            evaluated += 1;

            let mut left = vec![0.0; self.n_classes];
            let mut left_total = 0.0;
            for pair in order.windows(2) {
                let (i, next) = (pair[0], pair[1]);
                left[self.y[i]] += self.weights[i];
                left_total += self.weights[i];

                let (v, v_next) = (self.x[i][feature], self.x[next][feature]);
                if v >= v_next {
                    continue;
                }
                let right: Vec<f64> = totals.iter().zip(&left).map(|(t, l)| t - l).collect();
                let right_total = total - left_total;
                let score = left_total * gini(&left, left_total) + right_total * gini(&right, right_total);
                if score < best_score {
                    best_score = score;
                    best = Some((feature, v + (v_next - v) / 2.0));
                }
            }
        }
        best
    }
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}

impl RandomForest {
    pub fn fit(x: &[Vec<f64>], y: &[usize], n_classes: usize, params: ForestParams) -> Result<Self, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InsufficientData("no training rows".into()));
        }
        if x.len() != y.len() {
            return Err(ModelError::LabelCount { rows: x.len(), labels: y.len() });
        }
        let n_features = x[0].len();
        if let Some(bad) = x.iter().find(|r| r.len() != n_features) {
            return Err(ModelError::FeatureMismatch { expected: n_features, actual: bad.len() });
        }
        if let Some(&label) = y.iter().find(|&&l| l >= n_classes) {
            return Err(ModelError::InvalidLabel { label, classes: n_classes });
        }

        let weights: Vec<f64> = y
            .iter()
            .map(|&c| params.class_weights.get(c).copied().unwrap_or(1.0))
            .collect();
        let builder = TreeBuilder {
            x,
            y,
            weights: &weights,
            n_classes,
            max_features: ((n_features as f64).sqrt() as usize).max(1),
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split.max(2),
        };

        let mut rng = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_estimators.max(1))
            .map(|_| {
                let mut samples: Vec<usize> = (0..x.len()).map(|_| rng.random_range(0..x.len())).collect();
                builder.build(&mut samples, 0, &mut rng)
            })
            .collect::<Vec<_>>();
        debug!(trees = trees.len(), rows = x.len(), n_features, "Forest trained");

        Ok(Self { params, n_classes, n_features, trees })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureMismatch { expected: self.n_features, actual: row.len() });
        }
        let mut probs = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (p, leaf) in probs.iter_mut().zip(tree.leaf_for(row)) {
                *p += leaf;
            }
        }
        let n = self.trees.len() as f64;
        probs.iter_mut().for_each(|p| *p /= n);
        Ok(probs)
    }

    /// Most probable class; ties go to the lower class index.
    pub fn predict(&self, row: &[f64]) -> Result<usize, ModelError> {
        let probs = self.predict_proba(row)?;
        let mut best = 0;
        for (i, &p) in probs.iter().enumerate() {
            if p > probs[best] {
                best = i;
            }
        }
        Ok(best)
    }

    pub fn predict_all(&self, rows: &[Vec<f64>]) -> Result<Vec<usize>, ModelError> {
        rows.iter().map(|r| self.predict(r)).collect()
    }
}
