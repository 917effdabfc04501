use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How many candidate features are examined at each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    All,
    Sqrt,
    Log2,
    Count(usize),
}

impl MaxFeatures {
    pub fn resolve(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::Count(k) => k,
        };
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
        }
    }
}

// ---------------------------------------------------------------------------
// Tree structure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        /// Class distribution of the training samples that reached the leaf.
        proba: [f64; 2],
        samples: usize,
    },
    Split {
        feature: usize,
        /// Samples with `x[feature] <= threshold` go left.
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A CART classification tree grown on Gini impurity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
    /// Impurity decrease per feature, normalised to sum to 1 (all zero for a
    /// single-leaf tree).
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Grow a tree on the rows of `x` listed in `sample` (repeats allowed, as
    /// produced by bootstrapping).
    pub fn fit(
        x: &[Vec<f64>],
        y: &[u8],
        sample: Vec<usize>,
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        let mut builder = Builder {
            x,
            y,
            config,
            rng,
            n_features,
            nodes: Vec::new(),
            importances: vec![0.0; n_features],
        };
        builder.grow(sample, 0);

        let mut importances = builder.importances;
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|v| *v /= total);
        }
        DecisionTree {
            nodes: builder.nodes,
            n_features,
            importances,
        }
    }

    /// Class probabilities for one feature row.
    ///
    /// # Panics
    /// If `x` is shorter than the number of features the tree was fit on.
    pub fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { proba, .. } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    /// Structural sanity check used when loading an artifact.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.importances.len() == self.n_features
            && self.nodes.iter().enumerate().all(|(id, node)| match node {
                Node::Leaf { .. } => true,
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    *feature < self.n_features
                        && *left > id
                        && *right > id
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }
}

// ---------------------------------------------------------------------------
// Growing
// ---------------------------------------------------------------------------

struct Builder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [u8],
    config: &'a TreeConfig,
    rng: &'a mut StdRng,
    n_features: usize,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Sample-weighted child impurity: `n_left * gini_left + n_right * gini_right`.
    weighted_impurity: f64,
}

impl Builder<'_> {
    fn grow(&mut self, sample: Vec<usize>, depth: usize) -> usize {
        let counts = self.class_counts(&sample);
        let n = sample.len();
        let impurity = gini(counts);

        let depth_reached = self.config.max_depth.is_some_and(|d| depth >= d);
        let stop = n < self.config.min_samples_split
            || n < 2 * self.config.min_samples_leaf
            || impurity == 0.0
            || depth_reached;

        let best = if stop { None } else { self.best_split(&sample) };
        let Some(best) = best else {
            return self.push_leaf(counts);
        };

        self.importances[best.feature] += (n as f64 * impurity - best.weighted_impurity).max(0.0);

        let (left, right): (Vec<usize>, Vec<usize>) = sample
            .into_iter()
            .partition(|&i| self.x[i][best.feature] <= best.threshold);

        let id = self.nodes.len();
        // Placeholder, patched once both children exist.
        self.nodes.push(Node::Leaf {
            proba: [0.0; 2],
            samples: 0,
        });
        let left_id = self.grow(left, depth + 1);
        let right_id = self.grow(right, depth + 1);
        self.nodes[id] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: left_id,
            right: right_id,
        };
        id
    }

    fn push_leaf(&mut self, counts: [usize; 2]) -> usize {
        let total = (counts[0] + counts[1]).max(1) as f64;
        self.nodes.push(Node::Leaf {
            proba: [counts[0] as f64 / total, counts[1] as f64 / total],
            samples: counts[0] + counts[1],
        });
        self.nodes.len() - 1
    }

    fn class_counts(&self, sample: &[usize]) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for &i in sample {
            counts[self.y[i] as usize] += 1;
        }
        counts
    }

    /// Visit features in random order until `max_features` non-constant ones
    /// have been evaluated.
    fn best_split(&mut self, sample: &[usize]) -> Option<BestSplit> {
        let budget = self.config.max_features.resolve(self.n_features);
        let mut order: Vec<usize> = (0..self.n_features).collect();
        order.shuffle(&mut *self.rng);

        let min_leaf = self.config.min_samples_leaf.max(1);
        let n = sample.len();
        let mut best: Option<BestSplit> = None;
        let mut visited = 0;

        for feature in order {
            if visited >= budget {
                break;
            }
            let mut column: Vec<(f64, u8)> = sample
                .iter()
                .map(|&i| (self.x[i][feature], self.y[i]))
                .collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));
            if column[0].0 == column[n - 1].0 {
                continue;
            }
            visited += 1;

            let total = counts_of(&column);
            let mut left = [0usize; 2];
            for p in 1..n {
                left[column[p - 1].1 as usize] += 1;
                if column[p - 1].0 == column[p].0 || p < min_leaf || n - p < min_leaf {
                    continue;
                }
                let right = [total[0] - left[0], total[1] - left[1]];
                let weighted = p as f64 * gini(left) + (n - p) as f64 * gini(right);
                if best.as_ref().is_none_or(|b| weighted < b.weighted_impurity) {
                    let (lo, hi) = (column[p - 1].0, column[p].0);
                    let mut threshold = lo + (hi - lo) / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        weighted_impurity: weighted,
                    });
                }
            }
        }
        best
    }
}

fn counts_of(column: &[(f64, u8)]) -> [usize; 2] {
    let mut counts = [0usize; 2];
    for &(_, label) in column {
        counts[label as usize] += 1;
    }
    counts
}

fn gini(counts: [usize; 2]) -> f64 {
    let n = (counts[0] + counts[1]) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / n;
    let p1 = counts[1] as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fit_all(x: &[Vec<f64>], y: &[u8], config: &TreeConfig) -> DecisionTree {
        let mut rng = StdRng::seed_from_u64(0);
        DecisionTree::fit(x, y, (0..x.len()).collect(), config, &mut rng)
    }

    #[test]
    fn gini_of_pure_and_mixed_nodes() {
        assert_eq!(gini([4, 0]), 0.0);
        assert!((gini([2, 2]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn separable_data_is_fit_exactly() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 0.0]).collect();
        let y: Vec<u8> = (0..10).map(|i| u8::from(i >= 5)).collect();
        let config = TreeConfig {
            max_features: MaxFeatures::All,
            ..TreeConfig::default()
        };
        let tree = fit_all(&x, &y, &config);

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.predict_proba(&[2.0, 0.0]), [1.0, 0.0]);
        assert_eq!(tree.predict_proba(&[7.0, 0.0]), [0.0, 1.0]);
        // Threshold sits midway between 4 and 5.
        assert_eq!(tree.predict_proba(&[4.4, 0.0]), [1.0, 0.0]);
        assert_eq!(tree.importances(), &[1.0, 0.0]);
        assert!(tree.is_well_formed());
    }

    #[test]
    fn pure_node_becomes_single_leaf() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![0, 0, 0];
        let tree = fit_all(&x, &y, &TreeConfig::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.importances(), &[0.0]);
    }

    #[test]
    fn max_depth_limits_growth() {
        let x: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64]).collect();
        let y: Vec<u8> = (0..16).map(|i| (i % 2) as u8).collect();
        let config = TreeConfig {
            max_depth: Some(2),
            ..TreeConfig::default()
        };
        let tree = fit_all(&x, &y, &config);
        assert!(tree.depth() <= 2);
        let unlimited = fit_all(&x, &y, &TreeConfig::default());
        assert!(unlimited.depth() > 2);
    }

    #[test]
    fn min_samples_leaf_is_respected() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let mut y = vec![0u8; 10];
        y[9] = 1;
        let config = TreeConfig {
            min_samples_leaf: 3,
            ..TreeConfig::default()
        };
        let tree = fit_all(&x, &y, &config);
        for node in &tree.nodes {
            if let Node::Leaf { samples, .. } = node {
                assert!(*samples >= 3);
            }
        }
    }

    #[test]
    fn max_features_resolution() {
        assert_eq!(MaxFeatures::Sqrt.resolve(8), 2);
        assert_eq!(MaxFeatures::Log2.resolve(8), 3);
        assert_eq!(MaxFeatures::All.resolve(8), 8);
        assert_eq!(MaxFeatures::Count(20).resolve(8), 8);
        assert_eq!(MaxFeatures::Count(0).resolve(8), 1);
    }
}
