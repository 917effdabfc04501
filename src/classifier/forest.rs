use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, MaxFeatures, TreeConfig};
use super::{Classifier, NamedImportance};
use crate::error::FitError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    /// Grow each tree on a bootstrap resample of the training rows.
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
            min_samples_leaf: self.min_samples_leaf.max(1),
            max_features: self.max_features,
        }
    }
}

/// Bagged ensemble of Gini decision trees for binary outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    /// Predictor names in input order; the model is only meaningful for rows
    /// laid out the same way.
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
}

impl RandomForest {
    pub fn fit(
        config: ForestConfig,
        feature_names: Vec<String>,
        x: &[Vec<f64>],
        y: &[u8],
    ) -> Result<Self, FitError> {
        if x.is_empty() {
            return Err(FitError::Empty);
        }
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                rows: x.len(),
                labels: y.len(),
            });
        }
        let expected = feature_names.len();
        if let Some((row, r)) = x.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(FitError::FeatureCount {
                row,
                expected,
                found: r.len(),
            });
        }

        let tree_config = config.tree_config();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let n = x.len();
        let trees: Vec<DecisionTree> = (0..config.n_estimators.max(1))
            .map(|_| {
                let mut tree_rng = StdRng::seed_from_u64(rng.random());
                let sample: Vec<usize> = if config.bootstrap {
                    (0..n).map(|_| tree_rng.random_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::fit(x, y, sample, &tree_config, &mut tree_rng)
            })
            .collect();

        let importances = average_importances(&trees, expected);
        log::debug!(
            "Fitted {} trees on {n} rows, mean depth {:.1}",
            trees.len(),
            trees.iter().map(|t| t.depth() as f64).sum::<f64>() / trees.len() as f64
        );

        Ok(RandomForest {
            config,
            feature_names,
            trees,
            importances,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Importances paired with the predictor they belong to.
    pub fn named_importances(&self) -> Vec<NamedImportance> {
        self.feature_names
            .iter()
            .zip(&self.importances)
            .map(|(name, &importance)| NamedImportance {
                feature: name.clone(),
                importance,
            })
            .collect()
    }

    /// Fraction of rows whose predicted label matches `y`.
    pub fn accuracy(&self, x: &[Vec<f64>], y: &[u8]) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let hits = x
            .iter()
            .zip(y)
            .filter(|&(row, &label)| self.predict(row) == label)
            .count();
        hits as f64 / x.len() as f64
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        let n = self.feature_names.len();
        !self.trees.is_empty()
            && self.importances.len() == n
            && self
                .trees
                .iter()
                .all(|t| t.n_features() == n && t.is_well_formed())
    }
}

impl Classifier for RandomForest {
    /// Mean of the per-tree leaf distributions.
    fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let p = tree.predict_proba(x);
            sum[0] += p[0];
            sum[1] += p[1];
        }
        let n = self.trees.len().max(1) as f64;
        [sum[0] / n, sum[1] / n]
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

/// Mean of the per-tree importances over trees that split at least once,
/// renormalised to sum to 1.
fn average_importances(trees: &[DecisionTree], n_features: usize) -> Vec<f64> {
    let mut mean = vec![0.0; n_features];
    let split_trees: Vec<&DecisionTree> = trees.iter().filter(|t| t.node_count() > 1).collect();
    if split_trees.is_empty() {
        return mean;
    }
    for tree in &split_trees {
        for (m, v) in mean.iter_mut().zip(tree.importances()) {
            *m += v;
        }
    }
    let total: f64 = mean.iter().sum();
    if total > 0.0 {
        mean.iter_mut().for_each(|m| *m /= total);
    }
    mean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    /// Label depends on feature 1 only; feature 0 is noise.
    fn threshold_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let x: Vec<Vec<f64>> = (0..60)
            .map(|i| vec![((i * 7) % 13) as f64, i as f64])
            .collect();
        let y = (0..60).map(|i| u8::from(i >= 30)).collect();
        (x, y)
    }

    #[test]
    fn learns_a_threshold() {
        let (x, y) = threshold_data();
        let config = ForestConfig {
            n_estimators: 25,
            ..ForestConfig::default()
        };
        let forest = RandomForest::fit(config, names(2), &x, &y).unwrap();
        assert_eq!(forest.n_trees(), 25);
        assert!(forest.accuracy(&x, &y) > 0.95);
        assert_eq!(forest.predict(&[3.0, 5.0]), 0);
        assert_eq!(forest.predict(&[3.0, 55.0]), 1);

        let importances = forest.feature_importances();
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importances[1] > importances[0]);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (x, y) = threshold_data();
        let forest = RandomForest::fit(ForestConfig::default(), names(2), &x, &y).unwrap();
        for row in &x {
            let p = forest.predict_proba(row);
            assert!((p[0] + p[1] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = threshold_data();
        let a = RandomForest::fit(ForestConfig::default(), names(2), &x, &y).unwrap();
        let b = RandomForest::fit(ForestConfig::default(), names(2), &x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn named_importances_follow_feature_names() {
        let (x, y) = threshold_data();
        let forest = RandomForest::fit(ForestConfig::default(), names(2), &x, &y).unwrap();
        let named = forest.named_importances();
        assert_eq!(named.len(), 2);
        assert_eq!(named[1].feature, "f1");
        assert_eq!(named[1].importance, forest.feature_importances()[1]);
    }

    #[test]
    fn single_class_has_zero_importances() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1, 1, 1];
        let forest = RandomForest::fit(ForestConfig::default(), names(1), &x, &y).unwrap();
        assert_eq!(forest.feature_importances(), &[0.0]);
        assert_eq!(forest.predict_proba(&[2.0]), [0.0, 1.0]);
    }

    #[test]
    fn rejects_malformed_training_input() {
        let config = ForestConfig::default();
        assert_eq!(
            RandomForest::fit(config.clone(), names(1), &[], &[]),
            Err(FitError::Empty)
        );
        assert_eq!(
            RandomForest::fit(config.clone(), names(1), &[vec![1.0]], &[0, 1]),
            Err(FitError::LengthMismatch { rows: 1, labels: 2 })
        );
        assert_eq!(
            RandomForest::fit(config, names(2), &[vec![1.0]], &[0]),
            Err(FitError::FeatureCount {
                row: 0,
                expected: 2,
                found: 1
            })
        );
    }
}
