//! Random forest classifier and its on-disk artifact.

pub mod forest;
pub mod persist;
pub mod tree;

pub use forest::{ForestConfig, RandomForest};
pub use persist::{load_model, save_model};
pub use tree::MaxFeatures;

/// A trained binary classifier over fixed-width feature rows.
pub trait Classifier {
    /// `(p0, p1)` for one feature row.
    fn predict_proba(&self, x: &[f64]) -> [f64; 2];

    /// Per-feature influence, positionally aligned with the training columns.
    fn feature_importances(&self) -> &[f64];

    /// Most probable label; ties resolve to 0.
    fn predict(&self, x: &[f64]) -> u8 {
        let p = self.predict_proba(x);
        u8::from(p[1] > p[0])
    }
}

/// One predictor's importance, carried together with its name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedImportance {
    pub feature: String,
    pub importance: f64,
}
