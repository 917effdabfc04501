use std::path::PathBuf;

use clap::Parser;

use crate::classifier::ForestConfig;
use crate::data::split::{DEFAULT_SEED, DEFAULT_TEST_SIZE};

pub const DEFAULT_DATA_PATH: &str = "data/diabetes.csv";
pub const DEFAULT_MODEL_PATH: &str = "models/model.json";
pub const DEFAULT_STATIC_DIR: &str = "static";

// ---------------------------------------------------------------------------
// Serving app
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "diabetes-diagnosis",
    about = "Interactive diabetes risk assessment",
    version
)]
pub struct ServeArgs {
    /// Reference dataset shown in the exploration view
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,
    /// Model artifact written by `train_model`
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
    /// Directory holding styles.json and images/
    #[arg(long, default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Trainer
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "train_model",
    about = "Train the diabetes random forest and save it to disk",
    version
)]
pub struct TrainArgs {
    /// Training CSV
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,
    /// Where to write the model artifact
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    pub test_size: f64,
    /// Seed for the split and the forest
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Number of trees
    #[arg(long, default_value_t = 100)]
    pub trees: usize,
    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Everything the training pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub test_size: f64,
    pub split_seed: u64,
    pub forest: ForestConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_size: DEFAULT_TEST_SIZE,
            split_seed: DEFAULT_SEED,
            forest: ForestConfig::default(),
        }
    }
}

impl From<TrainArgs> for TrainConfig {
    fn from(args: TrainArgs) -> Self {
        TrainConfig {
            data_path: args.data,
            model_path: args.model,
            test_size: args.test_size,
            split_seed: args.seed,
            forest: ForestConfig {
                n_estimators: args.trees,
                max_depth: args.max_depth,
                seed: args.seed,
                ..ForestConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_defaults_match_pipeline_defaults() {
        let args = TrainArgs::try_parse_from(["train_model"]).unwrap();
        assert_eq!(TrainConfig::from(args), TrainConfig::default());
    }

    #[test]
    fn train_flags_override_defaults() {
        let args = TrainArgs::try_parse_from([
            "train_model",
            "--data",
            "other.csv",
            "--trees",
            "10",
            "--max-depth",
            "4",
            "--seed",
            "7",
        ])
        .unwrap();
        let config = TrainConfig::from(args);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.forest.n_estimators, 10);
        assert_eq!(config.forest.max_depth, Some(4));
        assert_eq!(config.split_seed, 7);
        assert_eq!(config.forest.seed, 7);
    }

    #[test]
    fn serve_defaults() {
        let args = ServeArgs::try_parse_from(["diabetes-diagnosis"]).unwrap();
        assert_eq!(args.model, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(args.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
    }
}
