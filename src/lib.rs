//! Diabetes risk assessment.
//!
//! Cleans a (possibly messy) diabetes CSV, trains a random forest on a
//! stratified split, and serves an egui form that reports a patient's risk
//! with the model's contributing factors.

pub mod app;
pub mod assets;
pub mod classifier;
pub mod color;
pub mod config;
pub mod data;
pub mod diagnosis;
pub mod error;
pub mod resources;
pub mod state;
pub mod stats;
pub mod train;
pub mod ui;
pub mod viz;

pub use classifier::{Classifier, RandomForest};
pub use data::loader::load_data;
pub use data::model::Dataset;
pub use data::split::{split_data, Split};
pub use error::{DataFormatError, ModelLoadError, SchemaError, SplitError, TrainError};
