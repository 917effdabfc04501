use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Data loading
// ---------------------------------------------------------------------------

/// Malformed or schema-mismatched input file.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} contains no rows")]
    Empty { path: PathBuf },

    #[error("{path} contains no usable numeric rows")]
    NoDataRows { path: PathBuf },

    #[error("Expected {expected} columns, got {found}")]
    ColumnCount { expected: usize, found: usize },
}

// ---------------------------------------------------------------------------
// Schema / splitting
// ---------------------------------------------------------------------------

/// A dataset lacks a field an operation depends on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("dataset must contain '{column}' column")]
    MissingColumn { column: String },

    #[error("row {row}: outcome {value} is not a binary label (expected 0 or 1)")]
    NonBinaryLabel { row: usize, value: f64 },

    #[error("'{name}' is not a predictor column")]
    UnknownFeature { name: String },

    #[error("model was trained on {model:?} but the dataset has predictors {dataset:?}")]
    FeatureMismatch {
        model: Vec<String>,
        dataset: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("test size must lie strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),

    #[error("cannot split {rows} rows into {test} test rows and a non-empty training set")]
    TooFewRows { rows: usize, test: usize },
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("empty training set")]
    Empty,

    #[error("{rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("row {row} has {found} features, expected {expected}")]
    FeatureCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Persisted artifact missing or corrupt.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("reading model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {path} has format version {found}, expected {expected}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("model artifact {path} is structurally invalid")]
    Untrained { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Training pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("loading training data: {0}")]
    Data(#[from] DataFormatError),

    #[error("splitting training data: {0}")]
    Split(#[from] SplitError),

    #[error("fitting classifier: {0}")]
    Fit(#[from] FitError),

    #[error("saving model to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Static assets
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("static asset {path} not found: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stylesheet {path} is invalid: {source}")]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("image {path} could not be decoded: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_names_actual_count() {
        let err = DataFormatError::ColumnCount {
            expected: 9,
            found: 7,
        };
        assert_eq!(err.to_string(), "Expected 9 columns, got 7");
    }

    #[test]
    fn schema_error_converts_into_split_error() {
        let err: SplitError = SchemaError::MissingColumn {
            column: "Outcome".into(),
        }
        .into();
        assert_eq!(err.to_string(), "dataset must contain 'Outcome' column");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataFormatError>();
        assert_send_sync::<ModelLoadError>();
        assert_send_sync::<TrainError>();
        assert_send_sync::<AssetError>();
    }
}
