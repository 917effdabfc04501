use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::model::Dataset;
use super::schema::OUTCOME;
use crate::error::{SchemaError, SplitError};

pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

/// A stratified train/test partition of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Predictor names, in the column order of every feature row.
    pub feature_names: Vec<String>,
    pub x_train: Vec<Vec<f64>>,
    pub x_test: Vec<Vec<f64>>,
    pub y_train: Vec<u8>,
    pub y_test: Vec<u8>,
    /// Source row index of each training row.
    pub train_indices: Vec<usize>,
    /// Source row index of each test row.
    pub test_indices: Vec<usize>,
}

impl Split {
    pub fn train_len(&self) -> usize {
        self.y_train.len()
    }

    pub fn test_len(&self) -> usize {
        self.y_test.len()
    }
}

/// Partition `dataset` into train and test halves, preserving the outcome
/// proportions in both. The same dataset and seed always give the same split.
pub fn split_data(dataset: &Dataset, test_size: f64, seed: u64) -> Result<Split, SplitError> {
    let outcome_idx = dataset
        .column_index(OUTCOME)
        .ok_or_else(|| SchemaError::MissingColumn {
            column: OUTCOME.to_string(),
        })?;
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let labels = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(row, r)| label_of(r[outcome_idx], row))
        .collect::<Result<Vec<u8>, SchemaError>>()?;

    let n = labels.len();
    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(SplitError::TooFewRows {
            rows: n,
            test: n_test,
        });
    }

    let mut by_class: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (i, &label) in labels.iter().enumerate() {
        by_class[label as usize].push(i);
    }

    let quotas = allocate_test_quota(&[by_class[0].len(), by_class[1].len()], n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_indices = Vec::with_capacity(n - n_test);
    let mut test_indices = Vec::with_capacity(n_test);
    for (members, quota) in by_class.iter_mut().zip(quotas) {
        members.shuffle(&mut rng);
        test_indices.extend_from_slice(&members[..quota]);
        train_indices.extend_from_slice(&members[quota..]);
    }
    train_indices.shuffle(&mut rng);
    test_indices.shuffle(&mut rng);

    let features = |idx: usize| -> Vec<f64> {
        dataset.rows[idx]
            .iter()
            .enumerate()
            .filter(|(c, _)| *c != outcome_idx)
            .map(|(_, v)| *v)
            .collect()
    };

    Ok(Split {
        feature_names: dataset
            .predictor_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        x_train: train_indices.iter().map(|&i| features(i)).collect(),
        x_test: test_indices.iter().map(|&i| features(i)).collect(),
        y_train: train_indices.iter().map(|&i| labels[i]).collect(),
        y_test: test_indices.iter().map(|&i| labels[i]).collect(),
        train_indices,
        test_indices,
    })
}

fn label_of(value: f64, row: usize) -> Result<u8, SchemaError> {
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        Err(SchemaError::NonBinaryLabel { row, value })
    }
}

/// Distribute `n_test` test slots over classes proportionally to their size
/// using largest remainders; ties go to the larger class.
fn allocate_test_quota(class_sizes: &[usize], n_test: usize) -> Vec<usize> {
    let total: usize = class_sizes.iter().sum();
    let exact: Vec<f64> = class_sizes
        .iter()
        .map(|&c| n_test as f64 * c as f64 / total as f64)
        .collect();
    let mut quotas: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut order: Vec<usize> = (0..class_sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
            .then(class_sizes[b].cmp(&class_sizes[a]))
            .then(a.cmp(&b))
    });

    let mut remaining = n_test - quotas.iter().sum::<usize>();
    for &class in order.iter().cycle().take(order.len() * 2) {
        if remaining == 0 {
            break;
        }
        if quotas[class] < class_sizes[class] {
            quotas[class] += 1;
            remaining -= 1;
        }
    }
    quotas
}
