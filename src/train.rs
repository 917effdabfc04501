use crate::classifier::{save_model, RandomForest};
use crate::config::TrainConfig;
use crate::data::loader::load_data;
use crate::data::split::split_data;
use crate::error::TrainError;

/// Held-out half of the split, for evaluation by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSet {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub model: RandomForest,
    pub test: TestSet,
    /// Accuracy of `model` on `test`.
    pub test_accuracy: f64,
}

/// Load, split, fit and persist. Fails before writing anything if any stage
/// fails.
pub fn train_and_save(config: &TrainConfig) -> Result<TrainOutcome, TrainError> {
    log::info!("Loading data from {}", config.data_path.display());
    let data = load_data(&config.data_path)?;
    log::info!("Data loaded: {} rows, columns {:?}", data.len(), data.columns);

    let split = split_data(&data, config.test_size, config.split_seed)?;
    log::info!(
        "Split into {} training and {} test rows",
        split.train_len(),
        split.test_len()
    );

    log::info!("Training random forest ({} trees)", config.forest.n_estimators);
    let model = RandomForest::fit(
        config.forest.clone(),
        split.feature_names.clone(),
        &split.x_train,
        &split.y_train,
    )?;
    let test_accuracy = model.accuracy(&split.x_test, &split.y_test);
    log::info!("Held-out accuracy: {:.1}%", test_accuracy * 100.0);

    save_model(&model, &config.model_path).map_err(|source| TrainError::Save {
        path: config.model_path.clone(),
        source,
    })?;
    log::info!("Model successfully saved to {}", config.model_path.display());

    Ok(TrainOutcome {
        model,
        test: TestSet {
            x: split.x_test,
            y: split.y_test,
        },
        test_accuracy,
    })
}
