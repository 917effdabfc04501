//! Offline trainer: fit the random forest on the diabetes CSV and write the
//! model artifact the diagnosis app loads.

use anyhow::{Context, Result};
use clap::Parser;

use diabetes_diagnosis::config::{TrainArgs, TrainConfig};
use diabetes_diagnosis::train::train_and_save;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::from(TrainArgs::parse());
    let outcome = train_and_save(&config).context("Error during training")?;

    println!(
        "Trained {} trees on {}; held-out accuracy {:.1}% over {} rows",
        outcome.model.n_trees(),
        config.data_path.display(),
        outcome.test_accuracy * 100.0,
        outcome.test.y.len()
    );
    Ok(())
}
