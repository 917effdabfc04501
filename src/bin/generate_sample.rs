//! Write a synthetic diabetes CSV in the layout the loader expects.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use diabetes_diagnosis::data::schema::COLUMN_NAMES;

#[derive(Parser, Debug)]
#[command(name = "generate_sample", about = "Generate a synthetic diabetes dataset")]
struct Args {
    /// Output CSV
    #[arg(long, default_value = "data/diabetes.csv")]
    output: PathBuf,
    /// Number of patient records
    #[arg(long, default_value_t = 768)]
    rows: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Add stacked headers and a ragged row, like hand-edited exports
    #[arg(long, default_value_t = false)]
    messy: bool,
}

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// One patient; the outcome is drawn from a logistic model of glucose, BMI,
/// pedigree and age.
fn patient(rng: &mut StdRng) -> [f64; 9] {
    let age = gauss(rng, 33.0, 11.0).clamp(21.0, 81.0).round();
    let pregnancies = gauss(rng, 3.8, 3.3).clamp(0.0, 17.0).round();
    let glucose = gauss(rng, 121.0, 32.0).clamp(44.0, 199.0).round();
    let blood_pressure = gauss(rng, 72.0, 12.0).clamp(24.0, 122.0).round();
    let skin = gauss(rng, 29.0, 10.0).clamp(7.0, 99.0).round();
    let insulin = if rng.random_bool(0.48) {
        0.0
    } else {
        gauss(rng, 150.0 + (glucose - 120.0) * 1.5, 90.0).clamp(14.0, 846.0).round()
    };
    let bmi = (gauss(rng, 32.0, 7.0).clamp(18.2, 67.1) * 10.0).round() / 10.0;
    let pedigree = (gauss(rng, 0.47, 0.33).clamp(0.078, 2.42) * 1000.0).round() / 1000.0;

    let logit = -8.4 + 0.035 * glucose + 0.09 * bmi + 0.9 * pedigree + 0.015 * age + 0.12 * pregnancies;
    let outcome = if rng.random_bool(sigmoid(logit)) { 1.0 } else { 0.0 };

    [
        pregnancies,
        glucose,
        blood_pressure,
        skin,
        insulin,
        bmi,
        pedigree,
        age,
        outcome,
    ]
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    if let Some(dir) = args.output.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let header_rows = if args.messy { 2 } else { 1 };
    for _ in 0..header_rows {
        writer.write_record(COLUMN_NAMES)?;
    }

    let mut positives = 0;
    for i in 0..args.rows {
        let record = patient(&mut rng);
        positives += record[8] as usize;
        writer.write_record(record.iter().map(|v| v.to_string()))?;
        if args.messy && i == args.rows / 2 {
            writer.write_record(["1", "89", "66"])?;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {} records ({positives} positive) to {}",
        args.rows,
        args.output.display()
    );
    Ok(())
}
