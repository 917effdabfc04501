use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;

use diabetes_diagnosis::app::DiagnosisApp;
use diabetes_diagnosis::assets::load_static_assets;
use diabetes_diagnosis::config::ServeArgs;
use diabetes_diagnosis::resources::AppResources;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ServeArgs::parse();

    let assets = load_static_assets(&args.static_dir).context("loading static assets")?;
    let resources = AppResources::from_paths(args.model, args.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Diabetes Diagnosis")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Diabetes Diagnosis",
        options,
        Box::new(move |cc| Ok(Box::new(DiagnosisApp::new(cc, resources, assets)))),
    )
    .map_err(|e| anyhow!("running diagnosis app: {e}"))
}
