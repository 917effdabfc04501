use eframe::egui;

use crate::assets::{StaticAssets, Stylesheet, Textures};
use crate::resources::AppResources;
use crate::state::{AppState, View};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DiagnosisApp {
    pub state: AppState,
    resources: AppResources,
    stylesheet: Stylesheet,
    textures: Textures,
}

impl DiagnosisApp {
    pub fn new(cc: &eframe::CreationContext<'_>, resources: AppResources, assets: StaticAssets) -> Self {
        assets.stylesheet.apply(&cc.egui_ctx);
        let textures = Textures::upload(&cc.egui_ctx, &assets);

        // Load both resources up front.
        if let Err(e) = resources.model.get() {
            log::error!("Model unavailable: {e}");
        }
        if let Err(e) = resources.dataset.get() {
            log::error!("Reference dataset unavailable: {e}");
        }

        Self {
            state: AppState::default(),
            resources,
            stylesheet: assets.stylesheet,
            textures,
        }
    }
}

impl eframe::App for DiagnosisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.resources);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.textures);
            });

        // ---- Central panel: active view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Home => views::home(ui, &self.textures),
            View::Exploration => match self.resources.dataset.get() {
                Ok(dataset) => views::exploration(ui, &mut self.state, dataset),
                Err(e) => views::load_error(ui, "dataset", e),
            },
            View::Diagnosis => match (self.resources.model.get(), self.resources.dataset.get()) {
                (Ok(model), Ok(dataset)) => {
                    views::diagnosis(ui, &mut self.state, model, dataset, &self.stylesheet)
                }
                (Err(e), _) => views::load_error(ui, "model", e),
                (_, Err(e)) => views::load_error(ui, "dataset", e),
            },
        });
    }
}
