use eframe::egui::{self, Color32, RichText, Ui};

use crate::assets::Textures;
use crate::resources::AppResources;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, textures: &Textures) {
    // ---- Logo (centered) ----
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::from_texture(egui::load::SizedTexture::from_handle(&textures.logo))
                .max_width(ui.available_width() * 0.8)
                .max_height(120.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Navigation");
    ui.separator();

    ui.label("Choose section");
    let mut selected = state.view;
    for view in View::ALL {
        ui.radio_value(&mut selected, view, view.title());
    }
    state.navigate(selected);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState, resources: &AppResources) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("AI Diabetes Diagnosis");
        ui.separator();

        if resources.dataset.is_initialised() {
            if let Ok(ds) = resources.dataset.get() {
                ui.label(format!("{} reference records", ds.len()));
                ui.separator();
            }
        }
        if let Ok(model) = resources.model.get() {
            ui.label(format!("Model: {} trees", model.n_trees()));
        } else {
            ui.label(RichText::new("Model unavailable").color(Color32::RED));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
