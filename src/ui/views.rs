use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use super::plot;
use crate::assets::{Stylesheet, Textures};
use crate::classifier::RandomForest;
use crate::data::model::Dataset;
use crate::data::schema::Feature;
use crate::diagnosis::{format_percent, RiskLevel};
use crate::state::AppState;
use crate::viz;

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui, textures: &Textures) {
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.add(
            egui::Image::from_texture(egui::load::SizedTexture::from_handle(&textures.logo))
                .max_width(200.0),
        );
        ui.heading("AI-Powered Diabetes Diagnosis System");
        ui.add_space(8.0);
        ui.add(
            egui::Image::from_texture(egui::load::SizedTexture::from_handle(&textures.banner))
                .max_width(ui.available_width()),
        );
        ui.add_space(12.0);

        ui.label(RichText::new("About This System").strong().size(20.0));
        ui.label(
            "This system helps healthcare professionals assess diabetes risk using machine learning.",
        );
        ui.add_space(6.0);
        ui.label(RichText::new("Features:").strong());
        for (name, text) in [
            ("Data Exploration", "Visualize diabetes dataset"),
            ("Patient Diagnosis", "Get instant risk assessment"),
            ("Model Insights", "Understand prediction factors"),
        ] {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("•");
                ui.label(RichText::new(name).strong());
                ui.label(format!(": {text}"));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Data exploration
// ---------------------------------------------------------------------------

pub fn exploration(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("Data Exploration");
        ui.checkbox(&mut state.show_raw_data, "Show Raw Data");
        if state.show_raw_data {
            raw_table(ui, dataset);
        }
        ui.separator();

        ui.label(RichText::new("Data Visualization").strong().size(18.0));
        let features = dataset.features();
        if !features.contains(&state.selected_feature) {
            if let Some(first) = features.first() {
                state.selected_feature = *first;
            }
        }
        egui::ComboBox::from_label("Select feature")
            .selected_text(state.selected_feature.column_name())
            .show_ui(ui, |ui: &mut Ui| {
                for feature in &features {
                    ui.selectable_value(&mut state.selected_feature, *feature, feature.column_name());
                }
            });

        match viz::distribution_chart(dataset, state.selected_feature.column_name()) {
            Ok(chart) => plot::distribution_plot(ui, &chart),
            Err(e) => {
                ui.colored_label(egui::Color32::RED, format!("Error: {e}"));
            }
        }
        ui.separator();

        ui.label(RichText::new("Correlation Matrix").strong().size(18.0));
        plot::correlation_plot(ui, &viz::correlation_heatmap(dataset));
    });
}

fn raw_table(ui: &mut Ui, dataset: &Dataset) {
    ui.push_id("raw_data", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(260.0)
            .columns(Column::auto().at_least(60.0), dataset.column_count())
            .header(20.0, |mut header| {
                for name in &dataset.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, dataset.len(), |mut row| {
                    let values = &dataset.rows[row.index()];
                    for v in values {
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{v}"));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

pub fn diagnosis(
    ui: &mut Ui,
    state: &mut AppState,
    model: &RandomForest,
    dataset: &Dataset,
    style: &Stylesheet,
) {
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("Patient Diabetes Risk Assessment");
        ui.add_space(6.0);

        ui.group(|ui: &mut Ui| {
            ui.columns(2, |cols| {
                for (i, feature) in Feature::ALL.iter().enumerate() {
                    let ui = &mut cols[i / 4];
                    form_field(ui, *feature, &mut state.form[feature.index()]);
                }
            });
            ui.add_space(6.0);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Assess Risk").clicked() {
                    state.submit_diagnosis(model, dataset);
                }
                if ui.button("Reset").clicked() {
                    state.reset_form();
                }
            });
        });

        let Some(outcome) = &state.outcome else {
            return;
        };
        ui.add_space(10.0);

        let a = &outcome.assessment;
        let color = match a.risk() {
            RiskLevel::High => style.high_risk(),
            RiskLevel::Low => style.low_risk(),
        };
        egui::Frame::group(ui.style())
            .fill(color.linear_multiply(0.12))
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(a.headline()).color(color).strong().size(20.0));
                ui.label(a.advice());
                ui.label(format!(
                    "P(negative) = {}, P(positive) = {}",
                    format_percent(a.probabilities[0]),
                    format_percent(a.probabilities[1])
                ));
            });

        ui.add_space(10.0);
        ui.label(RichText::new("Key Contributing Factors").strong().size(18.0));
        plot::importance_plot(ui, &outcome.importances, style.accent());
    });
}

fn form_field(ui: &mut Ui, feature: Feature, value: &mut f64) {
    let b = feature.bounds();
    ui.label(feature.label());
    ui.add(
        egui::DragValue::new(value)
            .range(b.min..=b.max)
            .speed(b.step)
            .fixed_decimals(b.decimals()),
    );
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

/// Full-panel message for a resource that failed to load.
pub fn load_error(ui: &mut Ui, what: &str, error: &dyn std::error::Error) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("Could not load the {what}:\n{error}"))
                .color(egui::Color32::RED)
                .size(16.0),
        );
    });
}
