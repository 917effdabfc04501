use crate::classifier::RandomForest;
use crate::data::model::Dataset;
use crate::data::schema::{Feature, FEATURE_COUNT};
use crate::diagnosis::{assess, feature_mapping, Assessment, PatientMeasurements};
use crate::error::SchemaError;
use crate::viz::{importance_chart, ImportanceChart};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Exploration,
    Diagnosis,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Exploration, View::Diagnosis];

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Exploration => "Data Exploration",
            View::Diagnosis => "Diagnosis",
        }
    }
}

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisOutcome {
    pub assessment: Assessment,
    pub importances: ImportanceChart,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub view: View,

    /// Exploration: show the raw table.
    pub show_raw_data: bool,

    /// Exploration: feature for the distribution chart.
    pub selected_feature: Feature,

    /// Diagnosis: values bound to the form widgets, in [`Feature::ALL`] order.
    pub form: [f64; FEATURE_COUNT],

    /// Diagnosis: outcome of the last submission.
    pub outcome: Option<DiagnosisOutcome>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Home,
            show_raw_data: false,
            selected_feature: Feature::Glucose,
            form: Feature::ALL.map(|f| f.bounds().default),
            outcome: None,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            log::debug!("Switching to {} view", view.title());
            self.view = view;
            self.status_message = None;
        }
    }

    /// Handle the "Assess Risk" button: predict for the current form values.
    pub fn submit_diagnosis(&mut self, model: &RandomForest, dataset: &Dataset) {
        match diagnose(model, dataset, &self.form) {
            Ok(outcome) => {
                log::info!(
                    "Assessment: label {} with p = {:.3}",
                    outcome.assessment.label,
                    outcome.assessment.confidence()
                );
                self.outcome = Some(outcome);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Diagnosis failed: {e}");
                self.outcome = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn reset_form(&mut self) {
        self.form = Feature::ALL.map(|f| f.bounds().default);
        self.outcome = None;
    }
}

/// Predict for raw form values and pair the result with the model's
/// importances.
pub fn diagnose(
    model: &RandomForest,
    dataset: &Dataset,
    form: &[f64; FEATURE_COUNT],
) -> Result<DiagnosisOutcome, SchemaError> {
    let mapping = feature_mapping(model, &dataset.predictor_names())?;
    let patient = PatientMeasurements::new(*form);
    let named: Vec<_> = mapping.into_iter().map(|(_, importance)| importance).collect();
    Ok(DiagnosisOutcome {
        assessment: assess(model, &patient),
        importances: importance_chart(&named),
    })
}
