use crate::classifier::{Classifier, NamedImportance, RandomForest};
use crate::data::schema::{Feature, FEATURE_COUNT};
use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Prediction request
// ---------------------------------------------------------------------------

/// One patient's eight predictor values, each within its form bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientMeasurements {
    values: [f64; FEATURE_COUNT],
}

impl Default for PatientMeasurements {
    fn default() -> Self {
        Self {
            values: Feature::ALL.map(|f| f.bounds().default),
        }
    }
}

impl PatientMeasurements {
    /// Build from raw form values in [`Feature::ALL`] order, clamping each.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        let mut m = Self { values };
        for f in Feature::ALL {
            m.values[f.index()] = f.bounds().clamp(values[f.index()]);
        }
        m
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// Feature row in model input order.
    pub fn as_row(&self) -> &[f64] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// Prediction result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub label: u8,
    /// `(p_negative, p_positive)`.
    pub probabilities: [f64; 2],
}

impl Assessment {
    pub fn risk(&self) -> RiskLevel {
        if self.label == 1 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Probability of the predicted class.
    pub fn confidence(&self) -> f64 {
        self.probabilities[usize::from(self.label == 1)]
    }

    pub fn headline(&self) -> String {
        let pct = format_percent(self.confidence());
        match self.risk() {
            RiskLevel::High => format!("High Risk ({pct} probability)"),
            RiskLevel::Low => format!("Low Risk ({pct} probability)"),
        }
    }

    pub fn advice(&self) -> &'static str {
        match self.risk() {
            RiskLevel::High => "Recommend consultation with a healthcare provider",
            RiskLevel::Low => "Maintain healthy lifestyle with regular checkups",
        }
    }
}

/// `0.734` → `"73.4%"`.
pub fn format_percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

pub fn assess<C: Classifier>(model: &C, patient: &PatientMeasurements) -> Assessment {
    Assessment {
        label: model.predict(patient.as_row()),
        probabilities: model.predict_proba(patient.as_row()),
    }
}

// ---------------------------------------------------------------------------
// Feature alignment
// ---------------------------------------------------------------------------

/// Check that the model's inputs are the form's features, in form order, and
/// that the dataset names the same predictors. Returns the importances keyed
/// by feature.
pub fn feature_mapping(
    model: &RandomForest,
    dataset_predictors: &[&str],
) -> Result<Vec<(Feature, NamedImportance)>, SchemaError> {
    let model_names = model.feature_names();
    let form_order = Feature::ALL.iter().map(|f| f.column_name());
    let matches_form = model_names.len() == FEATURE_COUNT
        && model_names.iter().map(String::as_str).eq(form_order);
    let matches_dataset = model_names.iter().map(String::as_str).eq(dataset_predictors.iter().copied());

    if !matches_form || !matches_dataset {
        return Err(SchemaError::FeatureMismatch {
            model: model_names.to_vec(),
            dataset: dataset_predictors.iter().map(|s| s.to_string()).collect(),
        });
    }
    Ok(Feature::ALL.into_iter().zip(model.named_importances()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ForestConfig;
    use crate::data::schema::COLUMN_NAMES;

    struct Fixed([f64; 2]);

    impl Classifier for Fixed {
        fn predict_proba(&self, _x: &[f64]) -> [f64; 2] {
            self.0
        }
        fn feature_importances(&self) -> &[f64] {
            &[]
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let m = PatientMeasurements::new([25.0, 350.0, 70.0, 20.0, 80.0, 25.04, 0.5, -3.0]);
        assert_eq!(m.get(Feature::Pregnancies), 20.0);
        assert_eq!(m.get(Feature::Glucose), 300.0);
        assert_eq!(m.get(Feature::Bmi), 25.04);
        assert_eq!(m.get(Feature::Age), 0.0);
    }

    #[test]
    fn default_patient_uses_form_defaults() {
        let m = PatientMeasurements::default();
        assert_eq!(m.as_row(), &[1.0, 100.0, 70.0, 20.0, 80.0, 25.0, 0.5, 30.0]);
    }

    #[test]
    fn high_risk_wording() {
        let a = assess(&Fixed([0.27, 0.73]), &PatientMeasurements::default());
        assert_eq!(a.risk(), RiskLevel::High);
        assert_eq!(a.headline(), "High Risk (73.0% probability)");
        assert_eq!(a.advice(), "Recommend consultation with a healthcare provider");
    }

    #[test]
    fn low_risk_wording() {
        let a = assess(&Fixed([0.915, 0.085]), &PatientMeasurements::default());
        assert_eq!(a.risk(), RiskLevel::Low);
        assert_eq!(a.headline(), "Low Risk (91.5% probability)");
        assert_eq!(a.advice(), "Maintain healthy lifestyle with regular checkups");
    }

    #[test]
    fn tie_is_low_risk() {
        let a = assess(&Fixed([0.5, 0.5]), &PatientMeasurements::default());
        assert_eq!(a.label, 0);
        assert_eq!(a.headline(), "Low Risk (50.0% probability)");
    }

    fn forest_with(names: Vec<String>) -> RandomForest {
        let x: Vec<Vec<f64>> = (0..12)
            .map(|i| (0..names.len()).map(|c| (i * (c + 1)) as f64).collect())
            .collect();
        let y: Vec<u8> = (0..12).map(|i| u8::from(i >= 6)).collect();
        let config = ForestConfig {
            n_estimators: 3,
            ..ForestConfig::default()
        };
        RandomForest::fit(config, names, &x, &y).unwrap()
    }

    #[test]
    fn mapping_pairs_features_with_importances() {
        let names: Vec<String> = COLUMN_NAMES[..8].iter().map(|s| s.to_string()).collect();
        let model = forest_with(names);
        let mapping = feature_mapping(&model, &COLUMN_NAMES[..8]).unwrap();
        assert_eq!(mapping.len(), 8);
        assert_eq!(mapping[1].0, Feature::Glucose);
        assert_eq!(mapping[1].1.feature, "Glucose");
    }

    #[test]
    fn mapping_rejects_reordered_model() {
        let mut names: Vec<String> = COLUMN_NAMES[..8].iter().map(|s| s.to_string()).collect();
        names.swap(0, 1);
        let model = forest_with(names);
        assert!(matches!(
            feature_mapping(&model, &COLUMN_NAMES[..8]),
            Err(SchemaError::FeatureMismatch { .. })
        ));
    }
}
