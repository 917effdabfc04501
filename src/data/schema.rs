use std::fmt;

// ---------------------------------------------------------------------------
// Fixed column layout of the diabetes dataset
// ---------------------------------------------------------------------------

/// Name of the binary label column.
pub const OUTCOME: &str = "Outcome";

/// Number of columns in a clean dataset (eight predictors + outcome).
pub const COLUMN_COUNT: usize = 9;

/// Number of predictor columns.
pub const FEATURE_COUNT: usize = 8;

/// Positional column names, assigned to headerless input.
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
    OUTCOME,
];

/// One of the eight predictor measurements, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigree,
    Age,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Pregnancies,
        Feature::Glucose,
        Feature::BloodPressure,
        Feature::SkinThickness,
        Feature::Insulin,
        Feature::Bmi,
        Feature::DiabetesPedigree,
        Feature::Age,
    ];

    /// Position of the feature in a record (and in the model's input vector).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the dataset.
    pub fn column_name(self) -> &'static str {
        COLUMN_NAMES[self.index()]
    }

    pub fn from_column_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.column_name() == name)
    }

    /// Label shown next to the form input.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Pregnancies => "Pregnancies",
            Feature::Glucose => "Glucose (mg/dL)",
            Feature::BloodPressure => "Blood Pressure (mm Hg)",
            Feature::SkinThickness => "Skin Thickness (mm)",
            Feature::Insulin => "Insulin (mu U/ml)",
            Feature::Bmi => "BMI",
            Feature::DiabetesPedigree => "Diabetes Pedigree",
            Feature::Age => "Age",
        }
    }

    /// Clinically plausible input range for the diagnosis form.
    pub fn bounds(self) -> InputBounds {
        match self {
            Feature::Pregnancies => InputBounds::integer(0.0, 20.0, 1.0),
            Feature::Glucose => InputBounds::integer(0.0, 300.0, 100.0),
            Feature::BloodPressure => InputBounds::integer(0.0, 150.0, 70.0),
            Feature::SkinThickness => InputBounds::integer(0.0, 100.0, 20.0),
            Feature::Insulin => InputBounds::integer(0.0, 900.0, 80.0),
            Feature::Bmi => InputBounds::decimal(0.0, 70.0, 25.0, 0.1),
            Feature::DiabetesPedigree => InputBounds::decimal(0.0, 3.0, 0.5, 0.01),
            Feature::Age => InputBounds::integer(0.0, 120.0, 30.0),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// InputBounds – range of one form widget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    /// Whole numbers only (counts, mg/dL, years).
    pub integer: bool,
}

impl InputBounds {
    const fn integer(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            step: 1.0,
            integer: true,
        }
    }

    const fn decimal(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max,
            default,
            step,
            integer: false,
        }
    }

    /// Digits shown after the decimal point in the form widget.
    pub fn decimals(&self) -> usize {
        if self.integer || self.step >= 1.0 {
            0
        } else {
            (-self.step.log10()).round().max(0.0) as usize
        }
    }

    /// Clamp a value into range, rounding integer fields. NaN maps to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        let v = value.clamp(self.min, self.max);
        if self.integer {
            v.round()
        } else {
            v
        }
    }
}
