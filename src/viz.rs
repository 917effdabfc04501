//! Chart data for the exploration and diagnosis views.
//!
//! Each helper is a pure function from already-validated numbers to a chart
//! description; drawing happens in [`crate::ui::plot`].

use crate::classifier::NamedImportance;
use crate::data::model::Dataset;
use crate::data::schema::OUTCOME;
use crate::error::SchemaError;
use crate::stats;

/// Points on each density curve.
const DENSITY_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Distribution by outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSeries {
    pub outcome: u8,
    /// Count per bin, aligned with `DistributionChart::edges`.
    pub counts: Vec<usize>,
    /// KDE curve scaled to counts (`density * n * bin_width`); empty when the
    /// group has no spread.
    pub density: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionChart {
    pub feature: String,
    pub title: String,
    /// Shared bin edges, `bins + 1` long.
    pub edges: Vec<f64>,
    /// One series per outcome value present in the data, ascending.
    pub series: Vec<OutcomeSeries>,
}

impl DistributionChart {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 1.0,
        }
    }
}

/// Histogram of `feature` split by outcome, with a smoothed density overlay.
pub fn distribution_chart(dataset: &Dataset, feature: &str) -> Result<DistributionChart, SchemaError> {
    if feature == OUTCOME || dataset.column_index(feature).is_none() {
        return Err(SchemaError::UnknownFeature {
            name: feature.to_string(),
        });
    }
    let values = dataset.column(feature)?;
    let outcomes = dataset.column(OUTCOME)?;

    let summary = stats::Summary::compute(&values);
    let (min, max) = summary.map(|s| (s.min, s.max)).unwrap_or((0.0, 1.0));
    let edges = stats::bin_edges(min, max, stats::sturges_bins(values.len()));
    let bin_width = edges[1] - edges[0];
    let grid = stats::linspace(edges[0], edges[edges.len() - 1], DENSITY_POINTS);

    let series = [0u8, 1u8]
        .into_iter()
        .filter_map(|outcome| {
            let group: Vec<f64> = values
                .iter()
                .zip(&outcomes)
                .filter(|(_, o)| **o == outcome as f64)
                .map(|(v, _)| *v)
                .collect();
            if group.is_empty() {
                return None;
            }
            let scale = group.len() as f64 * bin_width;
            let density: Vec<[f64; 2]> = stats::gaussian_kde(&group, &grid)
                .map(|d| {
                    grid.iter()
                        .zip(d)
                        .map(|(&x, y)| [x, y * scale])
                        .collect()
                })
                .unwrap_or_default();
            Some(OutcomeSeries {
                outcome,
                counts: stats::histogram(&group, &edges),
                density,
            })
        })
        .collect();

    Ok(DistributionChart {
        feature: feature.to_string(),
        title: format!("Distribution of {feature} by Diabetes Outcome"),
        edges,
        series,
    })
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationHeatmap {
    pub labels: Vec<String>,
    /// `values[row][col]`, each in [-1, 1] or NaN.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationHeatmap {
    /// Cell annotation text.
    pub fn annotation(&self, row: usize, col: usize) -> String {
        let v = self.values[row][col];
        if v.is_nan() {
            "nan".to_string()
        } else {
            format!("{v:.2}")
        }
    }
}

/// Pairwise Pearson correlations over every column, outcome included.
pub fn correlation_heatmap(dataset: &Dataset) -> CorrelationHeatmap {
    let columns: Vec<Vec<f64>> = (0..dataset.column_count())
        .map(|c| dataset.rows.iter().map(|r| r[c]).collect())
        .collect();
    CorrelationHeatmap {
        labels: dataset.columns.clone(),
        values: stats::correlation_matrix(&columns),
    }
}

// ---------------------------------------------------------------------------
// Feature importance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceChart {
    pub title: String,
    /// Bars in the order given, top to bottom.
    pub bars: Vec<NamedImportance>,
}

/// Horizontal bar chart of importances; no sorting is applied.
pub fn importance_chart(importances: &[NamedImportance]) -> ImportanceChart {
    ImportanceChart {
        title: "Feature Importance in Diabetes Prediction".to_string(),
        bars: importances.to_vec(),
    }
}
