use crate::data::schema::{Feature, OUTCOME};
use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Dataset – a named, fully numeric table
// ---------------------------------------------------------------------------

/// Row-major numeric table with named columns.
///
/// A dataset returned by the loader always has the nine diabetes columns and
/// no missing values; other shapes are representable so that schema checks
/// can fail with a typed error instead of a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// One `Vec<f64>` per record, each `columns.len()` long.
    pub rows: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, SchemaError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| SchemaError::MissingColumn {
                column: name.to_string(),
            })?;
        Ok(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// Every column except the outcome, in order.
    pub fn predictor_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| *c != OUTCOME)
            .collect()
    }

    /// Predictor columns that correspond to a known [`Feature`].
    pub fn features(&self) -> Vec<Feature> {
        self.predictor_names()
            .into_iter()
            .filter_map(Feature::from_column_name)
            .collect()
    }

    /// A copy of the dataset without the named column.
    pub fn without_column(&self, name: &str) -> Dataset {
        let Some(idx) = self.column_index(name) else {
            return self.clone();
        };
        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, v)| *v)
                    .collect()
            })
            .collect();
        Dataset { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::COLUMN_NAMES;

    fn sample() -> Dataset {
        Dataset::new(
            COLUMN_NAMES.iter().map(|s| s.to_string()).collect(),
            vec![
                vec![2.0, 120.0, 70.0, 20.0, 80.0, 25.0, 0.5, 30.0, 0.0],
                vec![6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0, 1.0],
            ],
        )
    }

    #[test]
    fn predictors_exclude_outcome() {
        let ds = sample();
        assert_eq!(ds.predictor_names().len(), 8);
        assert_eq!(ds.features(), Feature::ALL.to_vec());
        assert!(!ds.predictor_names().contains(&OUTCOME));
    }

    #[test]
    fn column_reads_values_in_row_order() {
        let ds = sample();
        assert_eq!(ds.column("Glucose").unwrap(), vec![120.0, 148.0]);
        assert!(matches!(
            ds.column("Cholesterol"),
            Err(SchemaError::MissingColumn { .. })
        ));
    }

    #[test]
    fn without_column_drops_values() {
        let ds = sample().without_column(OUTCOME);
        assert_eq!(ds.column_count(), 8);
        assert!(ds.rows.iter().all(|r| r.len() == 8));
        assert_eq!(ds.column_index(OUTCOME), None);
    }
}
