use std::fs::File;
use std::path::Path;

use super::model::Dataset;
use super::schema::{COLUMN_COUNT, COLUMN_NAMES};
use crate::error::DataFormatError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// How the rows of a file were recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// Headerless, rectangular file read as-is.
    Strict,
    /// Leading header/noise rows skipped, ragged rows padded.
    Lenient,
}

/// Non-fatal findings of a [`load_data_with_report`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub stage: ParseStage,
    /// Rows discarded before the first numeric row (lenient stage only).
    pub skipped_header_rows: usize,
    /// Fields that could not be coerced to a finite number.
    pub missing_values: usize,
    /// Rows dropped because they held at least one missing value.
    pub dropped_rows: usize,
}

/// Load a diabetes CSV into a clean nine-column [`Dataset`].
///
/// Tolerates stacked header rows, stray text fields and ragged rows; rows
/// holding unparsable values are dropped with a warning.
pub fn load_data(path: &Path) -> Result<Dataset, DataFormatError> {
    load_data_with_report(path).map(|(dataset, _)| dataset)
}

/// Like [`load_data`], also returning what the cleaning pass discarded.
pub fn load_data_with_report(path: &Path) -> Result<(Dataset, LoadReport), DataFormatError> {
    let (table, stage) = match read_strict(path)? {
        Ok(table) => (table, ParseStage::Strict),
        Err(failure) => {
            log::debug!("strict parse of {} failed ({failure:?}), retrying leniently", path.display());
            (read_lenient(path)?, ParseStage::Lenient)
        }
    };

    if table.width != COLUMN_COUNT {
        return Err(DataFormatError::ColumnCount {
            expected: COLUMN_COUNT,
            found: table.width,
        });
    }

    let coerced: Vec<Vec<Option<f64>>> = table
        .rows
        .iter()
        .map(|row| {
            (0..table.width)
                .map(|i| row.get(i).and_then(|field| parse_numeric(field)))
                .collect()
        })
        .collect();

    let missing_values = coerced
        .iter()
        .map(|row| row.iter().filter(|v| v.is_none()).count())
        .sum::<usize>();

    let rows: Vec<Vec<f64>> = coerced
        .into_iter()
        .filter_map(|row| row.into_iter().collect::<Option<Vec<f64>>>())
        .collect();
    let dropped_rows = table.rows.len() - rows.len();

    if missing_values > 0 {
        log::warn!("{missing_values} missing values detected - dropping {dropped_rows} rows");
    }
    if rows.is_empty() {
        return Err(DataFormatError::NoDataRows {
            path: path.to_path_buf(),
        });
    }

    let columns = COLUMN_NAMES.iter().map(|c| c.to_string()).collect();
    let report = LoadReport {
        stage,
        skipped_header_rows: table.skipped,
        missing_values,
        dropped_rows,
    };
    log::info!(
        "Loaded {} rows from {} ({:?} parse)",
        rows.len(),
        path.display(),
        stage
    );
    Ok((Dataset::new(columns, rows), report))
}

// ---------------------------------------------------------------------------
// Stage 1: strict
// ---------------------------------------------------------------------------

/// Why the strict stage handed over to the lenient one.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StrictFailure {
    /// Row `line` has a different field count than the first row.
    Ragged { line: u64 },
    /// First field of the first row is text (a header block).
    LeadingText,
}

/// Raw text fields before numeric coercion.
struct RawTable {
    rows: Vec<Vec<String>>,
    width: usize,
    skipped: usize,
}

/// Outer `Result` carries hard failures (I/O, malformed CSV) that must not be
/// retried; the inner one distinguishes structural failures.
fn read_strict(path: &Path) -> Result<Result<RawTable, StrictFailure>, DataFormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        match result {
            Ok(record) => rows.push(text_fields(&record)),
            Err(err) => match err.kind() {
                csv::ErrorKind::UnequalLengths { pos, .. } => {
                    let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
                    return Ok(Err(StrictFailure::Ragged { line }));
                }
                _ => {
                    return Err(DataFormatError::Csv {
                        path: path.to_path_buf(),
                        source: err,
                    })
                }
            },
        }
    }

    let Some(first) = rows.first() else {
        return Err(DataFormatError::Empty {
            path: path.to_path_buf(),
        });
    };
    if !leads_with_number(first) {
        return Ok(Err(StrictFailure::LeadingText));
    }
    strip_trailing_delimiter(&mut rows);
    let width = rows[0].len();
    Ok(Ok(RawTable {
        rows,
        width,
        skipped: 0,
    }))
}

// ---------------------------------------------------------------------------
// Stage 2: lenient
// ---------------------------------------------------------------------------

fn read_lenient(path: &Path) -> Result<RawTable, DataFormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|source| DataFormatError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(text_fields(&record));
    }
    if rows.is_empty() {
        return Err(DataFormatError::Empty {
            path: path.to_path_buf(),
        });
    }

    let skipped = rows
        .iter()
        .position(|row| leads_with_number(row))
        .ok_or_else(|| DataFormatError::NoDataRows {
            path: path.to_path_buf(),
        })?;
    if skipped > 0 {
        log::info!("Skipping {skipped} header rows in {}", path.display());
    }

    let mut rows: Vec<Vec<String>> = rows.split_off(skipped);
    strip_trailing_delimiter(&mut rows);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    Ok(RawTable {
        rows,
        width,
        skipped,
    })
}

// -- helpers --

fn open(path: &Path) -> Result<File, DataFormatError> {
    File::open(path).map_err(|source| DataFormatError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fields as text; invalid UTF-8 is replaced so the field fails coercion
/// instead of aborting the load.
fn text_fields(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

/// Drop the empty last field left by a delimiter at the end of every line.
fn strip_trailing_delimiter(rows: &mut [Vec<String>]) {
    let trailing = !rows.is_empty()
        && rows
            .iter()
            .all(|row| row.len() == COLUMN_COUNT + 1 && row[COLUMN_COUNT].is_empty());
    if trailing {
        log::debug!("Ignoring trailing delimiter on every row");
        rows.iter_mut().for_each(|row| {
            row.pop();
        });
    }
}

fn leads_with_number(row: &[String]) -> bool {
    row.first().and_then(|f| parse_numeric(f)).is_some()
}

/// Coerce one field; empty, textual and non-finite values are missing.
fn parse_numeric(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn clean_file_uses_strict_stage() {
        let file = write_csv(
            "6,148,72,35,0,33.6,0.627,50,1\n\
             1,85,66,29,0,26.6,0.351,31,0\n\
             8,183,64,0,0,23.3,0.672,32,1\n",
        );
        let (ds, report) = load_data_with_report(file.path()).unwrap();
        assert_eq!(report.stage, ParseStage::Strict);
        assert_eq!(ds.column_count(), 9);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[1], vec![1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.351, 31.0, 0.0]);
        assert_eq!(report.missing_values, 0);
    }

    #[test]
    fn stacked_headers_are_skipped() {
        let file = write_csv(&format!(
            "{HEADER}\n{HEADER}\n6,148,72,35,0,33.6,0.627,50,1\n1,85,66,29,0,26.6,0.351,31,0\n"
        ));
        let (ds, report) = load_data_with_report(file.path()).unwrap();
        assert_eq!(report.stage, ParseStage::Lenient);
        assert_eq!(report.skipped_header_rows, 2);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns[8], "Outcome");
    }

    #[test]
    fn ragged_rows_are_padded_and_dropped() {
        let file = write_csv(
            "6,148,72,35,0,33.6,0.627,50,1\n\
             1,85,66\n\
             8,183,64,0,0,23.3,0.672,32,1\n",
        );
        let (ds, report) = load_data_with_report(file.path()).unwrap();
        assert_eq!(report.stage, ParseStage::Lenient);
        assert_eq!(ds.len(), 2);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(report.missing_values, 6);
    }

    #[test]
    fn stray_text_fields_are_dropped() {
        let file = write_csv(
            "6,148,72,35,0,33.6,0.627,50,1\n\
             1,85,n/a,29,0,26.6,0.351,31,0\n\
             8,183,64,0,0,23.3,0.672,32,1\n",
        );
        let (ds, report) = load_data_with_report(file.path()).unwrap();
        assert_eq!(report.stage, ParseStage::Strict);
        assert_eq!(ds.len(), 2);
        assert_eq!(report.missing_values, 1);
    }

    #[test]
    fn interleaved_header_is_dropped_as_noise() {
        let file = write_csv(&format!(
            "6,148,72,35,0,33.6,0.627,50,1\n{HEADER}\n1,85,66,29,0,26.6,0.351,31,0\n"
        ));
        let ds = load_data(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn wrong_column_count_fails() {
        let file = write_csv("1,2,3,4,5,6,7,8\n1,2,3,4,5,6,7,8\n");
        let err = load_data(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DataFormatError::ColumnCount {
                expected: 9,
                found: 8
            }
        ));
    }

    #[test]
    fn trailing_delimiter_on_every_line_is_ignored() {
        let file = write_csv(
            "6,148,72,35,0,33.6,0.627,50,1,\n\
             1,85,66,29,0,26.6,0.351,31,0,\n",
        );
        let (ds, report) = load_data_with_report(file.path()).unwrap();
        assert_eq!(report.stage, ParseStage::Strict);
        assert_eq!(ds.column_count(), 9);
        assert_eq!(ds.rows[0], vec![6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0, 1.0]);
    }

    #[test]
    fn trailing_delimiter_after_header_is_ignored() {
        let file = write_csv(&format!(
            "{HEADER}\n6,148,72,35,0,33.6,0.627,50,1,\n1,85,66,29,0,26.6,0.351,31,0,\n"
        ));
        let ds = load_data(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[1][8], 0.0);
    }

    #[test]
    fn extra_non_empty_column_still_fails() {
        let file = write_csv("1,2,3,4,5,6,7,8,1,9\n1,2,3,4,5,6,7,8,0,9\n");
        let err = load_data(file.path()).unwrap_err();
        assert!(matches!(err, DataFormatError::ColumnCount { found: 10, .. }));
    }

    #[test]
    fn invalid_utf8_field_drops_only_its_row() {
        let mut bytes = b"6,148,72,35,0,33.6,0.627,50,1\n1,85,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",29,0,26.6,0.351,31,0\n8,183,64,0,0,23.3,0.672,32,1\n");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let (ds, report) = load_data_with_report(file.path()).unwrap();
        assert_eq!(report.stage, ParseStage::Strict);
        assert_eq!(ds.len(), 2);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(report.missing_values, 1);
    }

    #[test]
    fn wrong_column_count_after_header_skip_fails() {
        let file = write_csv("a,b,c,d,e,f,g\n1,2,3,4,5,6,7\n");
        let err = load_data(file.path()).unwrap_err();
        assert!(matches!(err, DataFormatError::ColumnCount { found: 7, .. }));
    }

    #[test]
    fn headers_only_has_no_data_rows() {
        let file = write_csv(&format!("{HEADER}\n{HEADER}\n"));
        assert!(matches!(
            load_data(file.path()),
            Err(DataFormatError::NoDataRows { .. })
        ));
    }

    #[test]
    fn empty_file_fails() {
        let file = write_csv("");
        assert!(matches!(
            load_data(file.path()),
            Err(DataFormatError::Empty { .. })
        ));
    }

    #[test]
    fn missing_file_is_not_retried_leniently() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_data(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataFormatError::Io { .. }));
    }

    #[test]
    fn non_finite_values_count_as_missing() {
        assert_eq!(parse_numeric(" 4.5 "), Some(4.5));
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric(""), None);
    }
}
