//! CSV loading for sensor exports.
//!
//! Each file in the data directory holds one variable for one site. The
//! header row decides which variable: a file is classified as chlorophyll or
//! oxygen here, once, and carries that tag through the rest of the pipeline.
//!
//! # CSV Format
//!
//! ```text
//! Date and Time, Depth (Ft), Chlorophyll
//! 01/04/2019 00:15, -5 ft, 2.31
//! 01/04/2019 00:15, -30 ft, 1.02
//! ```
//!
//! Headers and cells are trimmed; exports pad them with leading spaces.

use crate::{
    error::{PipelineError, Result, ValueError},
    reading::{parse_value, Dataset, RawReading},
    site::SiteKey,
    variable::{header_matches, Variable, DATETIME_COLUMN, DEPTH_COLUMN},
};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::{
    io::Read,
    path::{Path, PathBuf},
};

/// Extension of the files picked up from a data directory.
pub const DATA_EXTENSION: &str = "csv";

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub datetime: usize,
    pub depth: usize,
    pub value: usize,
    pub variable: Variable,
}

impl Schema {
    /// Resolve the required columns and decide which variable the file holds.
    pub fn classify(headers: &StringRecord, path: &Path) -> Result<Schema> {
        let position = |column: &str| headers.iter().position(|h| header_matches(h, column));
        let missing = |column: &str| PipelineError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        };

        let datetime = position(DATETIME_COLUMN).ok_or_else(|| missing(DATETIME_COLUMN))?;
        let depth = position(DEPTH_COLUMN).ok_or_else(|| missing(DEPTH_COLUMN))?;

        let found: Vec<(Variable, usize)> = Variable::ALL
            .iter()
            .filter_map(|v| position(v.column()).map(|idx| (*v, idx)))
            .collect();
        match found.as_slice() {
            [(variable, value)] => Ok(Schema {
                datetime,
                depth,
                value: *value,
                variable: *variable,
            }),
            _ => Err(PipelineError::AmbiguousSchema {
                path: path.to_path_buf(),
                found: found.len(),
            }),
        }
    }
}

/// List the data files of a directory, sorted by path.
///
/// Anything without a `.csv` extension (the binary, notes, subdirectories)
/// is skipped.
pub fn list_data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_data = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(DATA_EXTENSION));
        if is_data {
            files.push(path);
        } else {
            debug!("loader: skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Load every data file in `dir`. Any unreadable file aborts the load.
pub fn load_directory(dir: &Path) -> Result<Vec<Dataset>> {
    let files = list_data_files(dir)?;
    let datasets = files
        .iter()
        .map(|path| load_file(path))
        .collect::<Result<Vec<Dataset>>>()?;
    info!(
        "loader: loaded {} datasets from {}",
        datasets.len(),
        dir.display()
    );
    Ok(datasets)
}

/// Load a single data file; the site comes from the file stem.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(file, path)
}

/// Parse CSV data from any reader. `path` names the source in errors and
/// provides the site name.
pub fn parse_dataset<R: Read>(reader: R, path: &Path) -> Result<Dataset> {
    let csv_err = |source| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let schema = Schema::classify(&headers, path)?;

    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map_or(0, |p| p.line());
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let raw_value = cell(schema.value);
        let value = parse_value(&raw_value).map_err(|ValueError(value)| {
            PipelineError::InvalidValue {
                path: path.to_path_buf(),
                line,
                value,
            }
        })?;
        readings.push(RawReading {
            line,
            timestamp: cell(schema.datetime),
            depth_tag: cell(schema.depth),
            value,
        });
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let (site, label) = SiteKey::from_file_stem(stem);
    debug!(
        "loader: {} -> site {:?}, {} {} readings",
        path.display(),
        site.0,
        readings.len(),
        schema.variable
    );
    Ok(Dataset {
        site,
        label,
        path: path.to_path_buf(),
        variable: schema.variable,
        readings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHLOROPHYLL_CSV: &str = "\
Date and Time, Depth (Ft), Chlorophyll
01/04/2019 00:15, -5 ft, 2.31
01/04/2019 00:15, -30 ft, 1.02
01/04/2019 00:30, -5 ft,
";

    fn parse(csv_data: &str, name: &str) -> Result<Dataset> {
        parse_dataset(csv_data.as_bytes(), Path::new(name))
    }

    #[test]
    fn test_parse_chlorophyll_dataset() {
        let dataset = parse(CHLOROPHYLL_CSV, "Bellingham Chlorophyll.csv").unwrap();
        assert_eq!(dataset.variable, Variable::Chlorophyll);
        assert_eq!(dataset.site, SiteKey("bellingham".to_string()));
        assert_eq!(dataset.label, "Bellingham");
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.readings[0].depth_tag, "-5 ft");
        assert_eq!(dataset.readings[0].value, Some(2.31));
        assert_eq!(dataset.readings[2].value, None);
        assert_eq!(dataset.readings[1].line, 3);
    }

    #[test]
    fn test_parse_oxygen_dataset() {
        let csv_data = "Date and Time, Depth (Ft), Oxygen Conc. (mg/L)\n2019-01-04 00:15, -5 ft, 8.4\n";
        let dataset = parse(csv_data, "Coast_Oxygen.csv").unwrap();
        assert_eq!(dataset.variable, Variable::Oxygen);
        assert_eq!(dataset.readings[0].value, Some(8.4));
    }

    #[test]
    fn test_missing_variable_column_is_ambiguous() {
        let csv_data = "Date and Time, Depth (Ft), Salinity\n2019-01-04 00:15, -5 ft, 30.1\n";
        let err = parse(csv_data, "Coast.csv").unwrap_err();
        assert!(matches!(err, PipelineError::AmbiguousSchema { found: 0, .. }));
    }

    #[test]
    fn test_both_variable_columns_is_ambiguous() {
        let csv_data = "Date and Time,Depth (Ft),Chlorophyll,Oxygen Conc. (mg/L)\n";
        let err = parse(csv_data, "Coast.csv").unwrap_err();
        assert!(matches!(err, PipelineError::AmbiguousSchema { found: 2, .. }));
    }

    #[test]
    fn test_missing_depth_column() {
        let csv_data = "Date and Time,Chlorophyll\n2019-01-04 00:15,1.0\n";
        let err = parse(csv_data, "Coast.csv").unwrap_err();
        match err {
            PipelineError::MissingColumn { column, .. } => assert_eq!(column, DEPTH_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_value_reports_line() {
        let csv_data = "Date and Time,Depth (Ft),Chlorophyll\n2019-01-04 00:15,-5 ft,1.0\n2019-01-04 00:30,-5 ft,oops\n";
        let err = parse(csv_data, "Coast.csv").unwrap_err();
        match err {
            PipelineError::InvalidValue { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_row_is_a_csv_error() {
        let csv_data = "Date and Time,Depth (Ft),Chlorophyll\n2019-01-04 00:15,-5 ft\n";
        let err = parse(csv_data, "Coast.csv").unwrap_err();
        assert!(matches!(err, PipelineError::Csv { .. }));
    }
}
