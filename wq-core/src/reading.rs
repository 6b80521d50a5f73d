use crate::{error::ValueError, site::SiteKey, variable::Variable};
use log::debug;
use std::path::PathBuf;

/// One sensor sample as it appeared in the export.
///
/// The timestamp and depth tag are kept as text; parsing them is the job of
/// the temporal indexer and the depth filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    /// 1-based line in the source file, for error messages
    pub line: u64,
    pub timestamp: String,
    /// e.g. "-5 ft"; empty when the cell was blank
    pub depth_tag: String,
    /// `None` is the missing-value marker
    pub value: Option<f64>,
}

/// Every reading from one file, tagged with its site and variable.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub site: SiteKey,
    /// Site name as written in the file name
    pub label: String,
    pub path: PathBuf,
    pub variable: Variable,
    pub readings: Vec<RawReading>,
}

impl Dataset {
    /// A copy of this dataset holding only the readings that pass `keep`.
    pub fn retain_readings<F>(&self, keep: F) -> Dataset
    where
        F: Fn(&RawReading) -> bool,
    {
        Dataset {
            site: self.site.clone(),
            label: self.label.clone(),
            path: self.path.clone(),
            variable: self.variable,
            readings: self.readings.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Parse a measurement cell. Blank cells and the usual NaN spellings are
/// missing, as are infinities; anything else that is not a number is
/// rejected.
pub fn parse_value(cell: &str) -> Result<Option<f64>, ValueError> {
    let lowered = cell.trim().to_lowercase();
    match lowered.as_str() {
        "" | "nan" | "na" | "n/a" | "null" => Ok(None),
        s => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            Ok(v) => {
                debug!("reading: treating non-finite value {} as missing", v);
                Ok(None)
            }
            Err(_) => Err(ValueError(cell.trim().to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 4.25"), Ok(Some(4.25)));
        assert_eq!(parse_value("0"), Ok(Some(0.0)));
        assert_eq!(parse_value(""), Ok(None));
        assert_eq!(parse_value("NaN"), Ok(None));
        assert_eq!(parse_value("N/A"), Ok(None));
        assert_eq!(parse_value("BRT"), Err(ValueError("BRT".to_string())));
    }

    #[test]
    fn test_parse_value_infinities_are_missing() {
        assert_eq!(parse_value("inf"), Ok(None));
        assert_eq!(parse_value(" -Infinity "), Ok(None));
        assert_eq!(parse_value("1e400"), Ok(None));
    }

    #[test]
    fn test_retain_readings_keeps_metadata() {
        let dataset = Dataset {
            site: SiteKey("coast".to_string()),
            label: "Coast".to_string(),
            path: PathBuf::from("Coast Oxygen.csv"),
            variable: Variable::Oxygen,
            readings: vec![
                RawReading {
                    line: 2,
                    timestamp: "2019-01-04 00:00".to_string(),
                    depth_tag: "-5 ft".to_string(),
                    value: Some(8.0),
                },
                RawReading {
                    line: 3,
                    timestamp: "2019-01-04 01:00".to_string(),
                    depth_tag: "-20 ft".to_string(),
                    value: Some(7.0),
                },
            ],
        };
        let kept = dataset.retain_readings(|r| r.line == 3);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.variable, Variable::Oxygen);
        assert_eq!(kept.label, "Coast");
        assert_eq!(dataset.len(), 2);
    }
}
