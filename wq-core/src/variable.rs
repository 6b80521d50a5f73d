use serde::{Deserialize, Serialize};
use std::fmt;

/// Header of the timestamp column in sensor exports.
pub const DATETIME_COLUMN: &str = "Date and Time";

/// Header of the depth-tag column; values look like "-5 ft".
pub const DEPTH_COLUMN: &str = "Depth (Ft)";

/// Header of the chlorophyll concentration column (ug/L).
pub const CHLOROPHYLL_COLUMN: &str = "Chlorophyll";

/// Header of the dissolved oxygen concentration column (mg/L).
pub const OXYGEN_COLUMN: &str = "Oxygen Conc. (mg/L)";

/// The measured quantity a dataset carries. Every file holds exactly one.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Variable {
    Chlorophyll,
    Oxygen,
}

impl Variable {
    pub const ALL: [Variable; 2] = [Variable::Chlorophyll, Variable::Oxygen];

    /// The CSV header that holds this variable's values.
    pub fn column(&self) -> &'static str {
        match self {
            Variable::Chlorophyll => CHLOROPHYLL_COLUMN,
            Variable::Oxygen => OXYGEN_COLUMN,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Chlorophyll => "ug/L",
            Variable::Oxygen => "mg/L",
        }
    }

    /// Axis label, e.g. "Chlorophyll (ug/L)".
    pub fn axis_label(&self) -> String {
        format!("{} ({})", self, self.unit())
    }

    /// Lowercase name used in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Variable::Chlorophyll => "chlorophyll",
            Variable::Oxygen => "oxygen",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Chlorophyll => write!(f, "Chlorophyll"),
            Variable::Oxygen => write!(f, "Oxygen"),
        }
    }
}

/// Case-insensitive header comparison; exports pad headers with spaces.
pub fn header_matches(header: &str, column: &str) -> bool {
    header.trim().eq_ignore_ascii_case(column)
}
