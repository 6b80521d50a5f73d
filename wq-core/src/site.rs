use crate::error::{PipelineError, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Embedded CSV of the monitoring sites around Puget Sound.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/sites.csv");

/// File-name tokens that name a variable rather than a place.
const VARIABLE_TOKENS: [&str; 8] = [
    "chlorophyll",
    "chl",
    "chla",
    "oxygen",
    "o2",
    "do",
    "dissolved",
    "conc",
];

/// Normalized site identifier used to pair datasets and coordinates.
///
/// Built from a file stem or a location name: split on anything that is not
/// alphanumeric, drop tokens naming a variable, lowercase, and join with
/// single spaces. "Point_Williams_Chlorophyll" and "Point Williams" share
/// the key `point williams`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SiteKey(pub String);

impl SiteKey {
    /// Derive the key and a display label from a file stem.
    pub fn from_file_stem(stem: &str) -> (SiteKey, String) {
        let tokens: Vec<&str> = stem
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        let place: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|t| !VARIABLE_TOKENS.contains(&t.to_lowercase().as_str()))
            .collect();
        // a stem made only of variable words keeps all of them
        let kept = if place.is_empty() { tokens } else { place };
        let label = kept.join(" ");
        (SiteKey(label.to_lowercase()), label)
    }

    /// Key for a location name such as "Yacht Club, Vashon".
    pub fn from_name(name: &str) -> SiteKey {
        SiteKey::from_file_stem(name).0
    }

    /// Underscore-joined form, safe for file names.
    pub fn file_slug(&self) -> String {
        self.0.replace(' ', "_")
    }
}

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monitoring site with its coordinates in decimal degrees.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SiteLocation {
    #[serde(rename = "ID")]
    pub site_id: String,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "LATITUDE")]
    pub latitude: f64,
    #[serde(rename = "LONGITUDE")]
    pub longitude: f64,
}

impl SiteLocation {
    pub fn key(&self) -> SiteKey {
        SiteKey::from_name(&self.name)
    }

    /// The built-in site table.
    pub fn get_site_locations() -> Result<Vec<SiteLocation>> {
        SiteLocation::parse_site_csv(CSV_OBJECT)
    }

    /// Parse a CSV string of site locations.
    ///
    /// Expected CSV columns (with headers): `ID,NAME,LATITUDE,LONGITUDE`
    pub fn parse_site_csv(csv_object: &str) -> Result<Vec<SiteLocation>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut sites = Vec::new();
        for row in rdr.deserialize() {
            let site: SiteLocation = row.map_err(|e| PipelineError::SiteTable(e.to_string()))?;
            if !(-90.0..=90.0).contains(&site.latitude) || !(-180.0..=180.0).contains(&site.longitude) {
                return Err(PipelineError::SiteTable(format!(
                    "{} has out-of-range coordinates ({}, {})",
                    site.name, site.latitude, site.longitude
                )));
            }
            sites.push(site);
        }
        Ok(sites)
    }

    /// Find the location whose name maps to `key`.
    pub fn find<'a>(sites: &'a [SiteLocation], key: &SiteKey) -> Option<&'a SiteLocation> {
        sites.iter().find(|s| &s.key() == key)
    }
}
