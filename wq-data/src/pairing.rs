//! Grouping datasets by site.
//!
//! Pairing happens on the site key parsed from each file name, so the order
//! in which files were listed never decides which series get merged.

use log::warn;
use std::collections::BTreeMap;
use wq_core::{
    error::{PipelineError, Result},
    reading::Dataset,
    site::SiteKey,
    variable::Variable,
};

/// The datasets found for one site. Either side may be absent.
#[derive(Debug, Clone)]
pub struct SitePair {
    pub site: SiteKey,
    pub label: String,
    pub chlorophyll: Option<Dataset>,
    pub oxygen: Option<Dataset>,
}

impl SitePair {
    fn new(site: SiteKey, label: String) -> SitePair {
        SitePair {
            site,
            label,
            chlorophyll: None,
            oxygen: None,
        }
    }

    fn slot(&mut self, variable: Variable) -> &mut Option<Dataset> {
        match variable {
            Variable::Chlorophyll => &mut self.chlorophyll,
            Variable::Oxygen => &mut self.oxygen,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.chlorophyll.is_some() && self.oxygen.is_some()
    }
}

/// Group datasets by site key, ordered by key.
///
/// Two datasets with the same site and variable are an error.
pub fn pair_by_site(datasets: Vec<Dataset>) -> Result<Vec<SitePair>> {
    let mut sites: BTreeMap<SiteKey, SitePair> = BTreeMap::new();
    for dataset in datasets {
        let pair = sites
            .entry(dataset.site.clone())
            .or_insert_with(|| SitePair::new(dataset.site.clone(), dataset.label.clone()));
        let slot = pair.slot(dataset.variable);
        if let Some(existing) = slot.as_ref() {
            return Err(PipelineError::DuplicateDataset {
                site: dataset.label.clone(),
                variable: dataset.variable,
                first: existing.path.clone(),
                second: dataset.path.clone(),
            });
        }
        *slot = Some(dataset);
    }

    for pair in sites.values().filter(|p| !p.is_complete()) {
        let present = if pair.chlorophyll.is_some() {
            Variable::Chlorophyll
        } else {
            Variable::Oxygen
        };
        warn!(
            "pairing: site {} only has {} data; it will not be correlated",
            pair.label, present
        );
    }
    Ok(sites.into_values().collect())
}
