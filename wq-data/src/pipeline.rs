//! End-to-end processing of a data directory.

use crate::{
    daily::aggregate_daily,
    depth::{filter_shallow, DEFAULT_MAX_DEPTH_FT},
    merge::merge_asof,
    pairing::{pair_by_site, SitePair},
    regression::{correlate, Regression},
    temporal::index_by_datetime,
};
use log::info;
use std::path::Path;
use wq_core::{
    error::Result,
    loader::load_directory,
    reading::Dataset,
    series::{DailySeries, MergedRecord},
    site::SiteKey,
    variable::Variable,
};

/// Tunables for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Readings at or deeper than this many feet are discarded.
    pub max_depth_ft: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_depth_ft: DEFAULT_MAX_DEPTH_FT,
        }
    }
}

/// Everything computed for one site.
#[derive(Debug, Clone)]
pub struct SiteAnalysis {
    pub site: SiteKey,
    pub label: String,
    pub chlorophyll: Option<DailySeries>,
    pub oxygen: Option<DailySeries>,
    /// Empty unless the site has both variables
    pub merged: Vec<MergedRecord>,
    pub regression: Option<Regression>,
}

impl SiteAnalysis {
    pub fn daily(&self, variable: Variable) -> Option<&DailySeries> {
        match variable {
            Variable::Chlorophyll => self.chlorophyll.as_ref(),
            Variable::Oxygen => self.oxygen.as_ref(),
        }
    }
}

/// Depth filter, timestamp index and daily means for one dataset.
pub fn daily_averages(dataset: &Dataset, config: &PipelineConfig) -> Result<DailySeries> {
    let shallow = filter_shallow(dataset, config.max_depth_ft);
    let series = index_by_datetime(&shallow)?;
    Ok(aggregate_daily(&series))
}

/// Daily series for both variables, then the merge and fit when both exist.
pub fn analyze_site(pair: &SitePair, config: &PipelineConfig) -> Result<SiteAnalysis> {
    let chlorophyll = pair
        .chlorophyll
        .as_ref()
        .map(|d| daily_averages(d, config))
        .transpose()?;
    let oxygen = pair
        .oxygen
        .as_ref()
        .map(|d| daily_averages(d, config))
        .transpose()?;

    let (merged, regression) = match (&chlorophyll, &oxygen) {
        (Some(chl), Some(oxy)) => {
            let merged = merge_asof(chl, oxy);
            let fit = correlate(&merged)?;
            info!(
                "pipeline: {} r^2 = {:.4} over {} days",
                pair.label, fit.r_squared, fit.n
            );
            (merged, Some(fit))
        }
        _ => (Vec::new(), None),
    };

    Ok(SiteAnalysis {
        site: pair.site.clone(),
        label: pair.label.clone(),
        chlorophyll,
        oxygen,
        merged,
        regression,
    })
}

/// Analyse already-loaded datasets, one result per site ordered by site key.
pub fn analyze_datasets(
    datasets: Vec<Dataset>,
    config: &PipelineConfig,
) -> Result<Vec<SiteAnalysis>> {
    pair_by_site(datasets)?
        .iter()
        .map(|pair| analyze_site(pair, config))
        .collect()
}

/// Load a directory and analyse every site in it. The first error ends the
/// run.
pub fn run_pipeline(dir: &Path, config: &PipelineConfig) -> Result<Vec<SiteAnalysis>> {
    let datasets = load_directory(dir)?;
    let analyses = analyze_datasets(datasets, config)?;
    info!(
        "pipeline: analysed {} sites, {} correlated",
        analyses.len(),
        analyses.iter().filter(|a| a.regression.is_some()).count()
    );
    Ok(analyses)
}
