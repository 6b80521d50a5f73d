//! SVG charts for the water-quality analysis.
//!
//! This crate provides:
//! - `palette`: per-site colours shared by every chart
//! - `daily`: daily-average time series, per site and all sites overlaid
//! - `correlation`: chlorophyll vs oxygen scatter with the fitted trendline
//! - `map`: site locations on a longitude/latitude frame
//!
//! Everything is drawn with the plotters SVG backend, one file per chart.

pub mod correlation;
pub mod daily;
pub mod map;
pub mod palette;

use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};
use wq_core::{site::SiteLocation, variable::Variable};
use wq_data::pipeline::SiteAnalysis;

/// Shared chart settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    /// First day on the time axis
    pub start: NaiveDate,
    /// Last day on the time axis
    pub end: NaiveDate,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        // the Puget Sound survey window
        ChartOptions {
            start: NaiveDate::from_ymd_opt(2019, 1, 4).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2019, 3, 8).unwrap_or_default(),
            width: 1000,
            height: 500,
        }
    }
}

/// Render every chart for a run into `out_dir` and return the written paths.
pub fn render_all(
    analyses: &[SiteAnalysis],
    sites: &[SiteLocation],
    out_dir: &Path,
    options: &ChartOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    for variable in Variable::ALL {
        let mut overlay = Vec::new();
        for (index, analysis) in analyses.iter().enumerate() {
            let Some(series) = analysis.daily(variable) else {
                continue;
            };
            let path = out_dir.join(format!(
                "daily_{}_{}.svg",
                variable.slug(),
                analysis.site.file_slug()
            ));
            daily::render_daily_chart(
                &path,
                &analysis.label,
                variable,
                &[(analysis.label.as_str(), series, index)],
                options,
            )?;
            written.push(path);
            overlay.push((analysis.label.as_str(), series, index));
        }
        if !overlay.is_empty() {
            let path = out_dir.join(format!("daily_{}_all_sites.svg", variable.slug()));
            let title = format!("{} Concentrations Across Puget Sound Region", variable);
            daily::render_daily_chart(&path, &title, variable, &overlay, options)?;
            written.push(path);
        }
    }

    for analysis in analyses {
        if let Some(fit) = &analysis.regression {
            let path = out_dir.join(format!("correlation_{}.svg", analysis.site.file_slug()));
            correlation::render_correlation_chart(
                &path,
                &analysis.label,
                &analysis.merged,
                fit,
                options,
            )?;
            written.push(path);
        }
    }

    if !sites.is_empty() {
        let path = out_dir.join("site_map.svg");
        map::render_site_map(&path, sites)?;
        written.push(path);
    }

    info!("chart: wrote {} charts to {}", written.len(), out_dir.display());
    Ok(written)
}
