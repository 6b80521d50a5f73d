//! The correlation report.

use anyhow::Context;
use log::info;
use serde::Serialize;
use std::path::Path;
use wq_core::site::SiteLocation;
use wq_data::{
    pipeline::{run_pipeline, PipelineConfig, SiteAnalysis},
    regression::Regression,
};

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub site: String,
    pub site_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub chlorophyll_days: usize,
    pub oxygen_days: usize,
    pub regression: Option<Regression>,
}

impl SiteSummary {
    pub fn new(analysis: &SiteAnalysis, sites: &[SiteLocation]) -> SiteSummary {
        let location = SiteLocation::find(sites, &analysis.site);
        let days = |series: Option<&wq_core::series::DailySeries>| {
            series.map_or(0, |s| s.observed().count())
        };
        SiteSummary {
            site: analysis.label.clone(),
            site_id: location.map(|l| l.site_id.clone()),
            latitude: location.map(|l| l.latitude),
            longitude: location.map(|l| l.longitude),
            chlorophyll_days: days(analysis.chlorophyll.as_ref()),
            oxygen_days: days(analysis.oxygen.as_ref()),
            regression: analysis.regression,
        }
    }
}

/// Fixed-width text table, one row per site.
pub fn format_report(summaries: &[SiteSummary]) -> String {
    let mut out = format!(
        "{:<24}{:>6}{:>6}{:>6}{:>10}{:>11}{:>8}{:>10}\n",
        "Site", "Chl", "Oxy", "n", "Slope", "Intercept", "r^2", "p-value"
    );
    for s in summaries {
        match &s.regression {
            Some(fit) => out.push_str(&format!(
                "{:<24}{:>6}{:>6}{:>6}{:>10.4}{:>11.4}{:>8.4}{:>10.4}\n",
                s.site,
                s.chlorophyll_days,
                s.oxygen_days,
                fit.n,
                fit.slope,
                fit.intercept,
                fit.r_squared,
                fit.p_value
            )),
            None => out.push_str(&format!(
                "{:<24}{:>6}{:>6}{:>6}{:>10}{:>11}{:>8}{:>10}\n",
                s.site, s.chlorophyll_days, s.oxygen_days, "-", "-", "-", "-", "-"
            )),
        }
    }
    let fits: Vec<f64> = summaries
        .iter()
        .filter_map(|s| s.regression.map(|r| r.r_squared))
        .collect();
    if !fits.is_empty() {
        let mean = fits.iter().sum::<f64>() / fits.len() as f64;
        out.push_str(&format!(
            "{} of {} sites correlated, mean r^2 = {:.4}\n",
            fits.len(),
            summaries.len(),
            mean
        ));
    }
    out
}

pub fn run_analyze(
    data_dir: &Path,
    config: &PipelineConfig,
    sites: &[SiteLocation],
    json: bool,
) -> anyhow::Result<()> {
    info!(
        "Analysing {} (readings shallower than {} ft)",
        data_dir.display(),
        config.max_depth_ft
    );
    let analyses = run_pipeline(data_dir, config)
        .with_context(|| format!("analysing {}", data_dir.display()))?;
    let summaries: Vec<SiteSummary> = analyses
        .iter()
        .map(|a| SiteSummary::new(a, sites))
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", format_report(&summaries));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(site: &str, r_squared: Option<f64>) -> SiteSummary {
        SiteSummary {
            site: site.to_string(),
            site_id: None,
            latitude: None,
            longitude: None,
            chlorophyll_days: 10,
            oxygen_days: 9,
            regression: r_squared.map(|r2| Regression {
                slope: 1.5,
                intercept: 0.25,
                r: r2.sqrt(),
                r_squared: r2,
                p_value: 0.01,
                std_err: 0.1,
                n: 9,
            }),
        }
    }

    #[test]
    fn test_format_report() {
        let report = format_report(&[summary("Coast", Some(0.5)), summary("Bellingham", None)]);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Site"));
        assert!(lines[1].starts_with("Coast"));
        assert!(lines[1].contains("0.5000"));
        assert!(lines[2].trim_end().ends_with('-'));
        assert_eq!(lines[3], "1 of 2 sites correlated, mean r^2 = 0.5000");
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_string(&summary("Coast", Some(0.25))).unwrap();
        assert!(json.contains("\"r_squared\":0.25"));
        assert!(json.contains("\"site_id\":null"));
    }
}
