//! CSV export of the merged daily series and the fits.
//!
//! # Output
//!
//! - `<site>_daily.csv` (with headers): `date,chlorophyll,oxygen`; missing
//!   values are empty cells
//! - `correlation.csv` (with headers):
//!   `site,n,slope,intercept,r,r_squared,p_value,std_err`

use anyhow::Context;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use wq_core::series::MergedRecord;
use wq_data::pipeline::{run_pipeline, PipelineConfig, SiteAnalysis};
use wq_utils::dates::format_date;

#[derive(Debug, Serialize)]
struct DailyRow {
    date: String,
    chlorophyll: Option<f64>,
    oxygen: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CorrelationRow<'a> {
    site: &'a str,
    n: usize,
    slope: f64,
    intercept: f64,
    r: f64,
    r_squared: f64,
    p_value: f64,
    std_err: f64,
}

/// Rows for a site's daily file. A site with only one variable gets its
/// own series with the other column left empty.
pub fn daily_rows(analysis: &SiteAnalysis) -> Vec<MergedRecord> {
    if !analysis.merged.is_empty() {
        return analysis.merged.clone();
    }
    let chlorophyll = analysis.chlorophyll.iter().flat_map(|s| s.entries()).map(|e| MergedRecord {
        date: e.date,
        chlorophyll: e.value,
        oxygen: None,
    });
    let oxygen = analysis.oxygen.iter().flat_map(|s| s.entries()).map(|e| MergedRecord {
        date: e.date,
        chlorophyll: None,
        oxygen: e.value,
    });
    chlorophyll.chain(oxygen).collect()
}

const DAILY_HEADER: [&str; 3] = ["date", "chlorophyll", "oxygen"];

fn write_daily(path: &Path, records: &[MergedRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(DAILY_HEADER)?;
    for record in records {
        wtr.serialize(DailyRow {
            date: format_date(&record.date),
            chlorophyll: record.chlorophyll,
            oxygen: record.oxygen,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Header of `correlation.csv`, written even when no site was correlated.
const CORRELATION_HEADER: [&str; 8] = [
    "site",
    "n",
    "slope",
    "intercept",
    "r",
    "r_squared",
    "p_value",
    "std_err",
];

fn write_correlations(path: &Path, analyses: &[SiteAnalysis]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(CORRELATION_HEADER)?;
    for analysis in analyses {
        if let Some(fit) = &analysis.regression {
            wtr.serialize(CorrelationRow {
                site: &analysis.label,
                n: fit.n,
                slope: fit.slope,
                intercept: fit.intercept,
                r: fit.r,
                r_squared: fit.r_squared,
                p_value: fit.p_value,
                std_err: fit.std_err,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write every site's daily file plus `correlation.csv` into `out_dir`.
pub fn export_analyses(analyses: &[SiteAnalysis], out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut written = Vec::new();
    for analysis in analyses {
        let path = out_dir.join(format!("{}_daily.csv", analysis.site.file_slug()));
        write_daily(&path, &daily_rows(analysis))
            .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    let path = out_dir.join("correlation.csv");
    write_correlations(&path, analyses).with_context(|| format!("writing {}", path.display()))?;
    written.push(path);
    Ok(written)
}

pub fn run_export(data_dir: &Path, out_dir: &Path, config: &PipelineConfig) -> anyhow::Result<()> {
    let analyses = run_pipeline(data_dir, config)
        .with_context(|| format!("analysing {}", data_dir.display()))?;
    let written = export_analyses(&analyses, out_dir)?;
    info!("Export complete. {} files written to {}", written.len(), out_dir.display());
    Ok(())
}
