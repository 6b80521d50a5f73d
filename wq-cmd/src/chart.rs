use anyhow::{bail, Context};
use std::path::Path;
use wq_chart::{render_all, ChartOptions};
use wq_core::site::SiteLocation;
use wq_data::pipeline::{run_pipeline, PipelineConfig};
use wq_utils::dates::parse_date;

/// Chart options with the time axis overridden by `start` / `end`.
pub fn chart_options(start: Option<&str>, end: Option<&str>) -> anyhow::Result<ChartOptions> {
    let mut options = ChartOptions::default();
    if let Some(start) = start {
        options.start = parse_date(start).with_context(|| format!("--start {}", start))?;
    }
    if let Some(end) = end {
        options.end = parse_date(end).with_context(|| format!("--end {}", end))?;
    }
    if options.start > options.end {
        bail!(
            "chart window starts after it ends ({} > {})",
            options.start,
            options.end
        );
    }
    Ok(options)
}

pub fn run_chart(
    data_dir: &Path,
    out_dir: &Path,
    config: &PipelineConfig,
    sites: &[SiteLocation],
    start: Option<&str>,
    end: Option<&str>,
) -> anyhow::Result<()> {
    let options = chart_options(start, end)?;
    let analyses = run_pipeline(data_dir, config)
        .with_context(|| format!("analysing {}", data_dir.display()))?;
    let written = render_all(&analyses, sites, out_dir, &options)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_chart_options_defaults() {
        assert_eq!(chart_options(None, None).unwrap(), ChartOptions::default());
    }

    #[test]
    fn test_chart_options_override() {
        let options = chart_options(Some("2019-02-01"), Some("02/15/2019")).unwrap();
        assert_eq!(options.start, NaiveDate::from_ymd_opt(2019, 2, 1).unwrap());
        assert_eq!(options.end, NaiveDate::from_ymd_opt(2019, 2, 15).unwrap());
    }

    #[test]
    fn test_chart_options_rejects_inverted_window() {
        assert!(chart_options(Some("2019-03-01"), Some("2019-02-01")).is_err());
        assert!(chart_options(Some("yesterday"), None).is_err());
    }
}
