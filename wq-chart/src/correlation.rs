//! Chlorophyll vs oxygen scatter with the least-squares trendline.

use crate::{daily::padded_range, palette, ChartOptions};
use plotters::prelude::*;
use std::path::Path;
use wq_core::{series::MergedRecord, variable::Variable};
use wq_data::regression::Regression;

/// Scatter every day with both values and draw `fit` across the x range.
pub fn render_correlation_chart(
    path: &Path,
    label: &str,
    merged: &[MergedRecord],
    fit: &Regression,
    options: &ChartOptions,
) -> anyhow::Result<()> {
    let points: Vec<(f64, f64)> = merged.iter().filter_map(MergedRecord::pair).collect();
    let x_range = padded_range(points.iter().map(|(x, _)| *x));
    let trend = [
        (x_range.start, fit.predict(x_range.start)),
        (x_range.end, fit.predict(x_range.end)),
    ];
    let y_range = padded_range(
        points
            .iter()
            .map(|(_, y)| *y)
            .chain(trend.iter().map(|(_, y)| *y)),
    );

    let backend = SVGBackend::new(path, (options.height, options.height));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let title = format!("{} (r\u{b2} = {:.3})", label, fit.r_squared);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20i32)
        .x_label_area_size(40u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(Variable::Chlorophyll.axis_label())
        .y_desc(Variable::Oxygen.axis_label())
        .draw()?;

    chart.draw_series(LineSeries::new(trend, palette::TRENDLINE.stroke_width(2)))?;
    let color = palette::site_color(0);
    chart.draw_series(
        points
            .iter()
            .map(|(x, y)| Circle::new((*x, *y), 4, color.filled())),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wq_data::regression::correlate;

    #[test]
    fn test_render_correlation_chart() {
        let merged: Vec<MergedRecord> = (1..6)
            .map(|d| MergedRecord {
                date: NaiveDate::from_ymd_opt(2019, 1, d).unwrap(),
                chlorophyll: Some(d as f64),
                oxygen: if d == 3 { None } else { Some(10.0 - d as f64) },
            })
            .collect();
        let fit = correlate(&merged).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("correlation.svg");
        render_correlation_chart(&path, "Coast", &merged, &fit, &ChartOptions::default()).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<circle"));
    }
}
