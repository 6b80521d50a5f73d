//! Daily-average time series charts.

use crate::{palette::site_color, ChartOptions};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::{ops::Range, path::Path};
use wq_core::{series::DailySeries, variable::Variable};

/// One line on a daily chart: legend label, series, palette index.
pub type LabelledSeries<'s> = (&'s str, &'s DailySeries, usize);

/// Observed values that fall inside the chart window.
fn visible(series: &DailySeries, options: &ChartOptions) -> Vec<(NaiveDate, f64)> {
    series
        .observed()
        .filter(|(date, _)| *date >= options.start && *date <= options.end)
        .collect()
}

/// Padded value range; a flat or empty series still gets a usable axis.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.1 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// Draw daily means as markers, one colour per series. More than one
/// series gets a legend.
pub fn render_daily_chart(
    path: &Path,
    title: &str,
    variable: Variable,
    series: &[LabelledSeries<'_>],
    options: &ChartOptions,
) -> anyhow::Result<()> {
    let points: Vec<(&str, Vec<(NaiveDate, f64)>, usize)> = series
        .iter()
        .map(|(label, s, index)| (*label, visible(s, options), *index))
        .collect();
    let y_range = padded_range(points.iter().flat_map(|(_, p, _)| p.iter().map(|(_, v)| *v)));

    let backend = SVGBackend::new(path, (options.width, options.height));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let date_range: RangedDate<NaiveDate> = (options.start..options.end).into();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20i32)
        .x_label_area_size(40u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(date_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(variable.axis_label())
        .x_label_formatter(&|d: &NaiveDate| d.format("%b %d").to_string())
        .draw()?;

    for (label, values, index) in &points {
        let color = site_color(*index);
        chart
            .draw_series(
                values
                    .iter()
                    .map(|(date, value)| Circle::new((*date, *value), 4, color.filled())),
            )?
            .label(*label)
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    if points.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wq_core::series::DailyValue;

    #[test]
    fn test_padded_range() {
        let range = padded_range([2.0, 4.0, 12.0].into_iter());
        assert!((range.start - 1.0).abs() < 1e-9);
        assert!((range.end - 13.0).abs() < 1e-9);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([5.0].into_iter()), 4.0..6.0);
    }

    #[test]
    fn test_visible_clips_to_window() {
        let options = ChartOptions::default();
        let series = DailySeries::from_entries(vec![
            DailyValue {
                date: NaiveDate::from_ymd_opt(2019, 1, 3).unwrap(),
                value: Some(1.0),
            },
            DailyValue {
                date: NaiveDate::from_ymd_opt(2019, 1, 4).unwrap(),
                value: Some(2.0),
            },
            DailyValue {
                date: NaiveDate::from_ymd_opt(2019, 1, 5).unwrap(),
                value: None,
            },
        ]);
        let points = visible(&series, &options);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].1, 2.0);
    }
}
