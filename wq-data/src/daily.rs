//! Daily resampling.

use std::collections::BTreeMap;
use wq_core::{
    date_range::DateRange,
    series::{DailySeries, DailyValue, PointSeries},
};

/// Resample a point series to one mean per calendar day.
///
/// The output covers every day from the first to the last observation.
/// Missing values are left out of a day's mean; a day with no values at all
/// maps to `None`.
pub fn aggregate_daily(series: &PointSeries) -> DailySeries {
    let points = series.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return DailySeries::default();
    };

    let mut sums: BTreeMap<chrono::NaiveDate, (f64, u32)> = BTreeMap::new();
    for point in points {
        if let Some(value) = point.value {
            let entry = sums.entry(point.timestamp.date()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let entries = DateRange(first.timestamp.date(), last.timestamp.date())
        .map(|date| DailyValue {
            date,
            value: sums
                .get(&date)
                .map(|(sum, count)| sum / f64::from(*count)),
        })
        .collect();
    DailySeries::from_entries(entries)
}
