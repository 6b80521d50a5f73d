use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single timestamped value. `None` is the missing-value marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedValue {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// Point-in-time series ordered by timestamp.
///
/// Equal timestamps are kept, in the order they were read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSeries(Vec<TimedValue>);

impl PointSeries {
    /// Build from unordered points; the sort is stable so duplicates keep
    /// their input order.
    pub fn new(mut points: Vec<TimedValue>) -> PointSeries {
        points.sort_by_key(|p| p.timestamp);
        PointSeries(points)
    }

    pub fn points(&self) -> &[TimedValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The value recorded for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// One value per day, ordered by date with at most one entry per day.
///
/// The daily aggregator always produces a dense series; series built by
/// hand with [`DailySeries::from_entries`] may have gaps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries(Vec<DailyValue>);

impl DailySeries {
    /// Build from entries in any order. When a day appears more than once
    /// the last entry wins.
    pub fn from_entries(mut entries: Vec<DailyValue>) -> DailySeries {
        entries.sort_by_key(|e| e.date);
        let mut deduped: Vec<DailyValue> = Vec::with_capacity(entries.len());
        for entry in entries {
            match deduped.last_mut() {
                Some(last) if last.date == entry.date => *last = entry,
                _ => deduped.push(entry),
            }
        }
        DailySeries(deduped)
    }

    pub fn entries(&self) -> &[DailyValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The latest entry dated at or before `date`.
    pub fn at_or_before(&self, date: NaiveDate) -> Option<&DailyValue> {
        let idx = self.0.partition_point(|e| e.date <= date);
        idx.checked_sub(1).map(|i| &self.0[i])
    }

    /// Entries that hold a value.
    pub fn observed(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.0.iter().filter_map(|e| e.value.map(|v| (e.date, v)))
    }

    /// Each day as a midnight point, so a daily series can be fed back into
    /// the aggregator.
    pub fn to_point_series(&self) -> PointSeries {
        PointSeries::new(
            self.0
                .iter()
                .map(|e| TimedValue {
                    timestamp: e.date.and_time(chrono::NaiveTime::MIN),
                    value: e.value,
                })
                .collect(),
        )
    }
}

/// One day of a site's merged chlorophyll and oxygen values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub date: NaiveDate,
    pub chlorophyll: Option<f64>,
    pub oxygen: Option<f64>,
}

impl MergedRecord {
    /// Both values, when both are present and finite.
    pub fn pair(&self) -> Option<(f64, f64)> {
        match (self.chlorophyll, self.oxygen) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}
