//! Data processing for chlorophyll and dissolved oxygen readings.
//!
//! This crate turns loaded datasets into daily averages, merges the two
//! variables of a site, and fits the chlorophyll/oxygen regression.
//!
//! Stages, in pipeline order:
//! - `depth`: drops readings taken below the shallow-water band.
//! - `temporal`: pairs each value with its parsed timestamp.
//! - `daily`: dense daily means.
//! - `pairing`: groups datasets by site before anything is merged.
//! - `merge`: as-of join of the oxygen series onto the chlorophyll days.
//! - `regression`: ordinary least squares and r².
//! - `pipeline`: runs the stages for every site in a directory.

pub mod daily;
pub mod merge;
pub mod pairing;
pub mod pipeline;
pub mod regression;

/// Depth-tag parsing and the shallow-water filter.
pub mod depth {
    use log::debug;
    use wq_core::reading::Dataset;

    /// Readings at or deeper than this many feet are dropped by default.
    pub const DEFAULT_MAX_DEPTH_FT: u32 = 10;

    /// Parse a tag such as "-5 ft" or "+12ft" into an absolute depth in feet.
    ///
    /// Returns `None` for anything else: blank cells, decimals, other units.
    /// Depths too large for a `u32` saturate to `u32::MAX`.
    pub fn parse_depth_ft(tag: &str) -> Option<u32> {
        let lowered = tag.trim().to_lowercase();
        let number = lowered.strip_suffix("ft")?.trim_end();
        let digits = number.strip_prefix(['-', '+']).unwrap_or(number);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // all digits, so the parse can only fail on overflow
        Some(
            digits
                .parse::<u64>()
                .map_or(u32::MAX, |d| u32::try_from(d).unwrap_or(u32::MAX)),
        )
    }

    /// True when the reading belongs to the shallow band. Tags that can't be
    /// parsed are kept.
    pub fn is_shallow(tag: &str, max_depth_ft: u32) -> bool {
        match parse_depth_ft(tag) {
            Some(depth) => depth < max_depth_ft,
            None => true,
        }
    }

    /// Copy of `dataset` without readings at or below `max_depth_ft`.
    pub fn filter_shallow(dataset: &Dataset, max_depth_ft: u32) -> Dataset {
        let filtered = dataset.retain_readings(|r| is_shallow(&r.depth_tag, max_depth_ft));
        debug!(
            "depth: {} kept {} of {} readings shallower than {} ft",
            dataset.path.display(),
            filtered.len(),
            dataset.len(),
            max_depth_ft
        );
        filtered
    }

}

/// Building point-in-time series from raw readings.
pub mod temporal {
    use wq_core::{
        error::{PipelineError, Result},
        reading::Dataset,
        series::{PointSeries, TimedValue},
    };
    use wq_utils::dates::parse_datetime;

    /// Pair every reading's value with its parsed timestamp.
    ///
    /// A single unparseable timestamp fails the whole dataset.
    pub fn index_by_datetime(dataset: &Dataset) -> Result<PointSeries> {
        let points = dataset
            .readings
            .iter()
            .map(|r| {
                let timestamp =
                    parse_datetime(&r.timestamp).map_err(|source| PipelineError::DateTimeParse {
                        path: dataset.path.clone(),
                        line: r.line,
                        source,
                    })?;
                Ok(TimedValue {
                    timestamp,
                    value: r.value,
                })
            })
            .collect::<Result<Vec<TimedValue>>>()?;
        Ok(PointSeries::new(points))
    }

}
