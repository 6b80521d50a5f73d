//! As-of join of a site's two daily series.

use wq_core::series::{DailySeries, MergedRecord};

/// Merge the oxygen series onto the chlorophyll timeline.
///
/// Every chlorophyll day appears once in the output. Its oxygen value comes
/// from the latest oxygen entry dated on or before that day, whatever that
/// entry holds (including a missing marker). Days before the first oxygen
/// entry get `None`.
pub fn merge_asof(chlorophyll: &DailySeries, oxygen: &DailySeries) -> Vec<MergedRecord> {
    chlorophyll
        .entries()
        .iter()
        .map(|entry| MergedRecord {
            date: entry.date,
            chlorophyll: entry.value,
            oxygen: oxygen.at_or_before(entry.date).and_then(|o| o.value),
        })
        .collect()
}
