use super::model::{Dataset, FilterCriteria, TemperatureReading};

// ---------------------------------------------------------------------------
// Matching predicate: rounded temperature within the tolerance band
// ---------------------------------------------------------------------------

/// Round to the nearest tenth of a degree, ties away from zero.
///
/// Both the reading and the target are rounded before comparison; the
/// tolerance is applied unrounded.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether a reading falls inside the criteria's matching window.
pub fn matches(reading: &TemperatureReading, criteria: &FilterCriteria) -> bool {
    let rounded = round_to_tenth(reading.temperature);
    let target = round_to_tenth(criteria.target);
    (rounded - target).abs() <= criteria.tolerance
}

/// Return indices of readings that pass the filter, in file order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .readings
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, criteria))
        .map(|(i, _)| i)
        .collect()
}
