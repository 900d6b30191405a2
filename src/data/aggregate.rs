use serde::Serialize;

use super::filter::{filtered_indices, round_to_tenth};
use super::model::{Dataset, FilterCriteria, TemperatureReading};

pub const GRID_DAYS: usize = 365;
pub const GRID_HOURS: usize = 24;

// ---------------------------------------------------------------------------
// OccupancyGrid – 365 days × 24 hours existence matrix
// ---------------------------------------------------------------------------

/// Fixed 365×24 boolean matrix: day index 0–364 maps to day-of-year 1–365.
/// A cell records existence of at least one matching reading, not a count.
/// Readings on day-of-year 366 stay in the filtered set and statistics but
/// never populate a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl OccupancyGrid {
    pub fn new() -> Self {
        OccupancyGrid {
            cells: vec![false; GRID_DAYS * GRID_HOURS],
        }
    }

    fn mark(&mut self, day_of_year: u16, hour: u8) {
        if (1..=GRID_DAYS as u16).contains(&day_of_year) && (hour as usize) < GRID_HOURS {
            self.cells[(day_of_year as usize - 1) * GRID_HOURS + hour as usize] = true;
        }
    }

    /// Whether the slot holds at least one matching reading. Out-of-range
    /// indices answer `false`.
    pub fn is_occupied(&self, day_index: usize, hour_index: usize) -> bool {
        if day_index >= GRID_DAYS || hour_index >= GRID_HOURS {
            return false;
        }
        self.cells[day_index * GRID_HOURS + hour_index]
    }

    /// Number of occupied slots.
    pub fn occupied_slots(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied `(day_index, hour_index)` cells in day-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| (i / GRID_HOURS, i % GRID_HOURS))
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Summary figures recomputed alongside the grid on every filter change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_records: usize,
    pub matching_records: usize,
    /// `matching / total * 100`, one decimal; 0.0 for an empty dataset.
    pub percentage: f64,
    /// Minimum over the entire dataset, not the filtered subset.
    pub min_temp: Option<f64>,
    /// Maximum over the entire dataset, not the filtered subset.
    pub max_temp: Option<f64>,
    /// Lower bound of the matching window, unrounded.
    pub range_low: f64,
    /// Upper bound of the matching window, unrounded.
    pub range_high: f64,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Output of one aggregation pass: matching readings (as indices into the
/// dataset, file order), the occupancy grid, and summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub matches: Vec<usize>,
    pub grid: OccupancyGrid,
    pub stats: Statistics,
}

impl Aggregate {
    /// The matching readings, read-only, in file order.
    pub fn readings<'a>(
        &'a self,
        dataset: &'a Dataset,
    ) -> impl Iterator<Item = &'a TemperatureReading> + 'a {
        self.matches.iter().map(|&i| &dataset.readings[i])
    }

    /// Matching readings for one grid slot, for a detail / hover view.
    pub fn readings_at<'a>(
        &'a self,
        dataset: &'a Dataset,
        day_index: usize,
        hour_index: usize,
    ) -> Vec<&'a TemperatureReading> {
        self.readings(dataset)
            .filter(|r| {
                r.day_of_year as usize == day_index + 1 && r.hour as usize == hour_index
            })
            .collect()
    }
}

/// Filter the dataset against the criteria and derive the occupancy grid and
/// statistics. Pure: identical inputs yield identical output, and no
/// criteria value is an error.
pub fn aggregate(dataset: &Dataset, criteria: &FilterCriteria) -> Aggregate {
    let matches = filtered_indices(dataset, criteria);

    let mut grid = OccupancyGrid::new();
    for &i in &matches {
        let r = &dataset.readings[i];
        grid.mark(r.day_of_year, r.hour);
    }

    let total = dataset.len();
    let percentage = if total == 0 {
        0.0
    } else {
        round_to_tenth(matches.len() as f64 / total as f64 * 100.0)
    };
    let (range_low, range_high) = criteria.window();
    let stats = Statistics {
        total_records: total,
        matching_records: matches.len(),
        percentage,
        min_temp: dataset.temperature_range.map(|(min, _)| min),
        max_temp: dataset.temperature_range.map(|(_, max)| max),
        range_low,
        range_high,
    };

    Aggregate {
        matches,
        grid,
        stats,
    }
}
