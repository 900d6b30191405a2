use std::fmt::Write;

use serde::Serialize;

use crate::data::aggregate::{OccupancyGrid, Statistics, GRID_DAYS, GRID_HOURS};

// ---------------------------------------------------------------------------
// Plain-data rendering for the CLI host
// ---------------------------------------------------------------------------

/// Day-index of the first of each month on the 365-day grid.
const MONTH_STARTS: [usize; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Render the statistics plus a condensed hour-by-month view of the grid.
///
/// A month column is marked when any of its days is occupied at that hour,
/// so the full 365-column matrix stays readable in a terminal.
pub fn render_text(stats: &Statistics, grid: &OccupancyGrid) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Readings:        {}", stats.total_records);
    let _ = writeln!(
        out,
        "Matching:        {} ({:.1}%)",
        stats.matching_records, stats.percentage
    );
    let _ = writeln!(
        out,
        "Band:            {:.1} °C to {:.1} °C",
        stats.range_low, stats.range_high
    );
    match (stats.min_temp, stats.max_temp) {
        (Some(min), Some(max)) => {
            let _ = writeln!(out, "Data range:      {min:.1} °C to {max:.1} °C");
        }
        _ => {
            let _ = writeln!(out, "Data range:      no data");
        }
    }
    let _ = writeln!(out, "Occupied slots:  {}", grid.occupied_slots());

    out.push('\n');
    let _ = write!(out, "     ");
    for name in MONTH_NAMES {
        let _ = write!(out, " {name}");
    }
    out.push('\n');

    for hour in 0..GRID_HOURS {
        let _ = write!(out, " {hour:02}h ");
        for month in 0..12 {
            let start = MONTH_STARTS[month];
            let end = MONTH_STARTS.get(month + 1).copied().unwrap_or(GRID_DAYS);
            let occupied = (start..end).any(|day| grid.is_occupied(day, hour));
            let _ = write!(out, "  {} ", if occupied { '#' } else { '.' });
        }
        out.push('\n');
    }

    out
}

// ---------------------------------------------------------------------------
// JSON report – the machine-readable core → presentation interface
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Report<'a> {
    stats: &'a Statistics,
    /// Occupied `[day_index, hour_index]` cells, day-major.
    occupied: Vec<(usize, usize)>,
}

/// Serialize the statistics and occupied grid cells for an external renderer.
pub fn render_json(stats: &Statistics, grid: &OccupancyGrid) -> serde_json::Result<String> {
    let report = Report {
        stats,
        occupied: grid.occupied_cells().collect(),
    };
    serde_json::to_string_pretty(&report)
}
