// ---------------------------------------------------------------------------
// TemperatureReading – one row of the export
// ---------------------------------------------------------------------------

/// A single hourly reading (one valid line of the source export).
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    /// Original timestamp token, e.g. `20240101T0000`.
    pub timestamp_raw: String,
    /// Outdoor temperature in °C. Always finite.
    pub temperature: f64,
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u8,
    /// Calendar day, 1–31.
    pub day: u8,
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Days elapsed since December 31 of the previous year, 1–366.
    pub day_of_year: u16,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded export
// ---------------------------------------------------------------------------

/// All readings of one export, in file order, with the pre-computed
/// temperature range. Replaced wholesale on reload, never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub readings: Vec<TemperatureReading>,
    /// `(min, max)` over every reading; `None` for an empty dataset.
    pub temperature_range: Option<(f64, f64)>,
}

impl Dataset {
    /// Build the dataset and its temperature range from parsed readings.
    pub fn from_readings(readings: Vec<TemperatureReading>) -> Self {
        let temperature_range = readings.iter().map(|r| r.temperature).fold(
            None,
            |range: Option<(f64, f64)>, t| match range {
                Some((min, max)) => Some((min.min(t), max.max(t))),
                None => Some((t, t)),
            },
        );
        Dataset {
            readings,
            temperature_range,
        }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – the active matching window
// ---------------------------------------------------------------------------

pub const DEFAULT_TARGET: f64 = 24.0;
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Target temperature and tolerance defining the inclusive matching window
/// `[target - tolerance, target + tolerance]`.
///
/// A negative tolerance is accepted literally and simply never matches;
/// callers wanting validation enforce it themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub target: f64,
    pub tolerance: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            target: DEFAULT_TARGET,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl FilterCriteria {
    pub fn new(target: f64, tolerance: f64) -> Self {
        FilterCriteria { target, tolerance }
    }

    /// The unrounded `(low, high)` bounds of the matching window.
    pub fn window(&self) -> (f64, f64) {
        (self.target - self.tolerance, self.target + self.tolerance)
    }
}
