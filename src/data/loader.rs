use std::path::{Path, PathBuf};

use thiserror::Error;
use time::{Date, Month};

use super::model::{Dataset, TemperatureReading};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to obtain the raw export text. Parsing itself never errors:
/// malformed lines are routine data cleaning and are dropped silently.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// How the raw export text is split into records.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Field delimiter, a single byte.
    pub delimiter: u8,
    /// Number of metadata lines skipped unconditionally at the top.
    pub header_lines: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            delimiter: b',',
            header_lines: 10,
        }
    }
}

/// Read an export file from disk and parse it.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse_export(&text);
    log::info!(
        "Loaded {} readings from {}",
        dataset.len(),
        path.display()
    );
    if let Some((min, max)) = dataset.temperature_range {
        log::debug!("Temperature range {min:.2} °C to {max:.2} °C");
    }
    Ok(dataset)
}

/// Parse an in-memory export with the default comma delimiter and a
/// 10-line metadata preamble.
pub fn parse_export(text: &str) -> Dataset {
    parse_export_with(text, &ParseOptions::default())
}

/// Parse an in-memory export.
///
/// The first `header_lines` lines are skipped regardless of content. Each
/// remaining record is `TIMESTAMP<delim>TEMPERATURE`; additional fields are
/// ignored. Records that fail numeric, structural, or calendar parsing are
/// dropped. An empty or header-only export yields an empty dataset.
pub fn parse_export_with(text: &str, options: &ParseOptions) -> Dataset {
    let body = skip_lines(text, options.header_lines);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(options.delimiter)
        .from_reader(body.as_bytes());

    let mut readings = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if let Some(reading) = reading_from_record(&record) {
            readings.push(reading);
        }
    }

    Dataset::from_readings(readings)
}

// ---------------------------------------------------------------------------
// Record parsing
// ---------------------------------------------------------------------------

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

fn reading_from_record(record: &csv::StringRecord) -> Option<TemperatureReading> {
    let timestamp = record.get(0)?;
    let temperature: f64 = record.get(1)?.parse().ok()?;
    // A literal `NaN` or `inf` token parses as f64 but is not a reading.
    if !temperature.is_finite() {
        return None;
    }

    let (year, month, day, hour, day_of_year) = parse_timestamp(timestamp)?;

    Some(TemperatureReading {
        timestamp_raw: timestamp.to_string(),
        temperature,
        year,
        month,
        day,
        hour,
        day_of_year,
    })
}

/// Decode a fixed-width `YYYYMMDDxHHMM…` token. The separator at offset 8
/// (usually `T`) is ignored, as is anything past the hour field.
///
/// Fields that do not form a real calendar date, or an hour above 23, reject
/// the token; there is no rollover.
fn parse_timestamp(token: &str) -> Option<(i32, u8, u8, u8, u16)> {
    let year: i32 = token.get(0..4)?.parse().ok()?;
    let month: u8 = token.get(4..6)?.parse().ok()?;
    let day: u8 = token.get(6..8)?.parse().ok()?;
    let hour: u8 = token.get(9..11)?.parse().ok()?;

    if hour > 23 {
        return None;
    }
    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;

    Some((year, month, day, hour, date.ordinal()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ten metadata lines followed by the given data lines.
    fn export(data_lines: &[&str]) -> String {
        let mut text = String::new();
        for i in 0..10 {
            text.push_str(&format!("metadata line {i}\n"));
        }
        for line in data_lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn parses_basic_export() {
        let ds = parse_export(&export(&["20240101T0000,23.4", "20240101T0100,25.1"]));
        assert_eq!(ds.len(), 2);

        let first = &ds.readings[0];
        assert_eq!(first.timestamp_raw, "20240101T0000");
        assert_eq!(first.temperature, 23.4);
        assert_eq!(
            (first.year, first.month, first.day, first.hour),
            (2024, 1, 1, 0)
        );
        assert_eq!(first.day_of_year, 1);

        assert_eq!(ds.readings[1].hour, 1);
        assert_eq!(ds.temperature_range, Some((23.4, 25.1)));
    }

    #[test]
    fn preamble_is_skipped_regardless_of_content() {
        // Lines that would parse as data must still be skipped in the preamble.
        let mut text = String::new();
        for _ in 0..10 {
            text.push_str("20240101T0000,20.0\n");
        }
        text.push_str("20240601T1200,21.5\n");

        let ds = parse_export(&text);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.readings[0].month, 6);
        assert_eq!(ds.readings[0].hour, 12);
    }

    #[test]
    fn header_only_or_empty_input_yields_empty_dataset() {
        assert!(parse_export("").is_empty());
        assert!(parse_export(&export(&[])).is_empty());
        assert!(parse_export("one line\ntwo lines\n").is_empty());
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let ds = parse_export(&export(&[
            "20240101T0000,23.4",
            "",                       // blank
            "no delimiter here",      // structural
            "20240101T0100,n/a",      // non-numeric temperature
            "20240101T0200,NaN",      // parses as f64 but not finite
            "2024,19.0",              // timestamp too short
            "20241301T0000,19.0",     // month 13: rejected, no rollover
            "20240230T0000,19.0",     // February 30th
            "20240101T9900,19.0",     // hour out of range
            "20240101T0300,19.5",
        ]));
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.readings[1].hour, 3);
    }

    #[test]
    fn extra_fields_are_ignored() {
        // The temperature is the second field, whatever follows it.
        let ds = parse_export(&export(&["20240101T0000,23.4,junk,more"]));
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.readings[0].temperature, 23.4);
    }

    #[test]
    fn negative_temperatures_parse() {
        let ds = parse_export(&export(&["20240115T0600,-12.75"]));
        assert_eq!(ds.readings[0].temperature, -12.75);
    }

    #[test]
    fn day_of_year_honors_leap_years() {
        let ds = parse_export(&export(&[
            "20240229T0000,5.0",
            "20241231T0000,5.0",
            "20231231T0000,5.0",
        ]));
        assert_eq!(ds.readings[0].day_of_year, 60);
        assert_eq!(ds.readings[1].day_of_year, 366);
        assert_eq!(ds.readings[2].day_of_year, 365);
    }

    #[test]
    fn separator_at_offset_eight_is_arbitrary() {
        // Some exports use a digit there instead of `T`.
        let ds = parse_export(&export(&["202401010000,23.4"]));
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.readings[0].hour, 0);
    }

    #[test]
    fn custom_delimiter_and_preamble() {
        let options = ParseOptions {
            delimiter: b';',
            header_lines: 2,
        };
        let text = "meta\nmeta\n20240101T0000;23.4\n";
        let ds = parse_export_with(text, &options);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn record_count_bounded_by_data_lines() {
        let text = export(&["20240101T0000,23.4", "garbage", "20240101T0100,24.0"]);
        let line_count = text.lines().count();
        let ds = parse_export(&text);
        assert!(ds.len() <= line_count.saturating_sub(10));
    }

    #[test]
    fn load_file_reports_missing_path() {
        let err = load_file(Path::new("/nonexistent/dataexport.csv")).unwrap_err();
        assert!(err.to_string().contains("dataexport.csv"));
    }
}
