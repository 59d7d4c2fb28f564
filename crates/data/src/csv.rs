//! CSV loading for bundled reading exports
//!
//! Export format, one reading per line with a header row:
//!
//! ```csv
//! timestamp,heart_rate,spo2,temperature,steps
//! 1714060800000,72,97.5,36.6,120
//! ```
//!
//! Rows that fail to parse are logged and skipped; a damaged export never
//! aborts a load.

use crate::reading::WatchReading;
use pulsekit_core::asset::AssetReader;
use pulsekit_core::{Error, Result};
use tracing::{debug, warn};

/// Load readings from a named CSV asset
///
/// # Errors
///
/// Fails only when the asset itself cannot be opened; malformed rows are
/// skipped with a warning.
pub fn load_readings_csv(name: &str, reader: &dyn AssetReader) -> Result<Vec<WatchReading>> {
    let text = reader.open_string(name).map_err(|e| {
        let err = if e.is_not_found() {
            Error::file_not_found(name)
        } else {
            Error::io(e.to_string())
        };
        err.with_context(format!("While opening CSV asset {name}"))
    })?;

    let mut readings = Vec::new();
    // First line is the header
    for (index, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Ok(reading) => readings.push(reading),
            Err(reason) => {
                warn!(asset = name, row = index + 1, %reason, "skipping malformed CSV row");
            }
        }
    }

    debug!(asset = name, count = readings.len(), "loaded readings from CSV");
    Ok(readings)
}

fn parse_row(line: &str) -> std::result::Result<WatchReading, String> {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    if columns.len() < 5 {
        return Err(format!("expected 5 columns, got {}", columns.len()));
    }

    let timestamp_ms: i64 = columns[0]
        .parse()
        .map_err(|_| format!("bad timestamp '{}'", columns[0]))?;
    let heart_rate: u32 = columns[1]
        .parse()
        .map_err(|_| format!("bad heart_rate '{}'", columns[1]))?;
    let spo2: f32 = columns[2]
        .parse()
        .map_err(|_| format!("bad spo2 '{}'", columns[2]))?;
    let temperature: f32 = columns[3]
        .parse()
        .map_err(|_| format!("bad temperature '{}'", columns[3]))?;
    let steps: u32 = columns[4]
        .parse()
        .map_err(|_| format!("bad steps '{}'", columns[4]))?;

    Ok(WatchReading::new(timestamp_ms, heart_rate, spo2, temperature, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsekit_core::asset::StaticAssets;

    const SAMPLE: &str = "\
timestamp,heart_rate,spo2,temperature,steps
1714060800000,72,97.5,36.6,120
1714060860000,75,96.8,36.7,95
";

    #[test]
    fn test_loads_all_rows() {
        let assets = StaticAssets::new().with("smartwatch_data.csv", SAMPLE);
        let readings = load_readings_csv("smartwatch_data.csv", &assets).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].heart_rate, 72);
        assert_eq!(readings[1].timestamp_ms, 1_714_060_860_000);
    }

    #[test]
    fn test_skips_malformed_rows() {
        let csv = "\
timestamp,heart_rate,spo2,temperature,steps
not-a-number,72,97.5,36.6,120
1714060860000,75,96.8,36.7,95
1714060920000,short,row
";
        let assets = StaticAssets::new().with("partial.csv", csv);
        let readings = load_readings_csv("partial.csv", &assets).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].heart_rate, 75);
    }

    #[test]
    fn test_header_only_is_empty() {
        let assets = StaticAssets::new().with("empty.csv", "timestamp,heart_rate,spo2,temperature,steps\n");
        let readings = load_readings_csv("empty.csv", &assets).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_missing_asset_errors() {
        let assets = StaticAssets::new();
        assert!(load_readings_csv("absent.csv", &assets).is_err());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let csv = "timestamp,heart_rate,spo2,temperature,steps\n\n1714060800000,72,97.5,36.6,120\n\n";
        let assets = StaticAssets::new().with("blanks.csv", csv);
        let readings = load_readings_csv("blanks.csv", &assets).unwrap();
        assert_eq!(readings.len(), 1);
    }
}
