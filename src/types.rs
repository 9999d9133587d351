//! Core types for flight exports: errors, rows, and column layout.

use rusqlite::Row;
use thiserror::Error;

/// Error types for export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Columns selected from the flights table, in the order [`FlightRow`]
/// decodes them. The last entry derives the partition date from the row
/// timestamp.
pub const FLIGHTS_COLUMNS: &[&str] = &[
    "callsign",
    "lon",
    "lat",
    "altitude",
    "parsed_time",
    "date(parsed_time) AS date_parsed",
];

/// One decoded row from the flights table.
///
/// `altitude` is an `f64` because dump1090 stream parsers store it as either
/// INTEGER or REAL depending on the message; both decode into a float, and
/// integral values print without a fractional part.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRow {
    /// Flight identifier as transmitted (e.g. "UAL123"), possibly padded
    /// with trailing whitespace.
    pub callsign: String,

    /// Longitude in degrees.
    pub lon: f64,

    /// Latitude in degrees.
    pub lat: f64,

    /// Altitude in feet.
    pub altitude: f64,

    /// Timestamp of the position report, as stored ("YYYY-MM-DDTHH:MM:SS").
    pub parsed_time: String,

    /// Date portion of `parsed_time`, derived by the query ("YYYY-MM-DD").
    pub date_parsed: String,
}

impl FlightRow {
    /// Decode a result row positionally, matching [`FLIGHTS_COLUMNS`] order.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            callsign: row.get(0)?,
            lon: row.get(1)?,
            lat: row.get(2)?,
            altitude: row.get(3)?,
            parsed_time: row.get(4)?,
            date_parsed: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_from_row_decodes_positionally() {
        let conn = Connection::open_in_memory().unwrap();
        let row = conn
            .query_row(
                "SELECT 'UAL123', -122.1, 37.5, 35000, '2021-01-01T10:00:00', '2021-01-01'",
                [],
                FlightRow::from_row,
            )
            .unwrap();

        assert_eq!(row.callsign, "UAL123");
        assert_eq!(row.lon, -122.1);
        assert_eq!(row.lat, 37.5);
        // INTEGER storage decodes into the float field
        assert_eq!(row.altitude, 35000.0);
        assert_eq!(row.parsed_time, "2021-01-01T10:00:00");
        assert_eq!(row.date_parsed, "2021-01-01");
    }

    #[test]
    fn test_from_row_rejects_null_callsign() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.query_row(
            "SELECT NULL, -122.1, 37.5, 35000, '2021-01-01T10:00:00', '2021-01-01'",
            [],
            FlightRow::from_row,
        );

        assert!(result.is_err());
    }
}
