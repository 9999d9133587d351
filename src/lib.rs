//! # adsb2tsv
//!
//! Splits flight position logs collected from a dump1090 feed into
//! per-date, per-callsign TSV files.
//!
//! Rows are read from the `flights` table of one or more SQLite databases
//! and appended to three kinds of files under an output root:
//!
//! - `<root>/<date>/allpoints_<date>.tsv` with every row for that date,
//! - `<root>/<date>/<airline>_<date>.tsv` for callsigns that look like an
//!   airline flight number (`ual` for `UAL123`),
//! - `<root>/<date>/<callsign>_<date>.tsv` with one file per callsign.
//!
//! Each line is tab separated: callsign, timestamp, longitude, latitude,
//! altitude. Open output handles live in a bounded [`FileCache`] so a
//! large export does not exhaust file descriptors, and files evicted from
//! the cache are reopened in append mode when their path comes up again.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adsb2tsv::{export_database, FileCache, FlightDb, RecordRouter};
//!
//! fn main() -> adsb2tsv::Result<()> {
//!     let db = FlightDb::open("adsb_messages.db")?;
//!     let mut router = RecordRouter::new("tsv", FileCache::default());
//!
//!     let rows = export_database(&db, None, &mut router)?;
//!     println!("{} rows written to {} files", rows, router.paths_created());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Defaults can be stored in a platform-specific config file:
//! - Linux: `~/.config/adsb2tsv/settings.conf`
//! - macOS: `~/Library/Application Support/adsb2tsv/settings.conf`
//! - Windows: `%LOCALAPPDATA%\adsb2tsv\settings.conf`
//!
//! ```ini
//! [output]
//! root = tsv
//!
//! [cache]
//! limit = 1000
//! trim_size = 100
//! ```

pub mod cache;
pub mod config;
pub mod query;
pub mod router;
pub mod sqlite;
pub mod types;

// Re-export main types for convenience
pub use cache::{FileCache, OpenMode, DEFAULT_FILE_LIMIT, DEFAULT_TRIM_SIZE};
pub use config::Config;
pub use query::{build_flights_query, parse_date_list, FLIGHTS_TABLE};
pub use router::{airline_ident, is_airline_callsign, RecordRouter, DEFAULT_OUTPUT_ROOT};
pub use sqlite::FlightDb;
pub use types::{ExportError, FlightRow, Result, FLIGHTS_COLUMNS};

/// Stream every matching row of `db` through `router`.
///
/// Returns the number of rows written. The router and the cache inside it
/// carry over between calls, so exporting several databases into the same
/// tree appends instead of overwriting.
pub fn export_database(
    db: &FlightDb,
    dates: Option<&[String]>,
    router: &mut RecordRouter,
) -> Result<u64> {
    db.for_each_flight(dates, |row| router.route(&row))
}
