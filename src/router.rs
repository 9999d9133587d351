//! Routes decoded flight rows into per-date, per-category TSV files.
//!
//! Every row lands in the day's all-points file and in a file named after
//! its callsign; rows whose callsign looks like an airline flight number
//! additionally land in a per-airline file. Writes go through a
//! [`FileCache`] so a day with thousands of callsigns does not pin
//! thousands of open handles.

use crate::cache::FileCache;
use crate::types::{FlightRow, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default directory that receives the date-partitioned output tree.
pub const DEFAULT_OUTPUT_ROOT: &str = "tsv";

/// Extension used for every output file.
const TSV_EXT: &str = "tsv";

/// Whether a callsign looks like an airline flight number: three uppercase
/// ASCII letters followed by a digit, at the start of the string.
pub fn is_airline_callsign(callsign: &str) -> bool {
    let bytes = callsign.as_bytes();
    bytes.len() >= 4
        && bytes[..3].iter().all(u8::is_ascii_uppercase)
        && bytes[3].is_ascii_digit()
}

/// The lowercased three-letter airline identifier, when the callsign looks
/// like an airline flight number.
pub fn airline_ident(callsign: &str) -> Option<String> {
    is_airline_callsign(callsign).then(|| callsign[..3].to_ascii_lowercase())
}

/// Writes each flight row into the output files its date and callsign
/// select.
///
/// The router owns the handle cache it writes through; construct one per
/// run and feed it every database, so a path revisited later in the run
/// keeps appending instead of starting over.
pub struct RecordRouter {
    output_root: PathBuf,
    files: FileCache,
}

impl RecordRouter {
    /// Create a router writing under `output_root` through `files`.
    pub fn new(output_root: impl Into<PathBuf>, files: FileCache) -> Self {
        Self {
            output_root: output_root.into(),
            files,
        }
    }

    /// Route one row: the all-points file always, the airline file when the
    /// callsign matches, and the per-callsign file always.
    ///
    /// The written line carries the callsign exactly as stored, even though
    /// the file name uses a trimmed, lowercased form.
    pub fn route(&mut self, row: &FlightRow) -> Result<()> {
        let path = self.allpoints_path(&row.date_parsed);
        self.append(&path, row)?;

        if let Some(ident) = airline_ident(&row.callsign) {
            let path = self.category_path(&row.date_parsed, &ident);
            self.append(&path, row)?;
        }

        let callsign = row.callsign.trim_end().to_lowercase();
        let path = self.category_path(&row.date_parsed, &callsign);
        self.append(&path, row)
    }

    /// Number of distinct output files created so far.
    pub fn paths_created(&self) -> usize {
        self.files.seen_count()
    }

    fn append(&mut self, path: &Path, row: &FlightRow) -> Result<()> {
        let out = self.files.get(path)?;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.callsign, row.parsed_time, row.lon, row.lat, row.altitude
        )?;
        Ok(())
    }

    fn allpoints_path(&self, date: &str) -> PathBuf {
        self.output_root
            .join(date)
            .join(format!("allpoints_{date}.{TSV_EXT}"))
    }

    fn category_path(&self, date: &str, category: &str) -> PathBuf {
        self.output_root
            .join(date)
            .join(format!("{category}_{date}.{TSV_EXT}"))
    }
}
