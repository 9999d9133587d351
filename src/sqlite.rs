//! SQLite access to dump1090 flight databases.

use crate::query::build_flights_query;
use crate::types::{FlightRow, Result};
use log::info;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::Path;

/// Read-only handle on a flights database.
pub struct FlightDb {
    conn: Connection,
}

impl FlightDb {
    /// Open a database file read-only. The file must already exist; unlike
    /// a default SQLite open this never creates an empty database at a
    /// mistyped path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Stream every flight row, optionally restricted to a set of dates,
    /// through `f`. Each row is fully handled before the next one is
    /// fetched. Returns the number of rows processed.
    ///
    /// Decode failures (NULLs, unexpected column types) and errors from `f`
    /// abort the scan; there are no retries.
    pub fn for_each_flight<F>(&self, dates: Option<&[String]>, mut f: F) -> Result<u64>
    where
        F: FnMut(FlightRow) -> Result<()>,
    {
        let (sql, params) = build_flights_query(dates);
        info!("executing SQL \"{sql}\"");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params))?;
        let mut count = 0u64;
        while let Some(row) = rows.next()? {
            f(FlightRow::from_row(row)?)?;
            count += 1;
        }
        Ok(count)
    }
}
