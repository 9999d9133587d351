//! Basic export example for adsb2tsv.
//!
//! Run with: cargo run --example basic_export [DATABASE] [DATES]
//!
//! DATABASE defaults to adsb_messages.db in the current directory. DATES is
//! an optional comma-separated list of YYYY-MM-DD days to export.

use adsb2tsv::query::parse_date_list;
use adsb2tsv::{export_database, FileCache, FlightDb, RecordRouter};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get parameters from command line or use defaults
    let args: Vec<String> = env::args().collect();

    let database = args.get(1).map(|s| s.as_str()).unwrap_or("adsb_messages.db");
    let dates = args.get(2).map(|s| parse_date_list(s));

    println!("adsb2tsv Basic Export Example");
    println!("================================");
    println!("Database: {}", database);
    println!(
        "Dates:    {}",
        dates
            .as_ref()
            .map(|d| d.join(", "))
            .unwrap_or_else(|| "all".to_string())
    );
    println!();

    // Open the database read-only
    println!("Opening {}...", database);
    let db = FlightDb::open(database)?;

    // Route rows into a TSV tree under ./tsv
    let mut router = RecordRouter::new("tsv", FileCache::default());

    println!("Exporting...");
    let rows = export_database(&db, dates.as_deref(), &mut router)?;

    println!("\nExport complete!");
    println!("Rows written: {}", rows);
    println!("Files created: {}", router.paths_created());
    println!("Output tree: ./tsv/<date>/");

    Ok(())
}
