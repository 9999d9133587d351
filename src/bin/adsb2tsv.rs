//! adsb2tsv CLI - split ADS-B flight logs into per-date TSV files.

use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, info};
use std::path::PathBuf;
use std::process;

use adsb2tsv::query::parse_date_list;
use adsb2tsv::{
    export_database, Config, FileCache, FlightDb, RecordRouter, DEFAULT_FILE_LIMIT,
    DEFAULT_OUTPUT_ROOT, DEFAULT_TRIM_SIZE,
};

/// Database file used when none are given on the command line.
const DEFAULT_DATABASE: &str = "adsb_messages.db";

#[derive(Parser)]
#[command(name = "adsb2tsv")]
#[command(author, version, about = "Split ADS-B flight logs into per-date TSV files", long_about = None)]
struct Cli {
    /// SQLite database files to export
    #[arg(value_name = "DATABASE")]
    databases: Vec<PathBuf>,

    /// Comma-separated list of dates to export (YYYY-MM-DD)
    #[arg(short, long)]
    dates: Option<String>,

    /// Directory the TSV tree is written under
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log every file the exporter opens
    #[arg(long)]
    debug: bool,
}

fn init_logger(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> adsb2tsv::Result<()> {
    let config = Config::load()?;

    let output_root = cli
        .output
        .or(config.output_root)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT));
    let cache = FileCache::new(
        config.file_limit.unwrap_or(DEFAULT_FILE_LIMIT),
        config.trim_size.unwrap_or(DEFAULT_TRIM_SIZE),
    );
    let mut router = RecordRouter::new(output_root, cache);

    let dates = cli.dates.as_deref().map(parse_date_list);

    let databases = if cli.databases.is_empty() {
        vec![PathBuf::from(DEFAULT_DATABASE)]
    } else {
        cli.databases
    };

    let mut total = 0u64;
    for path in &databases {
        if !path.exists() {
            error!("unable to open {}", path.display());
            continue;
        }
        info!("opening {}", path.display());
        let db = FlightDb::open(path)?;
        total += export_database(&db, dates.as_deref(), &mut router)?;
    }

    println!("{} rows written to {} files", total, router.paths_created());
    Ok(())
}
