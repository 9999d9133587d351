//! SQL construction for the flights table.
//!
//! Filter values are bound as parameters; nothing from the command line is
//! spliced into the SQL text.

use crate::types::FLIGHTS_COLUMNS;
use chrono::NaiveDate;
use log::warn;
use rusqlite::types::Value;

/// The table written by the dump1090 stream parser.
pub const FLIGHTS_TABLE: &str = "flights";

/// Build the projection over the flights table, optionally restricted to a
/// set of dates.
///
/// Returns the SQL text and the values to bind, one per date. Matching is
/// exact and case-sensitive against the derived `date_parsed` column (SQLite
/// resolves the result-column alias inside WHERE). An empty date list
/// selects nothing.
pub fn build_flights_query(dates: Option<&[String]>) -> (String, Vec<Value>) {
    let mut sql = format!(
        "SELECT {} FROM {}",
        FLIGHTS_COLUMNS.join(", "),
        FLIGHTS_TABLE
    );
    let mut params: Vec<Value> = Vec::new();

    match dates {
        Some([]) => sql.push_str(" WHERE 1 = 0"),
        Some(dates) => {
            let placeholders = vec!["?"; dates.len()].join(", ");
            sql.push_str(&format!(" WHERE date_parsed IN ({placeholders})"));
            params.extend(dates.iter().cloned().map(Value::Text));
        }
        None => {}
    }

    (sql, params)
}

/// Split a comma separated date list as given on the command line.
///
/// Entries are passed through untouched so filtering stays an exact string
/// match; anything that does not look like a YYYY-MM-DD date is reported,
/// since it can never match a derived date.
pub fn parse_date_list(arg: &str) -> Vec<String> {
    let dates: Vec<String> = arg.split(',').map(str::to_string).collect();
    for date in &dates {
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            warn!("date filter {date:?} is not a YYYY-MM-DD date and will match nothing");
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_without_filter() {
        let (sql, params) = build_flights_query(None);

        assert_eq!(
            sql,
            "SELECT callsign, lon, lat, altitude, parsed_time, \
             date(parsed_time) AS date_parsed FROM flights"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_query_with_dates_binds_one_value_each() {
        let dates = vec!["2021-01-01".to_string(), "2021-01-02".to_string()];
        let (sql, params) = build_flights_query(Some(&dates));

        assert!(sql.ends_with("WHERE date_parsed IN (?, ?)"));
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Value::Text("2021-01-01".into()));
        assert_eq!(params[1], Value::Text("2021-01-02".into()));
    }

    #[test]
    fn test_empty_date_list_selects_nothing() {
        let (sql, params) = build_flights_query(Some(&[]));

        assert!(sql.ends_with("WHERE 1 = 0"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_date_values_never_reach_the_sql_text() {
        let dates = vec!["2021-01-01') OR ('1'='1".to_string()];
        let (sql, params) = build_flights_query(Some(&dates));

        assert!(sql.ends_with("WHERE date_parsed IN (?)"));
        assert_eq!(params[0], Value::Text("2021-01-01') OR ('1'='1".into()));
    }

    #[test]
    fn test_parse_date_list_splits_on_commas() {
        let dates = parse_date_list("2021-01-01,2021-01-02");

        assert_eq!(dates, ["2021-01-01", "2021-01-02"]);
    }

    #[test]
    fn test_parse_date_list_keeps_entries_verbatim() {
        // no trimming: the filter is an exact match, spaces and all
        let dates = parse_date_list("2021-01-01, 2021-01-02");

        assert_eq!(dates, ["2021-01-01", " 2021-01-02"]);
    }
}
