//! Comma-separated values parser

use ::csv::{ReaderBuilder, Trim};
use log::debug;

use super::Grid;

/// Parse comma-separated values
///
/// Records may have differing lengths and there is no header row. Double-quoted
/// fields are honoured. Input where no record has at least two fields is not
/// treated as a table, so plain prose yields an empty grid.
pub fn parse_csv_table(input: &str) -> Grid {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let mut grid: Grid = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                debug!("csv: giving up on malformed input: {}", err);
                return Vec::new();
            }
        };
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        grid.push(record.iter().map(str::to_string).collect());
    }

    if grid.iter().all(|row| row.len() < 2) {
        debug!("csv: no multi-column record, not a table");
        return Vec::new();
    }

    grid
}
