//! Table Parsers
//!
//! Converts raw tabular text into a normalized [`Grid`]: an ordered list of
//! rows, each an ordered list of cell strings. Rows may be ragged.
//!
//! Three independent parsers are provided:
//! - Markdown pipe tables
//! - HTML `<table>` markup
//! - Comma-separated values
//!
//! None of them fail: malformed or empty input yields an empty grid. The
//! [`detect`] module orders them into a fallback chain.
//!
//! # Example
//!
//! ```rust
//! use tabledraw::table::parse_markdown_table;
//!
//! let grid = parse_markdown_table("| A | B |\n|---|---|\n| 1 | 2 |");
//! assert_eq!(grid, vec![vec!["A", "B"], vec!["1", "2"]]);
//! ```

mod csv;
mod detect;
mod html;
mod markdown;

#[cfg(test)]
mod tests;

use lazy_static::lazy_static;
use regex::Regex;

pub use self::csv::parse_csv_table;
pub use detect::{detect_format, parse_table, parse_table_as, ParsedTable, TableFormat};
pub use html::{parse_html_table, parse_html_table_with, HtmlTableExtractor, ScanExtractor};
pub use markdown::parse_markdown_table;

#[cfg(feature = "html-dom")]
pub use html::DomExtractor;

/// Parsed table: rows of cells
pub type Grid = Vec<Vec<String>>;

lazy_static! {
    static ref BOLD_STARS: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref BOLD_UNDERSCORES: Regex = Regex::new(r"__(.+?)__").unwrap();
    // Emphasized text may not start or end with whitespace: `a * b * c` is left alone
    static ref ITALIC_STAR: Regex = Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").unwrap();
    // Only at word boundaries, so snake_case identifiers survive
    static ref ITALIC_UNDERSCORE: Regex =
        Regex::new(r"(^|\W)_([^_\s](?:[^_]*[^_\s])?)_(\W|$)").unwrap();
}

/// Strip Markdown emphasis markers: `**x**`, `__x__`, `*x*` and `_x_` become `x`
pub fn strip_emphasis(text: &str) -> String {
    let text = BOLD_STARS.replace_all(text, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let mut text = text.into_owned();
    // Adjacent matches share their boundary character, so repeat until stable
    while ITALIC_UNDERSCORE.is_match(&text) {
        text = ITALIC_UNDERSCORE.replace_all(&text, "$1$2$3").into_owned();
    }
    text
}

/// Number of columns of the widest row
pub fn column_count(grid: &Grid) -> usize {
    grid.iter().map(|row| row.len()).max().unwrap_or(0)
}

/// Total number of cells across all rows
pub fn cell_count(grid: &Grid) -> usize {
    grid.iter().map(|row| row.len()).sum()
}
