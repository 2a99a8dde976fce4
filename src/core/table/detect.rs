//! Format detection and the parser fallback chain
//!
//! Each [`TableFormat`] has a detector scoring how strongly the input looks
//! like that format. Parsers are tried in descending score order, ties broken
//! by the fallback order Markdown, HTML, CSV. Pipe rows with matching pipe
//! counts outrank consistent commas, so commas inside pipe cells stay in the
//! cell, while a CSV row holding a stray `|` is still read as CSV.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::markdown::is_separator_line;
use super::{parse_csv_table, parse_html_table, parse_markdown_table, Grid};
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    static ref HTML_TABLE_TAG: Regex = Regex::new(r"(?i)<table[\s>]").unwrap();
    static ref HTML_ROW_TAG: Regex = Regex::new(r"(?i)<t[rdh][\s>]").unwrap();
}

/// Message reported when no parser recognises the input
pub const PARSE_FAILURE_MESSAGE: &str =
    "Could not parse the input as Markdown, HTML, or CSV table.";

/// Supported input table formats, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    Markdown,
    Html,
    Csv,
}

impl TableFormat {
    /// All formats in fallback order
    pub const ALL: [TableFormat; 3] = [TableFormat::Markdown, TableFormat::Html, TableFormat::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableFormat::Markdown => "markdown",
            TableFormat::Html => "html",
            TableFormat::Csv => "csv",
        }
    }

    /// Guess the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(TableFormat::Markdown),
            "html" | "htm" => Some(TableFormat::Html),
            "csv" => Some(TableFormat::Csv),
            _ => None,
        }
    }

    /// Run this format's parser
    pub fn parse(&self, input: &str) -> Grid {
        match self {
            TableFormat::Markdown => parse_markdown_table(input),
            TableFormat::Html => parse_html_table(input),
            TableFormat::Csv => parse_csv_table(input),
        }
    }

    /// How strongly the input looks like this format, 0 to 100
    pub fn confidence(&self, input: &str) -> u8 {
        match self {
            TableFormat::Markdown => markdown_confidence(input),
            TableFormat::Html => html_confidence(input),
            TableFormat::Csv => csv_confidence(input),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(TableFormat::Markdown),
            "html" | "htm" => Ok(TableFormat::Html),
            "csv" => Ok(TableFormat::Csv),
            other => Err(ConversionError::invalid(format!(
                "unknown table format '{}'",
                other
            ))),
        }
    }
}

fn markdown_confidence(input: &str) -> u8 {
    let pipe_lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('|'))
        .collect();
    if pipe_lines.len() < 2 {
        return 0;
    }
    let has_separator = pipe_lines
        .iter()
        .any(|line| line.contains('-') && is_separator_line(line));
    if has_separator {
        return 90;
    }

    // Every line a pipe row with the same number of pipes
    let counts: Vec<usize> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.matches('|').count())
        .collect();
    if counts.len() == pipe_lines.len() && counts.iter().all(|&c| c == counts[0]) {
        70
    } else {
        50
    }
}

fn html_confidence(input: &str) -> u8 {
    if HTML_TABLE_TAG.is_match(input) {
        95
    } else if HTML_ROW_TAG.is_match(input) {
        10
    } else {
        0
    }
}

fn csv_confidence(input: &str) -> u8 {
    let counts: Vec<usize> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.matches(',').count())
        .collect();
    let consistent = counts.len() >= 2 && counts[0] > 0 && counts.iter().all(|&c| c == counts[0]);
    if consistent {
        60
    } else if counts.iter().any(|&c| c > 0) {
        30
    } else {
        0
    }
}

/// Formats ordered by descending confidence, ties in fallback order
fn ranked_formats(input: &str) -> Vec<(TableFormat, u8)> {
    let mut ranked: Vec<(TableFormat, u8)> = TableFormat::ALL
        .iter()
        .map(|format| (*format, format.confidence(input)))
        .collect();
    // Stable sort keeps the fallback order among equal scores
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Detect the most likely table format
///
/// Returns `None` when no detector recognises the input at all.
pub fn detect_format(input: &str) -> Option<TableFormat> {
    ranked_formats(input)
        .into_iter()
        .find(|(_, score)| *score > 0)
        .map(|(format, _)| format)
}

/// A grid together with the format that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub format: TableFormat,
    pub grid: Grid,
}

/// Parse the input with the fallback chain
///
/// Every parser is tried, most likely format first; the first non-empty grid
/// wins. Blank input is [`ConversionError::EmptyInput`]; input no parser
/// recognises is a [`ConversionError::ParseError`].
pub fn parse_table(input: &str) -> ConversionResult<ParsedTable> {
    if input.trim().is_empty() {
        return Err(ConversionError::EmptyInput);
    }

    for (format, score) in ranked_formats(input) {
        let grid = format.parse(input);
        if grid.is_empty() {
            debug!("{} parser (confidence {}) found no rows", format, score);
            continue;
        }
        debug!(
            "{} parser (confidence {}) found {} rows",
            format,
            score,
            grid.len()
        );
        return Ok(ParsedTable { format, grid });
    }

    Err(ConversionError::parse(PARSE_FAILURE_MESSAGE))
}

/// Parse the input as a specific format, without fallback
pub fn parse_table_as(input: &str, format: TableFormat) -> ConversionResult<ParsedTable> {
    if input.trim().is_empty() {
        return Err(ConversionError::EmptyInput);
    }

    let grid = format.parse(input);
    if grid.is_empty() {
        return Err(ConversionError::parse(format!(
            "Could not parse the input as a {} table.",
            format
        )));
    }
    Ok(ParsedTable { format, grid })
}
