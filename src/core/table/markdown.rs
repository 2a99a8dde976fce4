//! Markdown pipe-table parser

use super::{strip_emphasis, Grid};

/// Parse a Markdown pipe table
///
/// Lines without a `|` are ignored, so a table embedded in surrounding prose
/// still parses. Fewer than two pipe lines is not a table.
pub fn parse_markdown_table(markdown: &str) -> Grid {
    let markdown = markdown.trim();
    if markdown.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = markdown
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('|'))
        .collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    lines
        .into_iter()
        .filter(|line| !is_separator_line(line))
        .map(parse_row)
        .filter(|row| !row.is_empty())
        .collect()
}

/// Separator lines consist only of dashes, colons, pipes and spaces
pub(crate) fn is_separator_line(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
}

fn parse_row(line: &str) -> Vec<String> {
    // A leading or trailing pipe would otherwise leave an empty cell at the edge
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    if inner.is_empty() {
        return Vec::new();
    }

    inner
        .split('|')
        .map(|cell| strip_emphasis(cell.trim()))
        .collect()
}
