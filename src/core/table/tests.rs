use pretty_assertions::assert_eq;

use super::*;
use crate::utils::error::ConversionError;

fn grid(rows: &[&[&str]]) -> Grid {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

// ============================================================================
// Emphasis
// ============================================================================

#[test]
fn test_strip_emphasis() {
    assert_eq!(strip_emphasis("**bold**"), "bold");
    assert_eq!(strip_emphasis("__bold__"), "bold");
    assert_eq!(strip_emphasis("*it*"), "it");
    assert_eq!(strip_emphasis("_it_"), "it");
    assert_eq!(strip_emphasis("a **b** and *c*"), "a b and c");
}

#[test]
fn test_strip_emphasis_leaves_plain_text() {
    assert_eq!(strip_emphasis("snake_case_name"), "snake_case_name");
    assert_eq!(strip_emphasis("2 * 3 * 4"), "2 * 3 * 4");
    assert_eq!(strip_emphasis(""), "");
}

#[test]
fn test_strip_emphasis_adjacent_underscores() {
    assert_eq!(strip_emphasis("_a_ _b_"), "a b");
}

// ============================================================================
// Parsers
// ============================================================================

#[test]
fn test_markdown_example() {
    assert_eq!(
        parse_markdown_table("| A | B |\n|---|---|\n| 1 | 2 |"),
        grid(&[&["A", "B"], &["1", "2"]])
    );
}

#[test]
fn test_markdown_strips_emphasis() {
    assert_eq!(
        parse_markdown_table("| **Name** | *Role* |\n|:--|--:|\n| Ada | __Lead__ |"),
        grid(&[&["Name", "Role"], &["Ada", "Lead"]])
    );
}

#[test]
fn test_markdown_single_line_is_empty() {
    assert!(parse_markdown_table("| A | B |").is_empty());
}

#[test]
fn test_csv_example() {
    assert_eq!(
        parse_csv_table("Name,Age\nAlice,30"),
        grid(&[&["Name", "Age"], &["Alice", "30"]])
    );
}

#[test]
fn test_empty_input_gives_empty_grids() {
    for input in ["", "   ", "\n\n"] {
        assert!(parse_markdown_table(input).is_empty());
        assert!(parse_html_table(input).is_empty());
        assert!(parse_csv_table(input).is_empty());
    }
}

#[test]
fn test_grid_counts() {
    let g = grid(&[&["a", "b", "c"], &["d"]]);
    assert_eq!(column_count(&g), 3);
    assert_eq!(cell_count(&g), 4);
    assert_eq!(column_count(&Vec::new()), 0);
}

// ============================================================================
// HTML extractors
// ============================================================================

const RICH_HTML: &str = r#"<html><body>
<p>Intro</p>
<table class="data">
  <thead><tr><th scope="col">Name</th><th>Notes</th></tr></thead>
  <tbody>
    <tr><td>Alice &amp; Bob</td><td>line one<br>line two</td></tr>
    <tr><td><b>Carol</b></td><td>5 &lt; 6</td></tr>
  </tbody>
</table>
</body></html>"#;

fn rich_expected() -> Grid {
    grid(&[
        &["Name", "Notes"],
        &["Alice & Bob", "line one\nline two"],
        &["Carol", "5 < 6"],
    ])
}

#[test]
fn test_scan_extractor_rich_table() {
    assert_eq!(parse_html_table_with(RICH_HTML, &ScanExtractor), rich_expected());
}

#[cfg(feature = "html-dom")]
#[test]
fn test_dom_extractor_rich_table() {
    assert_eq!(parse_html_table_with(RICH_HTML, &DomExtractor), rich_expected());
}

#[cfg(feature = "html-dom")]
#[test]
fn test_extractors_agree() {
    let inputs = [
        "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>",
        "<table><tr><th>**H**</th></tr><tr><td>  spaced \n  text </td></tr></table>",
        "<table><tr><td>x<table><tr><td>inner</td></tr></table></td></tr></table>",
        "<div>before</div><table><tr><td>1</td></tr></table><table><tr><td>2</td></tr></table>",
        "<table><tr><td>a<p>b</p></td></tr></table>",
        "<table><tr><td>&copy; 2024</td><td>R&amp D</td><td>caf&eacute;</td></tr></table>",
        "<table><tr><td><textarea>a<b>c</textarea></td><td>x</td></tr></table>",
    ];
    for html in inputs {
        assert_eq!(
            parse_html_table_with(html, &ScanExtractor),
            parse_html_table_with(html, &DomExtractor),
            "extractors disagree on {}",
            html
        );
    }
}

#[test]
fn test_html_first_table_only() {
    let html = "<table><tr><td>1</td></tr></table><table><tr><td>2</td></tr></table>";
    assert_eq!(parse_html_table(html), grid(&[&["1"]]));
}

#[test]
fn test_html_without_table() {
    assert!(parse_html_table("<p>no table here</p>").is_empty());
    assert!(parse_html_table("plain text").is_empty());
}

// ============================================================================
// Detection and fallback
// ============================================================================

#[test]
fn test_detect_markdown() {
    assert_eq!(
        detect_format("| A | B |\n|---|---|\n| 1 | 2 |"),
        Some(TableFormat::Markdown)
    );
}

#[test]
fn test_detect_html() {
    assert_eq!(
        detect_format("<table><tr><td>a, b</td></tr></table>"),
        Some(TableFormat::Html)
    );
}

#[test]
fn test_detect_csv_with_literal_pipes() {
    assert_eq!(detect_format("a|b,c\nd,e"), Some(TableFormat::Csv));
    let parsed = parse_table("a|b,c\nd,e").unwrap();
    assert_eq!(parsed.format, TableFormat::Csv);
    assert_eq!(parsed.grid, grid(&[&["a|b", "c"], &["d", "e"]]));
}

#[test]
fn test_pipe_rows_with_commas_are_markdown() {
    let input = "Name, Role | Notes, Extra\nAda, Lead | a, b";
    assert_eq!(detect_format(input), Some(TableFormat::Markdown));
    let parsed = parse_table(input).unwrap();
    assert_eq!(parsed.format, TableFormat::Markdown);
    assert_eq!(
        parsed.grid,
        grid(&[&["Name, Role", "Notes, Extra"], &["Ada, Lead", "a, b"]])
    );
}

#[test]
fn test_detect_nothing() {
    assert_eq!(detect_format("just some text"), None);
    assert_eq!(detect_format(""), None);
}

#[test]
fn test_confidence_scores() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |";
    assert_eq!(TableFormat::Markdown.confidence(md), 90);
    assert_eq!(TableFormat::Markdown.confidence("a | b\nc | d"), 70);
    assert_eq!(TableFormat::Markdown.confidence("a | b\nc | d | e"), 50);
    assert_eq!(TableFormat::Markdown.confidence("a | b\nplain\nc | d"), 50);
    assert_eq!(TableFormat::Html.confidence("<TABLE>"), 95);
    assert_eq!(TableFormat::Html.confidence("<tr><td>x</td></tr>"), 10);
    assert_eq!(TableFormat::Csv.confidence("a,b\nc,d"), 60);
    assert_eq!(TableFormat::Csv.confidence("a,b\nc"), 30);
    assert_eq!(TableFormat::Csv.confidence("abc"), 0);
}

#[test]
fn test_parse_table_markdown() {
    let parsed = parse_table("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
    assert_eq!(parsed.format, TableFormat::Markdown);
    assert_eq!(parsed.grid, grid(&[&["A", "B"], &["1", "2"]]));
}

#[test]
fn test_parse_table_csv() {
    let parsed = parse_table("Name,Age\nAlice,30").unwrap();
    assert_eq!(parsed.format, TableFormat::Csv);
    assert_eq!(parsed.grid, grid(&[&["Name", "Age"], &["Alice", "30"]]));
}

#[test]
fn test_parse_table_html() {
    let parsed = parse_table("<table><tr><th>A</th></tr><tr><td>1</td></tr></table>").unwrap();
    assert_eq!(parsed.format, TableFormat::Html);
    assert_eq!(parsed.grid, grid(&[&["A"], &["1"]]));
}

#[test]
fn test_parse_table_failure() {
    assert_eq!(
        parse_table("just some text"),
        Err(ConversionError::parse(
            "Could not parse the input as Markdown, HTML, or CSV table."
        ))
    );
}

#[test]
fn test_parse_table_empty() {
    assert_eq!(parse_table("  \n "), Err(ConversionError::EmptyInput));
}

#[test]
fn test_parse_table_as() {
    let parsed = parse_table_as("a,b\nc,d", TableFormat::Csv).unwrap();
    assert_eq!(parsed.grid, grid(&[&["a", "b"], &["c", "d"]]));

    let err = parse_table_as("a,b\nc,d", TableFormat::Html).unwrap_err();
    assert!(err.is_parse_failure());
    assert_eq!(
        parse_table_as("", TableFormat::Csv),
        Err(ConversionError::EmptyInput)
    );
}

#[test]
fn test_format_names() {
    assert_eq!("MD".parse::<TableFormat>().unwrap(), TableFormat::Markdown);
    assert_eq!("html".parse::<TableFormat>().unwrap(), TableFormat::Html);
    assert!("xlsx".parse::<TableFormat>().is_err());
    assert_eq!(TableFormat::from_extension("HTM"), Some(TableFormat::Html));
    assert_eq!(TableFormat::from_extension("txt"), None);
    assert_eq!(TableFormat::Csv.to_string(), "csv");
}
