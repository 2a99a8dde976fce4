//! HTML table parser
//!
//! Extraction of the first `<table>` sits behind [`HtmlTableExtractor`] with
//! two implementations:
//! - [`DomExtractor`]: builds a full DOM with html5ever (feature `html-dom`)
//! - [`ScanExtractor`]: a streaming tag scanner that needs no DOM
//!
//! Both produce the same grid for well-formed markup: one row per `<tr>`,
//! one cell per `<th>`/`<td>` in document order. Rows of nested tables are
//! not lifted into the outer table.

use htmlize::unescape;
use log::debug;

use super::{strip_emphasis, Grid};

/// Extracts the rows of the first `<table>` in a piece of markup
pub trait HtmlTableExtractor {
    /// Rows of the first table, or `None` when the markup has no table
    fn extract_first_table(&self, html: &str) -> Option<Grid>;
}

/// Parse the first HTML table in the input
///
/// Uses [`DomExtractor`] when the `html-dom` feature is enabled and
/// [`ScanExtractor`] otherwise.
pub fn parse_html_table(html: &str) -> Grid {
    #[cfg(feature = "html-dom")]
    let extractor = DomExtractor;
    #[cfg(not(feature = "html-dom"))]
    let extractor = ScanExtractor;

    parse_html_table_with(html, &extractor)
}

/// Parse the first HTML table in the input with a specific extractor
pub fn parse_html_table_with(html: &str, extractor: &dyn HtmlTableExtractor) -> Grid {
    if !html.contains('<') {
        return Vec::new();
    }
    match extractor.extract_first_table(html) {
        Some(grid) => grid,
        None => {
            debug!("html: no <table> element found");
            Vec::new()
        }
    }
}

/// Block-level elements whose boundaries start a new line inside a cell
fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "pre"
    )
}

/// Accumulates the visible text of one cell
#[derive(Debug, Default)]
struct CellText {
    raw: String,
}

impl CellText {
    fn push_text(&mut self, text: &str) {
        // Source line breaks are layout whitespace, not content
        self.raw
            .extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
    }

    fn push_break(&mut self) {
        self.raw.push('\n');
    }

    fn finish(self) -> String {
        let text = self
            .raw
            .split('\n')
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        strip_emphasis(&text)
    }
}

// ============================================================================
// DOM-based extraction
// ============================================================================

#[cfg(feature = "html-dom")]
pub use dom::DomExtractor;

#[cfg(feature = "html-dom")]
mod dom {
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::{Handle, NodeData, RcDom};

    use super::{is_block_element, CellText, HtmlTableExtractor};
    use crate::core::table::Grid;

    /// Extractor backed by a full html5ever DOM
    #[derive(Debug, Clone, Copy, Default)]
    pub struct DomExtractor;

    impl HtmlTableExtractor for DomExtractor {
        fn extract_first_table(&self, html: &str) -> Option<Grid> {
            let dom = parse_document(RcDom::default(), Default::default()).one(html);
            let table = find_first_table(&dom.document)?;

            let mut rows = Vec::new();
            collect_rows(&table, &mut rows);
            Some(rows)
        }
    }

    fn element_name(handle: &Handle) -> Option<&str> {
        match &handle.data {
            NodeData::Element { name, .. } => Some(&*name.local),
            _ => None,
        }
    }

    fn find_first_table(handle: &Handle) -> Option<Handle> {
        if element_name(handle) == Some("table") {
            return Some(handle.clone());
        }
        handle
            .children
            .borrow()
            .iter()
            .find_map(find_first_table)
    }

    /// Walk thead/tbody/tfoot down to the rows, skipping nested tables
    fn collect_rows(handle: &Handle, rows: &mut Grid) {
        for child in handle.children.borrow().iter() {
            match element_name(child) {
                Some("table") => {}
                Some("tr") => {
                    let mut row = Vec::new();
                    collect_cells(child, &mut row);
                    if !row.is_empty() {
                        rows.push(row);
                    }
                }
                Some(_) => collect_rows(child, rows),
                None => {}
            }
        }
    }

    fn collect_cells(handle: &Handle, row: &mut Vec<String>) {
        for child in handle.children.borrow().iter() {
            match element_name(child) {
                Some("td") | Some("th") => {
                    let mut text = CellText::default();
                    collect_text(child, &mut text);
                    row.push(text.finish());
                }
                Some("table") | None => {}
                Some(_) => collect_cells(child, row),
            }
        }
    }

    fn collect_text(handle: &Handle, out: &mut CellText) {
        match &handle.data {
            NodeData::Text { contents } => out.push_text(&contents.borrow()),
            NodeData::Element { name, .. } => {
                let tag = &*name.local;
                match tag {
                    "br" => {
                        out.push_break();
                        return;
                    }
                    "script" | "style" | "template" => return,
                    _ => {}
                }

                let block = is_block_element(tag);
                if block {
                    out.push_break();
                }
                for child in handle.children.borrow().iter() {
                    collect_text(child, out);
                }
                if block {
                    out.push_break();
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// Streaming tag scanner
// ============================================================================

/// Extractor that scans tags without building a tree
///
/// Handles attributes, comments, implicitly closed `<td>`/`<th>`/`<tr>` and
/// raw-text bodies. Character references are expanded the way browsers do,
/// including legacy named entities written without a semicolon.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanExtractor;

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Open(String),
    Close(String),
}

/// Splits markup into text runs and tags; comments and doctypes are dropped
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Element whose body is emitted as a single text run
    raw_text: Option<String>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    /// Skip past `pattern`, or to the end of input when it never appears
    fn skip_past(&mut self, pattern: &str) {
        match self.input[self.pos..].find(pattern) {
            Some(idx) => self.pos += idx + pattern.len(),
            None => self.pos = self.input.len(),
        }
    }

    /// Skip the body of a raw-text element up to its closing tag
    fn skip_raw_text(&mut self, tag: &str) {
        let closing = format!("</{}", tag);
        let rest = self.input[self.pos..].to_ascii_lowercase();
        match rest.find(&closing) {
            Some(idx) => {
                self.pos += idx;
            }
            None => self.pos = self.input.len(),
        }
    }

    /// Byte offset of the `>` closing the tag at `start`, ignoring quoted `>`
    fn tag_end(&self, start: usize) -> Option<usize> {
        let mut quote: Option<char> = None;
        let mut prev: Option<char> = None;
        for (i, c) in self.input[start..].char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                // Quotes only open attribute values: `title=don't` stays unquoted
                None if (c == '"' || c == '\'') && prev == Some('=') => quote = Some(c),
                None if c == '>' => return Some(start + i),
                None => {}
            }
            if !c.is_whitespace() {
                prev = Some(c);
            }
        }
        None
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(tag) = self.raw_text.take() {
            let start = self.pos;
            self.skip_raw_text(&tag);
            if self.pos > start {
                let input = self.input;
                return Some(Token::Text(&input[start..self.pos]));
            }
        }

        loop {
            if self.pos >= self.input.len() {
                return None;
            }
            let rest = &self.input[self.pos..];

            if !rest.starts_with('<') {
                let len = rest.find('<').unwrap_or(rest.len());
                self.pos += len;
                return Some(Token::Text(&rest[..len]));
            }

            if rest.starts_with("<!--") {
                self.skip_past("-->");
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">");
                continue;
            }

            let closing = rest.starts_with("</");
            let name_start = if closing { 2 } else { 1 };
            let name: String = rest[name_start..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();

            if name.is_empty() {
                // A bare `<` is literal text
                self.pos += 1;
                return Some(Token::Text(&rest[..1]));
            }

            match self.tag_end(self.pos) {
                Some(end) => self.pos = end + 1,
                None => self.pos = self.input.len(),
            }

            if closing {
                return Some(Token::Close(name));
            }
            match name.as_str() {
                "script" | "style" => self.skip_raw_text(&name),
                // Markup inside these is literal text
                "textarea" | "title" => self.raw_text = Some(name.clone()),
                _ => {}
            }
            return Some(Token::Open(name));
        }
    }
}

/// Row and cell state of the table being scanned
#[derive(Default)]
struct ScanState {
    rows: Grid,
    row: Option<Vec<String>>,
    cell: Option<CellText>,
}

impl ScanState {
    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.get_or_insert_with(Vec::new).push(cell.finish());
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(row) = self.row.take() {
            if !row.is_empty() {
                self.rows.push(row);
            }
        }
    }
}

impl HtmlTableExtractor for ScanExtractor {
    fn extract_first_table(&self, html: &str) -> Option<Grid> {
        let mut depth = 0usize;
        let mut found = false;
        let mut state = ScanState::default();

        for token in Tokenizer::new(html) {
            match token {
                Token::Open(name) if name == "table" => {
                    found = true;
                    depth += 1;
                }
                Token::Close(name) if name == "table" => {
                    if depth == 1 {
                        state.finish_row();
                        return Some(state.rows);
                    }
                    depth = depth.saturating_sub(1);
                }
                _ if depth == 0 => {}
                Token::Text(text) => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.push_text(&unescape(text));
                    }
                }
                Token::Open(name) | Token::Close(name) if name == "br" => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.push_break();
                    }
                }
                Token::Open(name) | Token::Close(name) if is_block_element(&name) => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.push_break();
                    }
                }
                // Nested tables only contribute their text
                _ if depth > 1 => {}
                Token::Open(name) => match name.as_str() {
                    "tr" => {
                        state.finish_row();
                        state.row = Some(Vec::new());
                    }
                    "td" | "th" => {
                        state.finish_cell();
                        state.cell = Some(CellText::default());
                    }
                    _ => {}
                },
                Token::Close(name) => match name.as_str() {
                    "tr" | "thead" | "tbody" | "tfoot" => state.finish_row(),
                    "td" | "th" => state.finish_cell(),
                    _ => {}
                },
            }
        }

        if found {
            // Unterminated table
            state.finish_row();
            Some(state.rows)
        } else {
            None
        }
    }
}
