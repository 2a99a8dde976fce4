//! Table → Excalidraw pipeline
//!
//! ```text
//! raw text -> parse_table (fallback chain) -> Grid -> layout -> assemble -> Document
//! ```

use chrono::Utc;
use log::info;

use crate::core::document::{assemble, Document};
use crate::core::layout::{layout, IdGenerator, LayoutOptions, RandomIds};
use crate::core::table::{parse_table, parse_table_as, Grid, TableFormat};
use crate::utils::error::ConversionResult;

/// Result of converting a table
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Format the input was parsed as
    pub format: TableFormat,
    pub rows: usize,
    pub columns: usize,
    pub document: Document,
}

/// Lay out a grid and wrap it in a document
///
/// An empty grid yields the bare envelope from [`Document::empty`].
pub fn convert_grid(
    grid: &Grid,
    options: &LayoutOptions,
    ids: &mut dyn IdGenerator,
    timestamp: i64,
) -> Document {
    if grid.is_empty() {
        return Document::empty(options.source.clone());
    }
    let elements = layout(grid, options, ids, timestamp);
    assemble(elements, options)
}

/// Convert raw table text with explicit options, id source and timestamp
///
/// `format` forces a parser; `None` runs the detection fallback chain.
pub fn convert_table_with(
    input: &str,
    format: Option<TableFormat>,
    options: &LayoutOptions,
    ids: &mut dyn IdGenerator,
    timestamp: i64,
) -> ConversionResult<Conversion> {
    options.validate()?;

    let parsed = match format {
        Some(format) => parse_table_as(input, format)?,
        None => parse_table(input)?,
    };
    let rows = parsed.grid.len();
    let columns = crate::core::table::column_count(&parsed.grid);
    let document = convert_grid(&parsed.grid, options, ids, timestamp);

    info!(
        "converted {} table: {} rows x {} columns, {} elements",
        parsed.format,
        rows,
        columns,
        document.elements.len()
    );

    Ok(Conversion {
        format: parsed.format,
        rows,
        columns,
        document,
    })
}

/// Convert raw table text with custom options
///
/// Uses random ids and the current time.
pub fn convert_table_with_options(
    input: &str,
    options: &LayoutOptions,
) -> ConversionResult<Document> {
    let mut ids = RandomIds::new();
    convert_table_with(input, None, options, &mut ids, Utc::now().timestamp_millis())
        .map(|conversion| conversion.document)
}

/// Convert raw table text with the default hand-drawn style
pub fn convert_table(input: &str) -> ConversionResult<Document> {
    convert_table_with_options(input, &LayoutOptions::default())
}
