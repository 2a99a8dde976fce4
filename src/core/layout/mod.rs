//! Layout Engine
//!
//! Turns a [`Grid`] into positioned Excalidraw elements: one rectangle and
//! one bound text element per cell.
//!
//! # Algorithm
//!
//! ```text
//! Grid -> column widths + row heights -> walk rows/columns -> rectangle + text pairs
//! ```
//!
//! - Column width: widest line of any cell in the column, times the glyph
//!   width, plus padding on both sides; never below the minimum width.
//! - Row height: most lines of any cell in the row, times the line height,
//!   plus padding on both sides; never below the minimum height.
//! - Rows run top-to-bottom and columns left-to-right from the origin.
//! - Text is centred inside its rectangle, vertically offset by half the
//!   height of its text block.
//!
//! Ragged rows emit fewer elements; a column's width only considers rows
//! that have that column.

mod ids;
mod options;

pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use options::{LayoutConfig, LayoutOptions, LayoutStyle};

use log::debug;

use crate::core::elements::{BoundElement, Element, ElementBase, RectangleElement, TextElement};
use crate::core::table::{cell_count, column_count, Grid};
use crate::data::constants::TEXT_TYPE;

/// Lines of a cell as displayed
fn cell_lines(cell: &str) -> impl Iterator<Item = &str> {
    cell.split('\n')
}

/// Characters in the longest line of a cell
pub fn max_line_chars(cell: &str) -> usize {
    cell_lines(cell)
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

/// Number of displayed lines in a cell
pub fn line_count(cell: &str) -> usize {
    cell_lines(cell).count()
}

/// Width a cell needs for its content, before the minimum is applied
pub fn content_width(cell: &str, options: &LayoutOptions) -> f64 {
    max_line_chars(cell) as f64 * options.char_width() + options.padding * 2.0
}

/// Height a cell needs for its content, before the minimum is applied
pub fn content_height(cell: &str, options: &LayoutOptions) -> f64 {
    text_block_height(cell, options) + options.padding * 2.0
}

fn text_block_height(cell: &str, options: &LayoutOptions) -> f64 {
    line_count(cell) as f64 * options.line_height()
}

/// Width of every column
pub fn column_widths(grid: &Grid, options: &LayoutOptions) -> Vec<f64> {
    let mut widths = vec![options.min_cell_width; column_count(grid)];
    for row in grid {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(content_width(cell, options));
        }
    }
    widths
}

/// Height of every row
pub fn row_heights(grid: &Grid, options: &LayoutOptions) -> Vec<f64> {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| content_height(cell, options))
                .fold(options.min_cell_height, f64::max)
        })
        .collect()
}

/// Lays out one grid with fixed options, ids and timestamp
pub struct LayoutEngine<'a> {
    options: &'a LayoutOptions,
    ids: &'a mut dyn IdGenerator,
    /// Milliseconds since the Unix epoch, stamped on every element
    timestamp: i64,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(options: &'a LayoutOptions, ids: &'a mut dyn IdGenerator, timestamp: i64) -> Self {
        Self {
            options,
            ids,
            timestamp,
        }
    }

    /// Emit a rectangle and a text element per cell, row-major
    pub fn layout(&mut self, grid: &Grid) -> Vec<Element> {
        let opts = self.options;
        let widths = column_widths(grid, opts);
        let heights = row_heights(grid, opts);
        let mut elements = Vec::with_capacity(cell_count(grid) * 2);

        let mut y = 0.0;
        for (row_index, (row, &height)) in grid.iter().zip(&heights).enumerate() {
            let background = match opts.header_background {
                Some(ref color) if row_index == 0 => color.as_str(),
                _ => opts.background_color.as_str(),
            };

            let mut x = 0.0;
            for (cell, &width) in row.iter().zip(&widths) {
                let (rect, text) = self.cell_elements(cell, x, y, width, height, background);
                elements.push(rect);
                elements.push(text);
                x += width;
            }
            y += height;
        }

        debug!(
            "layout: {} rows, {} columns, {} elements",
            heights.len(),
            widths.len(),
            elements.len()
        );
        elements
    }

    fn cell_elements(
        &mut self,
        cell: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        background: &str,
    ) -> (Element, Element) {
        let rect_id = self.ids.next_id();
        let text_id = self.ids.next_id();
        let opts = self.options;

        let mut rect_base = self.base(rect_id.clone(), x, y, width, height);
        rect_base.background_color = background.to_string();
        rect_base.bound_elements = Some(vec![BoundElement {
            kind: TEXT_TYPE.to_string(),
            id: text_id.clone(),
        }]);

        let block_height = text_block_height(cell, opts);
        let text_base = self.base(
            text_id,
            x + opts.padding / 2.0,
            y + (height - block_height) / 2.0,
            (width - opts.padding).max(0.0),
            block_height,
        );

        let rect = Element::Rectangle(RectangleElement { base: rect_base });
        let text = Element::Text(TextElement {
            base: text_base,
            text: cell.to_string(),
            font_size: opts.font_size,
            font_family: opts.font_family,
            text_align: "center".to_string(),
            vertical_align: "middle".to_string(),
            container_id: Some(rect_id),
            original_text: cell.to_string(),
        });
        (rect, text)
    }

    fn base(&mut self, id: String, x: f64, y: f64, width: f64, height: f64) -> ElementBase {
        let opts = self.options;
        ElementBase {
            id,
            x,
            y,
            width,
            height,
            angle: 0.0,
            stroke_color: opts.stroke_color.clone(),
            background_color: opts.background_color.clone(),
            fill_style: opts.fill_style.clone(),
            stroke_width: opts.stroke_width,
            stroke_style: opts.stroke_style.clone(),
            roughness: opts.roughness,
            opacity: opts.opacity,
            seed: self.ids.next_seed(),
            version: 1,
            version_nonce: self.ids.next_nonce(),
            is_deleted: false,
            bound_elements: None,
            updated: self.timestamp,
            link: None,
            locked: false,
        }
    }
}

/// Lay out a grid; see [`LayoutEngine`]
pub fn layout(
    grid: &Grid,
    options: &LayoutOptions,
    ids: &mut dyn IdGenerator,
    timestamp: i64,
) -> Vec<Element> {
    LayoutEngine::new(options, ids, timestamp).layout(grid)
}
