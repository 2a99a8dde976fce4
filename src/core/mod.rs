//! Core conversion modules
//!
//! This module contains the table → Excalidraw pipeline:
//! - `table`: Markdown, HTML and CSV parsers plus format detection
//! - `layout`: column/row sizing and element placement
//! - `elements`: Excalidraw element records
//! - `document`: the document envelope
//! - `convert`: the end-to-end pipeline

pub mod convert;
pub mod document;
pub mod elements;
pub mod layout;
pub mod table;

pub use convert::{
    convert_grid, convert_table, convert_table_with, convert_table_with_options, Conversion,
};
pub use document::{assemble, Document};
pub use elements::{BoundElement, Element, ElementBase, RectangleElement, TextElement};
pub use layout::{
    layout, IdGenerator, LayoutConfig, LayoutEngine, LayoutOptions, LayoutStyle, RandomIds,
    SequentialIds,
};
pub use table::{detect_format, parse_table, Grid, ParsedTable, TableFormat};
