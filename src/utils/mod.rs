//! Utility modules
//!
//! Error types and result types shared by the parsers, the layout engine and
//! the AI flows.

pub mod error;

pub use error::{ConversionError, ConversionResult};
