//! Data layer - Static constants
//!
//! Excalidraw schema tags, default sizes, colors and font families.

pub mod constants;

pub use constants::{EXCALIDRAW_TYPE, EXCALIDRAW_VERSION};
