//! Excalidraw format constants
//!
//! Fixed values of the Excalidraw document schema and the default styling
//! used by the layout presets.

/// Document `type` tag
pub const EXCALIDRAW_TYPE: &str = "excalidraw";

/// Document schema version
pub const EXCALIDRAW_VERSION: u32 = 2;

/// Default document `source` tag
pub const DEFAULT_SOURCE: &str = "https://excalidraw.com";

/// Type tag of a bound text element
pub const TEXT_TYPE: &str = "text";

// Sizing defaults (pixels)
pub const CELL_WIDTH: f64 = 200.0;
pub const CELL_HEIGHT: f64 = 60.0;
pub const PADDING: f64 = 10.0;
pub const FONT_SIZE: f64 = 20.0;
/// Average glyph width as a fraction of the font size
pub const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Line height as a fraction of the font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

// Colors
pub const STROKE_COLOR: &str = "#1e1e1e";
pub const DARK_MODE_STROKE_COLOR: &str = "#e2e8f0";
pub const TRANSPARENT: &str = "transparent";
pub const HEADER_BACKGROUND: &str = "#e9ecef";
pub const DARK_HEADER_BACKGROUND: &str = "#343a40";
pub const VIEW_BACKGROUND_COLOR: &str = "#F9FAFB";
pub const DARK_VIEW_BACKGROUND_COLOR: &str = "#121212";

/// Excalidraw font families
pub const FONT_FAMILY_HAND_DRAWN: u32 = 1;
pub const FONT_FAMILY_NORMAL: u32 = 2;

/// Upper bounds for visual randomization
pub const SEED_RANGE: u32 = 100_000;
pub const NONCE_RANGE: u32 = 1_000_000;

/// Length of generated element ids
pub const ID_LENGTH: usize = 9;
