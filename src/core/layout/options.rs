//! Layout configuration
//!
//! All sizing and styling constants of the layout engine live in
//! [`LayoutOptions`]. Two presets mirror the two looks Excalidraw users
//! expect: [`LayoutOptions::hand_drawn`] (the default) and
//! [`LayoutOptions::solid`]. A TOML file can override individual fields
//! through [`LayoutConfig`].

use serde::{Deserialize, Serialize};

use crate::data::constants::*;
use crate::utils::error::{ConversionError, ConversionResult};

/// Named style preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    /// Sketchy strokes, hachure fill, Virgil font
    #[default]
    HandDrawn,
    /// Clean strokes, solid fill, Helvetica font, shaded header row
    Solid,
}

impl LayoutStyle {
    pub fn options(&self) -> LayoutOptions {
        match self {
            LayoutStyle::HandDrawn => LayoutOptions::hand_drawn(),
            LayoutStyle::Solid => LayoutOptions::solid(),
        }
    }
}

/// Sizing and styling constants for the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Minimum column width
    pub min_cell_width: f64,
    /// Minimum row height
    pub min_cell_height: f64,
    /// Space between cell border and text, on each side
    pub padding: f64,
    pub font_size: f64,
    /// Average glyph width as a fraction of the font size
    pub char_width_factor: f64,
    /// Line height as a fraction of the font size
    pub line_height_factor: f64,
    /// Excalidraw font family (1 = Virgil, 2 = Helvetica, 3 = Cascadia)
    pub font_family: u32,
    pub stroke_color: String,
    pub background_color: String,
    /// Background of first-row cells; `None` styles the header like the body
    pub header_background: Option<String>,
    pub fill_style: String,
    pub stroke_width: f64,
    pub stroke_style: String,
    pub roughness: u32,
    pub opacity: u32,
    /// Document `source` tag
    pub source: String,
    pub view_background_color: String,
    pub theme: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::hand_drawn()
    }
}

impl LayoutOptions {
    /// Hand-drawn look: hachure fill, roughness 1, Virgil font
    pub fn hand_drawn() -> Self {
        Self {
            min_cell_width: CELL_WIDTH,
            min_cell_height: CELL_HEIGHT,
            padding: PADDING,
            font_size: FONT_SIZE,
            char_width_factor: CHAR_WIDTH_FACTOR,
            line_height_factor: LINE_HEIGHT_FACTOR,
            font_family: FONT_FAMILY_HAND_DRAWN,
            stroke_color: STROKE_COLOR.to_string(),
            background_color: TRANSPARENT.to_string(),
            header_background: None,
            fill_style: "hachure".to_string(),
            stroke_width: 1.0,
            stroke_style: "solid".to_string(),
            roughness: 1,
            opacity: 100,
            source: DEFAULT_SOURCE.to_string(),
            view_background_color: VIEW_BACKGROUND_COLOR.to_string(),
            theme: "light".to_string(),
        }
    }

    /// Clean look: solid fill, roughness 0, Helvetica font, shaded header
    pub fn solid() -> Self {
        Self {
            font_family: FONT_FAMILY_NORMAL,
            fill_style: "solid".to_string(),
            roughness: 0,
            header_background: Some(HEADER_BACKGROUND.to_string()),
            ..Self::hand_drawn()
        }
    }

    /// Switch colors for a dark canvas
    pub fn dark(mut self) -> Self {
        self.stroke_color = DARK_MODE_STROKE_COLOR.to_string();
        self.view_background_color = DARK_VIEW_BACKGROUND_COLOR.to_string();
        self.theme = "dark".to_string();
        if self.header_background.is_some() {
            self.header_background = Some(DARK_HEADER_BACKGROUND.to_string());
        }
        self
    }

    /// Shade the first row
    pub fn with_header(mut self) -> Self {
        if self.header_background.is_none() {
            let color = if self.theme == "dark" {
                DARK_HEADER_BACKGROUND
            } else {
                HEADER_BACKGROUND
            };
            self.header_background = Some(color.to_string());
        }
        self
    }

    /// Horizontal space taken by one character
    pub fn char_width(&self) -> f64 {
        self.font_size * self.char_width_factor
    }

    /// Vertical space taken by one line of text
    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_height_factor
    }

    /// Check that every size is positive and finite
    pub fn validate(&self) -> ConversionResult<()> {
        let sizes = [
            ("min_cell_width", self.min_cell_width),
            ("min_cell_height", self.min_cell_height),
            ("font_size", self.font_size),
            ("char_width_factor", self.char_width_factor),
            ("line_height_factor", self.line_height_factor),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConversionError::config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConversionError::config(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        if self.opacity > 100 {
            return Err(ConversionError::config(format!(
                "opacity must be at most 100, got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

/// Partial layout settings, as read from a config file
///
/// Unset fields keep the value of the preset they are applied to. An empty
/// `header_background` string turns header shading off.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    pub style: Option<LayoutStyle>,
    pub dark: Option<bool>,
    pub min_cell_width: Option<f64>,
    pub min_cell_height: Option<f64>,
    pub padding: Option<f64>,
    pub font_size: Option<f64>,
    pub char_width_factor: Option<f64>,
    pub line_height_factor: Option<f64>,
    pub font_family: Option<u32>,
    pub stroke_color: Option<String>,
    pub background_color: Option<String>,
    pub header_background: Option<String>,
    pub fill_style: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<String>,
    pub roughness: Option<u32>,
    pub opacity: Option<u32>,
    pub source: Option<String>,
    pub view_background_color: Option<String>,
    pub theme: Option<String>,
}

macro_rules! override_fields {
    ($config:expr, $options:expr, $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $config.$field.clone() {
                $options.$field = value;
            }
        )*
    };
}

impl LayoutConfig {
    /// Parse a TOML config file
    #[cfg(feature = "cli")]
    pub fn from_toml(input: &str) -> ConversionResult<Self> {
        toml::from_str(input).map_err(|e| ConversionError::config(e.to_string()))
    }

    /// Build options from the config's own style preset
    pub fn to_options(&self) -> ConversionResult<LayoutOptions> {
        self.apply_to(self.style.unwrap_or_default().options())
    }

    /// Overlay the set fields on `base` and validate the result
    pub fn apply_to(&self, base: LayoutOptions) -> ConversionResult<LayoutOptions> {
        let mut options = if self.dark == Some(true) {
            base.dark()
        } else {
            base
        };

        override_fields!(
            self,
            options,
            min_cell_width,
            min_cell_height,
            padding,
            font_size,
            char_width_factor,
            line_height_factor,
            font_family,
            stroke_color,
            background_color,
            fill_style,
            stroke_width,
            stroke_style,
            roughness,
            opacity,
            source,
            view_background_color,
            theme,
        );

        if let Some(ref color) = self.header_background {
            options.header_background = if color.trim().is_empty() {
                None
            } else {
                Some(color.clone())
            };
        }

        options.validate()?;
        Ok(options)
    }
}
