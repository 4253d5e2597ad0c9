//! Typed configuration for draw operations.
//!
//! Every recognized option is a named field with a default, replacing the
//! loosely-keyed style dictionaries such grids are usually configured with.
//! Partial overlays merge over defaults via [`apply_overlay`]; an
//! unrecognized key fails fast at the point of use instead of being
//! silently ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{MinardError, Result};

/// Text styling for titles, cell labels and legend labels.
///
/// Field names mirror the SVG style properties they render to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontConfig {
    /// Font style (normal, italic, oblique)
    #[serde(rename = "font-style", default = "default_font_style")]
    pub font_style: String,

    /// Font weight
    #[serde(rename = "font-weight", default = "default_font_weight")]
    pub font_weight: String,

    /// Font size, with unit (e.g. "12px")
    #[serde(rename = "font-size", default = "default_font_size")]
    pub font_size: String,

    /// Line height
    #[serde(rename = "line-height", default = "default_line_height")]
    pub line_height: String,

    /// Text anchor relative to the x position
    #[serde(rename = "text-anchor", default = "default_text_anchor")]
    pub text_anchor: String,

    /// Font family
    #[serde(rename = "font-family", default = "default_font_family")]
    pub font_family: String,

    /// Letter spacing
    #[serde(rename = "letter-spacing", default = "default_zero_px")]
    pub letter_spacing: String,

    /// Word spacing
    #[serde(rename = "word-spacing", default = "default_zero_px")]
    pub word_spacing: String,

    /// Fill opacity
    #[serde(rename = "fill-opacity", default = "default_one")]
    pub fill_opacity: f64,

    /// Text stroke color, or "none"
    #[serde(default = "default_none")]
    pub stroke: String,

    /// Text stroke width
    #[serde(rename = "stroke-width", default = "default_stroke_width_px")]
    pub stroke_width: String,

    /// Stroke line cap
    #[serde(rename = "stroke-linecap", default = "default_linecap")]
    pub stroke_linecap: String,

    /// Stroke line join
    #[serde(rename = "stroke-linejoin", default = "default_linejoin")]
    pub stroke_linejoin: String,

    /// Stroke opacity
    #[serde(rename = "stroke-opacity", default = "default_one")]
    pub stroke_opacity: f64,

    /// Fill color; per-entity fills are appended by the renderer when unset
    #[serde(default)]
    pub fill: Option<String>,
}

impl FontConfig {
    /// Defaults for map titles: larger type, black fill.
    pub fn title_default() -> Self {
        Self {
            font_size: "21px".to_string(),
            fill: Some("#000000".to_string()),
            ..Self::default()
        }
    }

    /// Defaults for legend labels: anchored at the left of the text.
    pub fn legend_default() -> Self {
        Self {
            text_anchor: "left".to_string(),
            ..Self::default()
        }
    }

    /// Render as an inline SVG style string (`property:value;...`).
    pub fn to_style(&self) -> String {
        let mut pairs = vec![
            format!("font-style:{}", self.font_style),
            format!("font-weight:{}", self.font_weight),
            format!("font-size:{}", self.font_size),
            format!("line-height:{}", self.line_height),
            format!("text-anchor:{}", self.text_anchor),
            format!("font-family:{}", self.font_family),
            format!("letter-spacing:{}", self.letter_spacing),
            format!("word-spacing:{}", self.word_spacing),
            format!("fill-opacity:{}", self.fill_opacity),
            format!("stroke:{}", self.stroke),
            format!("stroke-width:{}", self.stroke_width),
            format!("stroke-linecap:{}", self.stroke_linecap),
            format!("stroke-linejoin:{}", self.stroke_linejoin),
            format!("stroke-opacity:{}", self.stroke_opacity),
        ];
        if let Some(fill) = &self.fill {
            pairs.push(format!("fill:{}", fill));
        }
        pairs.join(";")
    }

    /// The numeric part of `font_size`, needed for legend title spacing.
    pub fn font_size_px(&self) -> Result<f64> {
        self.font_size
            .trim_end_matches("px")
            .parse()
            .map_err(|_| MinardError::InvalidParameter {
                param: "font-size".to_string(),
                message: format!("'{}' is not a pixel size", self.font_size),
            })
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            font_style: default_font_style(),
            font_weight: default_font_weight(),
            font_size: default_font_size(),
            line_height: default_line_height(),
            text_anchor: default_text_anchor(),
            font_family: default_font_family(),
            letter_spacing: default_zero_px(),
            word_spacing: default_zero_px(),
            fill_opacity: default_one(),
            stroke: default_none(),
            stroke_width: default_stroke_width_px(),
            stroke_linecap: default_linecap(),
            stroke_linejoin: default_linejoin(),
            stroke_opacity: default_one(),
            fill: None,
        }
    }
}

/// Spatial layout for the grid draw modes (square, hex, multi-hex,
/// multi-square).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSpacing {
    /// Left margin in pixels
    #[serde(default = "default_margin_left")]
    pub margin_left: f64,

    /// Top margin in pixels
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,

    /// Right margin in pixels
    #[serde(default = "default_margin_right")]
    pub margin_right: f64,

    /// Bottom margin in pixels
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,

    /// Cell width in pixels (hexagon width across the flats)
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,

    /// Vertical position of the title baseline
    #[serde(default = "default_title_y_offset")]
    pub title_y_offset: f64,

    /// Vertical offset of the cell label from the cell origin
    #[serde(default = "default_name_y_offset")]
    pub name_y_offset: f64,

    /// Corner radius for square cells
    #[serde(default = "default_roundedness")]
    pub roundedness: f64,

    /// Space between adjacent cells
    #[serde(default = "default_gutter")]
    pub gutter: f64,

    /// Cell outline color
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,

    /// Cell outline width
    #[serde(default)]
    pub stroke_width: f64,

    /// Fill for entities missing from the id/color association
    #[serde(default = "default_missing_color")]
    pub missing_color: String,

    /// Label color for entities missing from the id/color association
    #[serde(default = "default_missing_font_color")]
    pub missing_font_color: String,

    /// Legend position relative to its default corner
    #[serde(default = "default_grid_legend_offset")]
    pub legend_offset: [f64; 2],
}

impl GridSpacing {
    /// Defaults for the contour-walked modes: smaller cells, a visible
    /// stroke, and no gutter (contours share edges).
    pub fn contour_default() -> Self {
        Self {
            cell_width: 30.0,
            stroke_width: 1.0,
            gutter: 0.0,
            ..Self::default()
        }
    }
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            margin_left: default_margin_left(),
            margin_top: default_margin_top(),
            margin_right: default_margin_right(),
            margin_bottom: default_margin_bottom(),
            cell_width: default_cell_width(),
            title_y_offset: default_title_y_offset(),
            name_y_offset: default_name_y_offset(),
            roundedness: default_roundedness(),
            gutter: default_gutter(),
            stroke_color: default_stroke_color(),
            stroke_width: 0.0,
            missing_color: default_missing_color(),
            missing_font_color: default_missing_font_color(),
            legend_offset: default_grid_legend_offset(),
        }
    }
}

/// Spatial layout for the geographic map mode.
///
/// Canvas size depends on where the paths came from; the defaults fit the
/// common 959x593 USA state map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapSpacing {
    /// Width of the supplied path artwork
    #[serde(default = "default_map_width")]
    pub map_width: f64,

    /// Height of the supplied path artwork
    #[serde(default = "default_map_height")]
    pub map_height: f64,

    /// Left margin in pixels
    #[serde(default = "default_map_margin_left")]
    pub margin_left: f64,

    /// Top margin in pixels
    #[serde(default = "default_map_margin_top")]
    pub margin_top: f64,

    /// Right margin in pixels
    #[serde(default = "default_margin_right")]
    pub margin_right: f64,

    /// Bottom margin in pixels
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,

    /// Vertical position of the title baseline
    #[serde(default = "default_map_title_y_offset")]
    pub title_y_offset: f64,

    /// Region outline color
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,

    /// Region outline width
    #[serde(default = "default_map_stroke_width")]
    pub stroke_width: f64,

    /// Fill for entities missing from the id/color association
    #[serde(default = "default_missing_color")]
    pub missing_color: String,

    /// Legend position relative to its default corner
    #[serde(default)]
    pub legend_offset: [f64; 2],
}

impl Default for MapSpacing {
    fn default() -> Self {
        Self {
            map_width: default_map_width(),
            map_height: default_map_height(),
            margin_left: default_map_margin_left(),
            margin_top: default_map_margin_top(),
            margin_right: default_margin_right(),
            margin_bottom: default_margin_bottom(),
            title_y_offset: default_map_title_y_offset(),
            stroke_color: default_stroke_color(),
            stroke_width: default_map_stroke_width(),
            missing_color: default_missing_color(),
            legend_offset: [0.0, 0.0],
        }
    }
}

/// Legend box sizing and label placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendConfig {
    /// Swatch width in pixels; `None` makes swatches square
    #[serde(default)]
    pub box_width: Option<f64>,

    /// Total height of the swatch stack, excluding the title
    #[serde(default = "default_legend_height")]
    pub height: f64,

    /// Space between swatches
    #[serde(default = "default_legend_gutter")]
    pub gutter: f64,

    /// Swatch outline width
    #[serde(default = "default_map_stroke_width")]
    pub stroke_width: f64,

    /// Swatch outline color
    #[serde(default = "default_legend_stroke_color")]
    pub stroke_color: String,

    /// Horizontal gap between swatch and label
    #[serde(default = "default_label_x_offset")]
    pub label_x_offset: f64,

    /// Vertical nudge of labels toward swatch centers
    #[serde(default = "default_label_y_offset")]
    pub label_y_offset: f64,

    /// Label typography
    #[serde(default = "FontConfig::legend_default")]
    pub font: FontConfig,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            box_width: None,
            height: default_legend_height(),
            gutter: default_legend_gutter(),
            stroke_width: default_map_stroke_width(),
            stroke_color: default_legend_stroke_color(),
            label_x_offset: default_label_x_offset(),
            label_y_offset: default_label_y_offset(),
            font: FontConfig::legend_default(),
        }
    }
}

/// How label colors are assigned to entities.
///
/// Resolved to one color per entity up front, so the draw loop never
/// branches on the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontColors {
    /// One color for every label
    Uniform(String),
    /// One color per entity, parallel to the caller's id list
    PerEntity(Vec<String>),
    /// Label color looked up from each entity's fill color
    PerColor(HashMap<String, String>),
}

impl FontColors {
    /// Resolve to a per-entity color list.
    ///
    /// `colors` is the caller's fill color list, used by the `PerColor`
    /// variant. Length mismatches and missing fill keys are fatal.
    pub fn resolve(&self, colors: &[String]) -> Result<Vec<String>> {
        match self {
            FontColors::Uniform(color) => Ok(vec![color.clone(); colors.len()]),
            FontColors::PerEntity(list) => {
                if list.len() != colors.len() {
                    return Err(MinardError::InvalidParameter {
                        param: "font_colors".to_string(),
                        message: format!(
                            "expected {} per-entity colors, got {}",
                            colors.len(),
                            list.len()
                        ),
                    });
                }
                Ok(list.clone())
            }
            FontColors::PerColor(map) => colors
                .iter()
                .map(|fill| {
                    map.get(fill).cloned().ok_or_else(|| MinardError::InvalidParameter {
                        param: "font_colors".to_string(),
                        message: format!("no font color mapped for fill '{}'", fill),
                    })
                })
                .collect(),
        }
    }
}

impl Default for FontColors {
    fn default() -> Self {
        FontColors::Uniform("#000000".to_string())
    }
}

/// Merge a partial JSON overlay over a base configuration.
///
/// Returns a new value; the base is untouched. Keys absent from the overlay
/// keep the base value, and a key the target type does not recognize is a
/// fatal error rather than a silent no-op.
pub fn apply_overlay<T>(base: &T, overlay: &serde_json::Value) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let overlay_map = overlay.as_object().ok_or_else(|| MinardError::InvalidParameter {
        param: "overlay".to_string(),
        message: "configuration overlay must be a JSON object".to_string(),
    })?;

    let mut merged = serde_json::to_value(base)?;
    let merged_map = merged.as_object_mut().ok_or_else(|| MinardError::InvalidParameter {
        param: "overlay".to_string(),
        message: "base configuration did not serialize to an object".to_string(),
    })?;
    for (key, value) in overlay_map {
        merged_map.insert(key.clone(), value.clone());
    }

    Ok(serde_json::from_value(merged)?)
}

// Default value functions for serde
fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_size() -> String {
    "12px".to_string()
}

fn default_line_height() -> String {
    "125%".to_string()
}

fn default_text_anchor() -> String {
    "middle".to_string()
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_zero_px() -> String {
    "0px".to_string()
}

fn default_one() -> f64 {
    1.0
}

fn default_none() -> String {
    "none".to_string()
}

fn default_stroke_width_px() -> String {
    "1px".to_string()
}

fn default_linecap() -> String {
    "butt".to_string()
}

fn default_linejoin() -> String {
    "miter".to_string()
}

fn default_margin_left() -> f64 {
    30.0
}

fn default_margin_top() -> f64 {
    60.0
}

fn default_margin_right() -> f64 {
    80.0
}

fn default_margin_bottom() -> f64 {
    20.0
}

fn default_cell_width() -> f64 {
    40.0
}

fn default_title_y_offset() -> f64 {
    30.0
}

fn default_name_y_offset() -> f64 {
    15.0
}

fn default_roundedness() -> f64 {
    3.0
}

fn default_gutter() -> f64 {
    1.0
}

fn default_stroke_color() -> String {
    "#ffffff".to_string()
}

fn default_missing_color() -> String {
    "#a0a0a0".to_string()
}

fn default_missing_font_color() -> String {
    "#000000".to_string()
}

fn default_grid_legend_offset() -> [f64; 2] {
    [0.0, -10.0]
}

fn default_map_width() -> f64 {
    959.0
}

fn default_map_height() -> f64 {
    593.0
}

fn default_map_margin_left() -> f64 {
    10.0
}

fn default_map_margin_top() -> f64 {
    20.0
}

fn default_map_title_y_offset() -> f64 {
    45.0
}

fn default_map_stroke_width() -> f64 {
    0.5
}

fn default_legend_height() -> f64 {
    100.0
}

fn default_legend_gutter() -> f64 {
    2.0
}

fn default_legend_stroke_color() -> String {
    "#303030".to_string()
}

fn default_label_x_offset() -> f64 {
    2.0
}

fn default_label_y_offset() -> f64 {
    3.0
}
