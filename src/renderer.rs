//! Choropleth grid rendering.
//!
//! [`ChoroGrid`] joins an entity table with a caller-supplied id/color
//! association and draws it as one of five grid styles: square cells,
//! hexagonal cells (either orientation), contour-walked multi-hex or
//! multi-square shapes, or a geographic map of pre-computed paths. Each
//! draw produces an open [`Document`] that can take freeform fragments
//! before being finalized.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::{FontColors, FontConfig, GridSpacing, LegendConfig, MapSpacing};
use crate::document::{DisplaySink, Document, Element};
use crate::error::{MinardError, Result};
use crate::geometry::{
    hex_extent, hex_origin, hexagon_points, multihex_extent, multihex_origin, multisquare_extent,
    multisquare_origin, square_extent, square_origin, trace_hex_contour, trace_square_contour,
    HexOrientation,
};
use crate::logging::log_draw_stats;
use crate::table::EntityTable;

/// Styling and layout options shared by the grid draw modes.
#[derive(Debug, Clone, Default)]
pub struct DrawOptions {
    /// Cell label typography
    pub font: FontConfig,
    /// Margins, cell size, gutters, fallback colors
    pub spacing: GridSpacing,
    /// Label color assignment
    pub font_colors: FontColors,
}

impl DrawOptions {
    /// Options tuned for the contour-walked modes.
    pub fn contour_default() -> Self {
        Self {
            spacing: GridSpacing::contour_default(),
            ..Self::default()
        }
    }
}

/// Table columns consumed by the contour draw modes.
#[derive(Debug, Clone)]
pub struct ContourColumns {
    /// Anchor cell x index
    pub x: String,
    /// Anchor cell y index
    pub y: String,
    /// Direction-letter contour string
    pub contour: String,
    /// Label offset east of the anchor, in cell widths
    pub label_offset_x: String,
    /// Label offset south of the anchor, in cell heights
    pub label_offset_y: String,
}

impl ContourColumns {
    /// Column names conventionally used for multi-hex tables.
    pub fn multihex() -> Self {
        Self {
            x: "fourhex_x".to_string(),
            y: "fourhex_y".to_string(),
            contour: "fourhex_contour".to_string(),
            label_offset_x: "fourhex_label_offset_x".to_string(),
            label_offset_y: "fourhex_label_offset_y".to_string(),
        }
    }

    /// Column names conventionally used for multi-square tables.
    pub fn multisquare() -> Self {
        Self {
            x: "multisquare_x".to_string(),
            y: "multisquare_y".to_string(),
            contour: "multisquare_contour".to_string(),
            label_offset_x: "multisquare_label_offset_x".to_string(),
            label_offset_y: "multisquare_label_offset_y".to_string(),
        }
    }
}

/// Legend parameters, resolved once at [`ChoroGrid::set_legend`] time so
/// every subsequent draw can attach the same legend.
#[derive(Debug, Clone)]
struct Legend {
    colors: Vec<String>,
    labels: Vec<String>,
    title: Option<String>,
    height: f64,
    box_height: f64,
    box_width: f64,
    box_offset: f64,
    y_offset: f64,
    gutter: f64,
    stroke_width: f64,
    stroke_color: String,
    label_x_offset: f64,
    label_y_offset: f64,
    font_style: String,
}

/// A choropleth grid renderer bound to one entity table.
pub struct ChoroGrid {
    table: EntityTable,
    table_ids: Vec<String>,
    ids: Vec<String>,
    colors: Vec<String>,
    color_index: HashMap<String, usize>,
    title: Option<(String, FontConfig)>,
    legend: Option<Legend>,
    doc: Option<Document>,
    fragment_offset: [f64; 2],
}

impl ChoroGrid {
    /// Create a renderer from a CSV entity table.
    ///
    /// `ids` and `colors` are parallel; ids present here but absent from
    /// the table (and table ids absent from here) are warned about and
    /// rendered with the missing-color fallback, not rejected.
    pub fn new(
        csv_path: &Path,
        ids: Vec<String>,
        colors: Vec<String>,
        id_column: &str,
    ) -> Result<Self> {
        let table = EntityTable::from_path(csv_path, id_column)?;
        Self::with_table(table, ids, colors)
    }

    /// Create a renderer from CSV text already in memory.
    pub fn from_reader<R: Read>(
        reader: R,
        ids: Vec<String>,
        colors: Vec<String>,
        id_column: &str,
    ) -> Result<Self> {
        let table = EntityTable::from_reader(reader, id_column)?;
        Self::with_table(table, ids, colors)
    }

    fn with_table(table: EntityTable, ids: Vec<String>, colors: Vec<String>) -> Result<Self> {
        if ids.len() != colors.len() {
            return Err(MinardError::InvalidParameter {
                param: "colors".to_string(),
                message: format!("{} ids but {} colors", ids.len(), colors.len()),
            });
        }

        let table_ids = table.ids()?;
        let table_set: HashSet<&String> = table_ids.iter().collect();
        let id_set: HashSet<&String> = ids.iter().collect();

        let invalid: Vec<&str> = ids
            .iter()
            .filter(|id| !table_set.contains(id))
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            warn!(ids = ?invalid, "Ids not recognized in the entity table");
        }
        let missing: Vec<&str> = table_ids
            .iter()
            .filter(|id| !id_set.contains(id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            warn!(ids = ?missing, "Table ids not included in the id list");
        }

        let color_index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Ok(Self {
            table,
            table_ids,
            ids,
            colors,
            color_index,
            title: None,
            legend: None,
            doc: None,
            fragment_offset: [0.0, 0.0],
        })
    }

    /// Replace the color list supplied at construction.
    pub fn set_colors(&mut self, colors: Vec<String>) -> Result<()> {
        if colors.len() != self.ids.len() {
            return Err(MinardError::InvalidParameter {
                param: "colors".to_string(),
                message: format!("{} ids but {} colors", self.ids.len(), colors.len()),
            });
        }
        self.colors = colors;
        Ok(())
    }

    /// Set a title rendered by every subsequent draw. `None` typography
    /// uses the title defaults.
    pub fn set_title(&mut self, title: &str, font: Option<FontConfig>) {
        self.title = Some((title.to_string(), font.unwrap_or_else(FontConfig::title_default)));
    }

    /// Configure a legend attached by every subsequent draw.
    ///
    /// `labels` may have one entry per color (beside each box), one per
    /// fencepost (boxes + 1), or exactly two (first/last, with blanks
    /// interpolated between). Any other arity is fatal.
    pub fn set_legend(
        &mut self,
        colors: &[String],
        labels: &[String],
        title: Option<&str>,
        config: &LegendConfig,
    ) -> Result<()> {
        // Swatches stack bottom-up: last color at the top of the legend.
        let colors: Vec<String> = colors.iter().rev().cloned().collect();
        let mut labels: Vec<String> = labels.iter().rev().cloned().collect();
        if labels.len() == 2 && colors.len() > 2 {
            let mut expanded = Vec::with_capacity(colors.len() + 1);
            expanded.push(labels[0].clone());
            expanded.extend(std::iter::repeat(String::new()).take(colors.len() - 1));
            expanded.push(labels[1].clone());
            labels = expanded;
        }
        if labels.len() != colors.len() && labels.len() != colors.len() + 1 {
            return Err(MinardError::Legend {
                message: format!(
                    "{} labels cannot annotate {} colors; use as many labels as colors, one \
                     more, or exactly two",
                    labels.len(),
                    colors.len()
                ),
            });
        }

        let title = title.filter(|t| !t.is_empty()).map(str::to_string);
        let mut height_n = labels.len();
        if title.is_some() {
            height_n += 1;
        }
        let box_height = (config.height - config.gutter) / height_n as f64 - config.gutter;
        let box_width = config.box_width.unwrap_or(box_height);
        // Fencepost labels sit half a box higher, on the box boundaries.
        let box_offset =
            (labels.len() - colors.len()) as f64 * (box_height + config.gutter) / 2.0;
        let y_offset = if title.is_some() {
            config.font.font_size_px()? + config.gutter * 0.75
        } else {
            0.0
        };

        self.legend = Some(Legend {
            colors,
            labels,
            title,
            height: config.height,
            box_height,
            box_width,
            box_offset,
            y_offset,
            gutter: config.gutter,
            stroke_width: config.stroke_width,
            stroke_color: config.stroke_color.clone(),
            label_x_offset: config.label_x_offset,
            label_y_offset: config.label_y_offset,
            font_style: config.font.to_style(),
        });
        Ok(())
    }

    /// Append a freeform SVG fragment to the open document.
    ///
    /// The fragment is wrapped in a translate group; offsets accumulate the
    /// margin translation a map draw introduces, so fragment coordinates
    /// line up with the map artwork. Must be called after a draw.
    pub fn add_svg(&mut self, fragment: &str, offset: [f64; 2]) -> Result<()> {
        let offset = [
            offset[0] + self.fragment_offset[0],
            offset[1] + self.fragment_offset[1],
        ];
        let doc = self.doc.as_mut().ok_or_else(|| MinardError::InvalidParameter {
            param: "fragment".to_string(),
            message: "no open document; draw before adding fragments".to_string(),
        })?;
        doc.push_fragment(format!(
            "<g transform=\"translate({} {})\">{}</g>",
            offset[0], offset[1], fragment
        ));
        Ok(())
    }

    /// Draw a square-cell grid from integer coordinate columns.
    pub fn draw_squares(
        &mut self,
        x_column: &str,
        y_column: &str,
        options: &DrawOptions,
    ) -> Result<()> {
        let spacing = &options.spacing;
        let font_colors = options.font_colors.resolve(&self.colors)?;
        let font_style = options.font.to_style();

        let max_across = self.table.max_i64(x_column)?;
        let max_down = self.table.max_i64(y_column)?;
        let (total_width, total_height) = square_extent(max_across, max_down, spacing);
        let mut doc = Document::new(total_width, total_height);

        for row in 0..self.table.len() {
            let id = self.table_ids[row].clone();
            let (color, font_color) = self.entity_colors(&id, &font_colors, &spacing.missing_color,
                &spacing.missing_font_color);
            let across = self.table.i64_value(row, x_column)?;
            let down = self.table.i64_value(row, y_column)?;
            let (x, y) = square_origin(across, down, spacing);

            doc.push(
                Element::new("rect")
                    .attr("id", format!("rect{}", id))
                    .attr("x", x)
                    .attr("y", y)
                    .attr("ry", spacing.roundedness.max(0.0))
                    .attr("width", spacing.cell_width)
                    .attr("height", spacing.cell_width)
                    .attr("style", shape_style(&spacing.stroke_color, spacing.stroke_width, &color)),
            );
            doc.push(
                Element::new("text")
                    .attr("id", format!("text{}", id))
                    .attr("x", x + spacing.cell_width / 2.0)
                    .attr("y", y + spacing.name_y_offset)
                    .attr("style", format!("{};fill:{}", font_style, font_color))
                    .text(&id),
            );
        }

        self.attach_legend(&mut doc, total_width, total_height, spacing.margin_right,
            spacing.legend_offset);
        self.attach_title(
            &mut doc,
            title_x(total_width, spacing.margin_left, spacing.margin_right),
            spacing.title_y_offset,
        );
        self.open_document(doc, "squares");
        Ok(())
    }

    /// Draw a hexagonal grid in the given orientation.
    pub fn draw_hex(
        &mut self,
        x_column: &str,
        y_column: &str,
        orientation: HexOrientation,
        options: &DrawOptions,
    ) -> Result<()> {
        let spacing = &options.spacing;
        let font_colors = options.font_colors.resolve(&self.colors)?;
        let font_style = options.font.to_style();
        let w = spacing.cell_width;

        let max_across = self.table.max_i64(x_column)?;
        let max_down = self.table.max_i64(y_column)?;
        let (total_width, total_height) = hex_extent(max_across, max_down, spacing, orientation);
        let mut doc = Document::new(total_width, total_height);

        for row in 0..self.table.len() {
            let id = self.table_ids[row].clone();
            let (color, font_color) = self.entity_colors(&id, &font_colors, &spacing.missing_color,
                &spacing.missing_font_color);
            let across = self.table.i64_value(row, x_column)?;
            let down = self.table.i64_value(row, y_column)?;
            let (x, y) = hex_origin(across, down, spacing, orientation);

            doc.push(
                Element::new("polygon")
                    .attr("id", format!("hex{}", id))
                    .attr("points", hexagon_points(x, y, w, orientation))
                    .attr("style", shape_style(&spacing.stroke_color, spacing.stroke_width, &color)),
            );
            doc.push(
                Element::new("text")
                    .attr("id", format!("text{}", id))
                    .attr("x", x + w / 2.0)
                    .attr("y", y + spacing.name_y_offset)
                    .attr("style", format!("{};fill:{}", font_style, font_color))
                    .text(&id),
            );
        }

        self.attach_legend(&mut doc, total_width, total_height, spacing.margin_right,
            spacing.legend_offset);
        self.attach_title(
            &mut doc,
            title_x(total_width, spacing.margin_left, spacing.margin_right),
            spacing.title_y_offset,
        );
        self.open_document(doc, "hex");
        Ok(())
    }

    /// Draw contour-walked multi-hex shapes.
    pub fn draw_multihex(&mut self, columns: &ContourColumns, options: &DrawOptions) -> Result<()> {
        let spacing = &options.spacing;
        let font_colors = options.font_colors.resolve(&self.colors)?;
        let font_style = options.font.to_style();
        let w = spacing.cell_width;
        let h = w / 3f64.sqrt();

        let max_across = self.table.max_i64(&columns.x)?;
        let max_down = self.table.max_i64(&columns.y)?;
        let (total_width, total_height) = multihex_extent(max_across, max_down, spacing);
        let mut doc = Document::new(total_width, total_height);

        for row in 0..self.table.len() {
            let id = self.table_ids[row].clone();
            let (color, font_color) = self.entity_colors(&id, &font_colors, &spacing.missing_color,
                &spacing.missing_font_color);
            let across = self.table.i64_value(row, &columns.x)?;
            let down = self.table.i64_value(row, &columns.y)?;
            let contour = self.table.str_value(row, &columns.contour)?.to_string();
            let label_off_x = self.table.f64_value(row, &columns.label_offset_x)?;
            let label_off_y = self.table.f64_value(row, &columns.label_offset_y)?;
            let (x, y) = multihex_origin(across, down, spacing);

            doc.push(
                Element::new("path")
                    .attr("id", format!("hex{}", id))
                    .attr("d", trace_hex_contour(x, y, w, &contour)?)
                    .attr("style", shape_style(&spacing.stroke_color, spacing.stroke_width, &color)),
            );
            doc.push(
                Element::new("text")
                    .attr("id", format!("text{}", id))
                    .attr("x", x + w / 2.0 + w * label_off_x)
                    .attr("y", y + spacing.name_y_offset + h * label_off_y)
                    .attr("style", format!("{};fill:{}", font_style, font_color))
                    .text(&id),
            );
        }

        self.attach_legend(&mut doc, total_width, total_height, spacing.margin_right,
            spacing.legend_offset);
        self.attach_title(
            &mut doc,
            title_x(total_width, spacing.margin_left, spacing.margin_right),
            spacing.title_y_offset,
        );
        self.open_document(doc, "multihex");
        Ok(())
    }

    /// Draw contour-walked multi-square shapes.
    pub fn draw_multisquare(
        &mut self,
        columns: &ContourColumns,
        options: &DrawOptions,
    ) -> Result<()> {
        let spacing = &options.spacing;
        let font_colors = options.font_colors.resolve(&self.colors)?;
        let font_style = options.font.to_style();
        let w = spacing.cell_width;

        let max_across = self.table.max_i64(&columns.x)?;
        let max_down = self.table.max_i64(&columns.y)?;
        let (total_width, total_height) = multisquare_extent(max_across, max_down, spacing);
        let mut doc = Document::new(total_width, total_height);

        for row in 0..self.table.len() {
            let id = self.table_ids[row].clone();
            let (color, font_color) = self.entity_colors(&id, &font_colors, &spacing.missing_color,
                &spacing.missing_font_color);
            let across = self.table.i64_value(row, &columns.x)?;
            let down = self.table.i64_value(row, &columns.y)?;
            let contour = self.table.str_value(row, &columns.contour)?.to_string();
            let label_off_x = self.table.f64_value(row, &columns.label_offset_x)?;
            let label_off_y = self.table.f64_value(row, &columns.label_offset_y)?;
            let (x, y) = multisquare_origin(across, down, spacing);

            doc.push(
                Element::new("path")
                    .attr("id", format!("square{}", id))
                    .attr("d", trace_square_contour(x, y, w, &contour)?)
                    .attr("style", shape_style(&spacing.stroke_color, spacing.stroke_width, &color)),
            );
            doc.push(
                Element::new("text")
                    .attr("id", format!("text{}", id))
                    .attr("x", x + w / 2.0 + w * label_off_x)
                    .attr("y", y + spacing.name_y_offset + w * label_off_y)
                    .attr("style", format!("{};fill:{}", font_style, font_color))
                    .text(&id),
            );
        }

        self.attach_legend(&mut doc, total_width, total_height, spacing.margin_right,
            spacing.legend_offset);
        self.attach_title(
            &mut doc,
            title_x(total_width, spacing.margin_left, spacing.margin_right),
            spacing.title_y_offset,
        );
        self.open_document(doc, "multisquare");
        Ok(())
    }

    /// Draw a geographic map from a column of pre-computed path data.
    ///
    /// Map shapes carry no labels; positions and scale are taken from the
    /// paths as given. The margin translation is remembered so later
    /// fragments line up with the artwork.
    pub fn draw_map(&mut self, path_column: &str, spacing: &MapSpacing) -> Result<()> {
        let total_width = spacing.map_width + spacing.margin_left + spacing.margin_right;
        let total_height = spacing.map_height + spacing.margin_top + spacing.margin_bottom;
        let mut doc = Document::new(total_width, total_height);

        let mut map_group = Element::new("g").attr(
            "transform",
            format!("translate({} {})", spacing.margin_left, spacing.margin_top),
        );
        for row in 0..self.table.len() {
            let id = self.table_ids[row].clone();
            let color = self.entity_color(&id, &spacing.missing_color);
            let path = self.table.str_value(row, path_column)?.to_string();
            map_group.push(
                Element::new("path")
                    .attr("id", &id)
                    .attr("d", path)
                    .attr("style", shape_style(&spacing.stroke_color, spacing.stroke_width, &color)),
            );
        }
        doc.push(map_group);

        self.attach_legend(&mut doc, total_width, total_height, spacing.margin_right,
            spacing.legend_offset);
        self.attach_title(
            &mut doc,
            title_x(total_width, spacing.margin_left, spacing.margin_right),
            spacing.title_y_offset,
        );
        self.doc = Some(doc);
        self.fragment_offset = [spacing.margin_left, spacing.margin_top];
        log_draw_stats("map", self.table.len(), total_width, total_height);
        Ok(())
    }

    /// Serialize the drawn document.
    pub fn done(&self) -> Result<String> {
        Ok(self.require_doc()?.to_svg())
    }

    /// Serialize and persist the drawn document, appending the `.svg`
    /// extension when absent. Returns the path actually written.
    pub fn done_to_file(&self, path: &Path) -> Result<PathBuf> {
        self.require_doc()?.save(path)
    }

    /// Serialize and hand the document to a display sink.
    pub fn display(&self, sink: &mut dyn DisplaySink) -> Result<()> {
        sink.show(&self.done()?)
    }

    /// Composite another renderer's document over this one and serialize.
    ///
    /// The overlay's canvas wrapper is stripped; its content (fragments
    /// included) stacks after this document's inside this canvas.
    pub fn done_and_overlay(&self, overlay: &ChoroGrid) -> Result<String> {
        self.require_doc()?.to_svg_with_overlay(overlay.require_doc()?)
    }

    /// [`ChoroGrid::done_and_overlay`], persisted to a file.
    pub fn done_and_overlay_to_file(&self, overlay: &ChoroGrid, path: &Path) -> Result<PathBuf> {
        let svg = self.done_and_overlay(overlay)?;
        let path = crate::document::normalize_svg_path(path);
        std::fs::write(&path, svg)?;
        Ok(path)
    }

    /// The open document, for inspection before finalizing.
    pub fn document(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    fn require_doc(&self) -> Result<&Document> {
        self.doc.as_ref().ok_or_else(|| MinardError::InvalidParameter {
            param: "document".to_string(),
            message: "nothing drawn yet".to_string(),
        })
    }

    fn open_document(&mut self, doc: Document, mode: &str) {
        log_draw_stats(mode, self.table.len(), doc.width(), doc.height());
        self.doc = Some(doc);
        self.fragment_offset = [0.0, 0.0];
    }

    /// Fill color for an entity, falling back for unknown ids.
    fn entity_color(&self, id: &str, missing_color: &str) -> String {
        self.color_index
            .get(id)
            .map(|&i| self.colors[i].clone())
            .unwrap_or_else(|| missing_color.to_string())
    }

    fn entity_colors(
        &self,
        id: &str,
        font_colors: &[String],
        missing_color: &str,
        missing_font_color: &str,
    ) -> (String, String) {
        match self.color_index.get(id) {
            Some(&i) => (self.colors[i].clone(), font_colors[i].clone()),
            None => (missing_color.to_string(), missing_font_color.to_string()),
        }
    }

    fn attach_title(&self, doc: &mut Document, x: f64, y: f64) {
        if let Some((title, font)) = &self.title {
            doc.push(
                Element::new("text")
                    .attr("id", "title")
                    .attr("x", x)
                    .attr("y", y)
                    .attr("style", font.to_style())
                    .text(title),
            );
        }
    }

    /// Attach the legend group in the right margin, bottom-aligned with
    /// the canvas.
    fn attach_legend(
        &self,
        doc: &mut Document,
        total_width: f64,
        total_height: f64,
        margin_right: f64,
        offset: [f64; 2],
    ) {
        let Some(legend) = &self.legend else {
            return;
        };
        let mut group = Element::new("g").attr(
            "transform",
            format!(
                "translate({} {})",
                total_width - margin_right + offset[0],
                total_height - legend.height + offset[1]
            ),
        );

        for (i, color) in legend.colors.iter().enumerate() {
            let style = format!(
                "fill:{};stroke-width:{}px;stroke:{};fill-rule:evenodd;stroke-linecap:butt;\
                 stroke-linejoin:miter;stroke-opacity:1",
                color, legend.stroke_width, legend.stroke_color
            );
            group.push(
                Element::new("rect")
                    .attr("id", format!("legendbox{}", i))
                    .attr("x", 0)
                    .attr("y", legend.y_offset + i as f64 * (legend.box_height + legend.gutter))
                    .attr("height", legend.box_height)
                    .attr("width", legend.box_width)
                    .attr("style", style),
            );
        }
        for (i, label) in legend.labels.iter().enumerate() {
            group.push(
                Element::new("text")
                    .attr("id", format!("legendlabel{}", i))
                    .attr("x", legend.label_x_offset + legend.box_width + legend.gutter)
                    .attr(
                        "y",
                        legend.label_y_offset
                            + legend.y_offset
                            + i as f64 * (legend.box_height + legend.gutter)
                            + legend.box_height / 2.0
                            - legend.box_offset,
                    )
                    .attr("style", format!("{};alignment-baseline:middle", legend.font_style))
                    .text(label),
            );
        }
        if let Some(title) = &legend.title {
            group.push(
                Element::new("text")
                    .attr("id", "legendtitle")
                    .attr("x", 0)
                    .attr("y", 0)
                    .attr("style", legend.font_style.clone())
                    .text(title),
            );
        }
        doc.push(group);
    }
}

/// Horizontal center of the drawable area, for title placement.
fn title_x(total_width: f64, margin_left: f64, margin_right: f64) -> f64 {
    (total_width - margin_left - margin_right) / 2.0 + margin_left
}

/// Inline style for a filled shape with the configured outline.
fn shape_style(stroke_color: &str, stroke_width: f64, fill: &str) -> String {
    format!(
        "stroke:{};stroke-width:{};stroke-miterlimit:4;stroke-opacity:1;stroke-dasharray:none;\
         fill:{}",
        stroke_color, stroke_width, fill
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
abbrev,square_x,square_y
AA,0,0
BB,1,0
";

    fn grid() -> ChoroGrid {
        ChoroGrid::from_reader(
            CSV.as_bytes(),
            vec!["AA".to_string(), "BB".to_string()],
            vec!["#111111".to_string(), "#222222".to_string()],
            "abbrev",
        )
        .unwrap()
    }

    fn palette(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("#0000{:02x}", i)).collect()
    }

    #[test]
    fn test_mismatched_ids_and_colors_fatal() {
        let result = ChoroGrid::from_reader(
            CSV.as_bytes(),
            vec!["AA".to_string()],
            vec!["#111111".to_string(), "#222222".to_string()],
            "abbrev",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_legend_box_sizing() {
        let mut grid = grid();
        let labels: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        grid.set_legend(&palette(4), &labels, None, &LegendConfig::default()).unwrap();

        let legend = grid.legend.as_ref().unwrap();
        // Height 100 and gutter 2 over four rows: (100 - 2) / 4 - 2.
        assert_eq!(legend.box_height, 22.5);
        // Square swatches by default.
        assert_eq!(legend.box_width, legend.box_height);
        assert_eq!(legend.box_offset, 0.0);
        assert_eq!(legend.y_offset, 0.0);
    }

    #[test]
    fn test_legend_title_reserves_headroom() {
        let mut grid = grid();
        let labels: Vec<String> = (0..3).map(|i| i.to_string()).collect();
        grid.set_legend(&palette(3), &labels, Some("Rate"), &LegendConfig::default()).unwrap();

        let legend = grid.legend.as_ref().unwrap();
        // Default 12px legend font plus three quarters of the gutter.
        assert_eq!(legend.y_offset, 13.5);
        // The title occupies one row of the stack.
        assert_eq!(legend.box_height, (100.0 - 2.0) / 4.0 - 2.0);
    }

    #[test]
    fn test_legend_colors_and_labels_reversed() {
        let mut grid = grid();
        let labels: Vec<String> = vec!["low".to_string(), "high".to_string()];
        grid.set_legend(&palette(2), &labels, None, &LegendConfig::default()).unwrap();

        let legend = grid.legend.as_ref().unwrap();
        assert_eq!(legend.labels, vec!["high", "low"]);
        assert_eq!(legend.colors[0], "#000001");
    }

    #[test]
    fn test_legend_two_labels_expand_to_fenceposts() {
        let mut grid = grid();
        let labels: Vec<String> = vec!["min".to_string(), "max".to_string()];
        grid.set_legend(&palette(5), &labels, None, &LegendConfig::default()).unwrap();

        let legend = grid.legend.as_ref().unwrap();
        assert_eq!(legend.labels.len(), 6);
        assert_eq!(legend.labels[0], "max");
        assert_eq!(legend.labels[5], "min");
        assert!(legend.labels[1..5].iter().all(String::is_empty));
        // Fencepost labels shift up by half a box step.
        assert_eq!(
            legend.box_offset,
            (legend.box_height + legend.gutter) / 2.0
        );
    }
}
