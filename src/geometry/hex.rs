//! Hexagon vertex math and the multi-hex contour walk.
//!
//! Hex grids come in two orientations. In "true rows" the hexagon points
//! face north/south, cells form straight rows, and odd rows shift east by
//! half a cell. In "true columns" the points face east/west, cells form
//! straight columns, and odd columns shift south by half a cell height.

use crate::config::GridSpacing;
use crate::error::{MinardError, Result};
use crate::geometry::PenMove;

/// The two hexagon tiling orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexOrientation {
    /// Points face north/south; rows are straight, odd rows offset east
    TrueRows,
    /// Points face east/west; columns are straight, odd columns offset south
    TrueColumns,
}

/// Vertex list for one hexagon, as an SVG `points` attribute string.
///
/// `(x, y)` is the cell's anchor (northwest vertex for true rows, west
/// vertex for true columns) and `w` the width across the flats.
pub fn hexagon_points(x: f64, y: f64, w: f64, orientation: HexOrientation) -> String {
    match orientation {
        HexOrientation::TrueRows => {
            let h = w / 3f64.sqrt();
            format!(
                "{},{} {},{} {},{} {},{} {},{} {},{}",
                x,
                y,
                x + w / 2.0,
                y - h / 2.0,
                x + w,
                y,
                x + w,
                y + h,
                x + w / 2.0,
                y + 1.5 * h,
                x,
                y + h
            )
        }
        HexOrientation::TrueColumns => {
            let ww = w / 2.0;
            let hh = w * 3f64.sqrt() / 2.0;
            format!(
                "{},{} {},{} {},{} {},{} {},{} {},{}",
                x,
                y,
                x + ww,
                y,
                x + ww * 1.5,
                y - hh / 2.0,
                x + ww,
                y - hh,
                x,
                y - hh,
                x - ww / 2.0,
                y - hh / 2.0
            )
        }
    }
}

/// Anchor coordinates for the hexagon at grid position `(across, down)`.
pub fn hex_origin(
    across: i64,
    down: i64,
    spacing: &GridSpacing,
    orientation: HexOrientation,
) -> (f64, f64) {
    let w = spacing.cell_width;
    match orientation {
        HexOrientation::TrueRows => {
            let h = w / 3f64.sqrt();
            let x_offset = if down % 2 == 1 { w / 2.0 } else { 0.0 };
            let x = spacing.margin_left + x_offset + across as f64 * (w + spacing.gutter);
            let y = spacing.margin_top + down as f64 * (1.5 * h + spacing.gutter);
            (x, y)
        }
        HexOrientation::TrueColumns => {
            let hh = w * 3f64.sqrt() / 2.0;
            // The anchor (west vertex) sits east of the cell's bounding box.
            let x_offset = 0.25 * w;
            let y_offset = if across % 2 == 1 { hh / 2.0 } else { 0.0 };
            let x = spacing.margin_left + x_offset + across as f64 * 0.75 * (w + spacing.gutter);
            let y = spacing.margin_top + y_offset + down as f64 * (hh + spacing.gutter);
            (x, y)
        }
    }
}

/// Canvas extent for a hex grid whose largest indices are
/// `(max_across, max_down)`.
pub fn hex_extent(
    max_across: i64,
    max_down: i64,
    spacing: &GridSpacing,
    orientation: HexOrientation,
) -> (f64, f64) {
    let w = spacing.cell_width;
    let (max_across, max_down) = (max_across as f64, max_down as f64);
    match orientation {
        HexOrientation::TrueRows => {
            let h = w / 3f64.sqrt();
            let width = spacing.margin_left
                + (max_across + 1.5) * w
                + (max_across - 1.0) * spacing.gutter
                + spacing.margin_right;
            let height = spacing.margin_top
                + (max_down * 1.5 + 0.5) * h
                + (max_down - 1.0) * spacing.gutter
                + spacing.margin_bottom;
            (width, height)
        }
        HexOrientation::TrueColumns => {
            let width = spacing.margin_left
                + (max_across * 0.75 + 0.25) * w
                + (max_across - 1.0) * spacing.gutter
                + spacing.margin_right;
            let height = spacing.margin_top
                + (max_down + 1.5) * w
                + (max_down - 1.0) * spacing.gutter
                + spacing.margin_bottom;
            (width, height)
        }
    }
}

/// Anchor coordinates for a multi-hex entity at `(across, down)`.
///
/// Same row layout as true-rows hexes, but without a gutter: contour
/// shapes share their edges.
pub fn multihex_origin(across: i64, down: i64, spacing: &GridSpacing) -> (f64, f64) {
    let w = spacing.cell_width;
    let h = w / 3f64.sqrt();
    let x_offset = if down % 2 == 1 { w / 2.0 } else { 0.0 };
    let x = spacing.margin_left + x_offset + across as f64 * w;
    let y = spacing.margin_top + down as f64 * 1.5 * h;
    (x, y)
}

/// Canvas extent for a multi-hex grid.
pub fn multihex_extent(max_across: i64, max_down: i64, spacing: &GridSpacing) -> (f64, f64) {
    let w = spacing.cell_width;
    let width = spacing.margin_left + (max_across as f64 + 1.5) * w + spacing.margin_right;
    // 1.711 cell widths of headroom covers the southern tip of the lowest row.
    let height = spacing.margin_top + (max_down as f64 + 1.711) * w + spacing.margin_bottom;
    (width, height)
}

/// One hex-edge step of a contour walk: `(pen, dx, dy)` for a cell width
/// `w` and point-height `h = w / sqrt(3)`.
fn hex_step(direction: char, w: f64) -> Result<(PenMove, f64, f64)> {
    let h = w / 3f64.sqrt();
    let pen = if direction.is_lowercase() {
        PenMove::Draw
    } else {
        PenMove::Move
    };
    let (dx, dy) = match direction.to_ascii_lowercase() {
        'a' => (w / 2.0, -h / 2.0),
        'b' => (w / 2.0, h / 2.0),
        'c' => (0.0, h),
        'd' => (-w / 2.0, h / 2.0),
        'e' => (-w / 2.0, -h / 2.0),
        'f' => (0.0, -h),
        _ => {
            return Err(MinardError::InvalidContour {
                message: format!("unrecognized hex direction '{}'", direction),
            })
        }
    };
    Ok((pen, dx, dy))
}

/// Trace a multi-hex contour into SVG path data.
///
/// Directions: `a` up-right, `b` down-right, `c` down, `d` down-left,
/// `e` up-left, `f` up. Upper case moves without drawing. The path starts
/// at `(x, y)` and is closed at the end.
pub fn trace_hex_contour(x: f64, y: f64, w: f64, contour: &str) -> Result<String> {
    let mut result = vec![format!("M{},{}", x, y)];
    let (mut x, mut y) = (x, y);
    for direction in contour.chars() {
        let (pen, dx, dy) = hex_step(direction, w)?;
        x += dx;
        y += dy;
        result.push(format!("{}{},{}", pen.command(), x, y));
    }
    result.push("Z".to_string());
    Ok(result.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hexagon_points_true_rows() {
        // Width 2 gives a point-height of 2/sqrt(3).
        let h = 2.0 / 3f64.sqrt();
        let points = hexagon_points(0.0, 0.0, 2.0, HexOrientation::TrueRows);
        let expected = format!(
            "0,0 1,{} 2,0 2,{} 1,{} 0,{}",
            -h / 2.0,
            h,
            1.5 * h,
            h
        );
        assert_eq!(points, expected);
    }

    #[test]
    fn test_hexagon_points_true_columns_vertex_count() {
        let points = hexagon_points(10.0, 10.0, 4.0, HexOrientation::TrueColumns);
        assert_eq!(points.split(' ').count(), 6);
        // West vertex is the anchor itself.
        assert!(points.starts_with("10,10 "));
    }

    #[test]
    fn test_hex_origin_odd_row_offset() {
        let spacing = GridSpacing {
            margin_left: 0.0,
            margin_top: 0.0,
            gutter: 0.0,
            cell_width: 40.0,
            ..GridSpacing::default()
        };
        let (x0, _) = hex_origin(0, 0, &spacing, HexOrientation::TrueRows);
        let (x1, _) = hex_origin(0, 1, &spacing, HexOrientation::TrueRows);
        assert_eq!(x0, 0.0);
        // Odd rows shift east by half a cell.
        assert_eq!(x1, 20.0);
    }

    #[test]
    fn test_hex_origin_odd_column_offset() {
        let spacing = GridSpacing {
            margin_left: 0.0,
            margin_top: 0.0,
            gutter: 0.0,
            cell_width: 40.0,
            ..GridSpacing::default()
        };
        let hh = 40.0 * 3f64.sqrt() / 2.0;
        let (_, y0) = hex_origin(0, 0, &spacing, HexOrientation::TrueColumns);
        let (_, y1) = hex_origin(1, 0, &spacing, HexOrientation::TrueColumns);
        assert_eq!(y0, 0.0);
        assert_eq!(y1, hh / 2.0);
    }

    #[test]
    fn test_trace_hex_contour_single_cell() {
        // "abcdef" walks one full hexagon clockwise from the northwest vertex.
        let path = trace_hex_contour(0.0, 0.0, 2.0, "abcdef").unwrap();
        assert!(path.starts_with("M0,0 L"));
        assert!(path.ends_with(" Z"));
        assert_eq!(path.matches('L').count(), 6);

        // A closed walk returns to the anchor (modulo float residue).
        let segments: Vec<&str> = path.split(' ').collect();
        let last = segments[segments.len() - 2].trim_start_matches('L');
        let (x, y) = last.split_once(',').unwrap();
        assert!(x.parse::<f64>().unwrap().abs() < 1e-9);
        assert!(y.parse::<f64>().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_trace_hex_contour_uppercase_moves() {
        let path = trace_hex_contour(0.0, 0.0, 2.0, "bcC").unwrap();
        // The upper-case step emits a move, starting a disjoint sub-contour.
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('L').count(), 2);
    }

    #[test]
    fn test_trace_hex_contour_rejects_bad_letter() {
        assert!(trace_hex_contour(0.0, 0.0, 2.0, "abz").is_err());
    }

    #[test]
    fn test_hex_extent_true_rows() {
        let spacing = GridSpacing::default();
        let (width, height) = hex_extent(10, 6, &spacing, HexOrientation::TrueRows);
        let h = 40.0 / 3f64.sqrt();
        assert_eq!(
            width,
            spacing.margin_left + 11.5 * 40.0 + 9.0 + spacing.margin_right
        );
        assert_eq!(
            height,
            spacing.margin_top + 9.5 * h + 5.0 + spacing.margin_bottom
        );
    }
}
