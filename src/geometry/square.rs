//! Square cell layout and the multi-square contour walk.

use crate::config::GridSpacing;
use crate::error::{MinardError, Result};
use crate::geometry::PenMove;

/// Top-left corner of the square cell at grid position `(across, down)`.
pub fn square_origin(across: i64, down: i64, spacing: &GridSpacing) -> (f64, f64) {
    let step = spacing.cell_width + spacing.gutter;
    (
        spacing.margin_left + across as f64 * step,
        spacing.margin_top + down as f64 * step,
    )
}

/// Canvas extent for a square grid whose largest indices are
/// `(max_across, max_down)`.
pub fn square_extent(max_across: i64, max_down: i64, spacing: &GridSpacing) -> (f64, f64) {
    let width = spacing.margin_left
        + (max_across as f64 + 1.0) * spacing.cell_width
        + max_across as f64 * spacing.gutter
        + spacing.margin_right;
    let height = spacing.margin_top
        + (max_down as f64 + 1.0) * spacing.cell_width
        + max_down as f64 * spacing.gutter
        + spacing.margin_bottom;
    (width, height)
}

/// Anchor for a multi-square entity at `(across, down)`; no gutter, since
/// contour shapes share edges.
pub fn multisquare_origin(across: i64, down: i64, spacing: &GridSpacing) -> (f64, f64) {
    (
        spacing.margin_left + across as f64 * spacing.cell_width,
        spacing.margin_top + down as f64 * spacing.cell_width,
    )
}

/// Canvas extent for a multi-square grid.
pub fn multisquare_extent(max_across: i64, max_down: i64, spacing: &GridSpacing) -> (f64, f64) {
    (
        spacing.margin_left + (max_across as f64 + 1.0) * spacing.cell_width + spacing.margin_right,
        spacing.margin_top + (max_down as f64 + 1.0) * spacing.cell_width + spacing.margin_bottom,
    )
}

/// One square-edge step of a contour walk.
///
/// Drawing steps: `a` right, `b` down, `c` left, `d` up. Moving steps:
/// `A` right, `B` up, `C` left, `D` down. Note that `B` and `D` move
/// opposite their drawing counterparts; existing contour data encodes
/// this, so it is preserved.
fn square_step(direction: char, w: f64) -> Result<(PenMove, f64, f64)> {
    match direction {
        'a' => Ok((PenMove::Draw, w, 0.0)),
        'b' => Ok((PenMove::Draw, 0.0, w)),
        'c' => Ok((PenMove::Draw, -w, 0.0)),
        'd' => Ok((PenMove::Draw, 0.0, -w)),
        'A' => Ok((PenMove::Move, w, 0.0)),
        'B' => Ok((PenMove::Move, 0.0, -w)),
        'C' => Ok((PenMove::Move, -w, 0.0)),
        'D' => Ok((PenMove::Move, 0.0, w)),
        _ => Err(MinardError::InvalidContour {
            message: format!("unrecognized square direction '{}'", direction),
        }),
    }
}

/// Trace a multi-square contour into SVG path data.
///
/// The path starts at `(x, y)` and is closed at the end.
pub fn trace_square_contour(x: f64, y: f64, w: f64, contour: &str) -> Result<String> {
    let mut result = vec![format!("M{},{}", x, y)];
    let (mut x, mut y) = (x, y);
    for direction in contour.chars() {
        let (pen, dx, dy) = square_step(direction, w)?;
        x += dx;
        y += dy;
        result.push(format!("{}{},{}", pen.command(), x, y));
    }
    result.push("Z".to_string());
    Ok(result.join(" "))
}
