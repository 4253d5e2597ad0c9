//! Coordinate geometry for the grid tiling schemes.
//!
//! This module computes vertex coordinates and SVG path data for the four
//! tiling schemes: square cells, hexagonal cells in either orientation, and
//! the contour-walked multi-cell shapes.

pub mod hex;
pub mod square;

pub use hex::{hex_extent, hex_origin, hexagon_points, multihex_extent, multihex_origin,
    trace_hex_contour, HexOrientation};
pub use square::{multisquare_extent, multisquare_origin, square_extent, square_origin,
    trace_square_contour};

/// Whether a contour step draws an edge or just repositions the pen.
///
/// Lower-case direction letters draw; upper-case letters move without
/// drawing, which is how disjoint sub-contours start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenMove {
    /// Draw a line to the new point (`L` in path data)
    Draw,
    /// Move without drawing (`M` in path data)
    Move,
}

impl PenMove {
    /// The SVG path command letter for this pen state.
    pub fn command(&self) -> char {
        match self {
            PenMove::Draw => 'L',
            PenMove::Move => 'M',
        }
    }
}
