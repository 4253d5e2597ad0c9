//! Fixture tables and palettes shared across integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small square-grid table: three entities on a 2x2 grid.
pub const SQUARE_CSV: &str = "\
abbrev,square_x,square_y
AA,0,0
BB,1,0
CC,0,1
";

/// A hex-grid table exercising the odd-row/odd-column offsets.
pub const HEX_CSV: &str = "\
abbrev,hex_x,hex_y
AA,0,0
BB,1,0
CC,0,1
DD,1,1
";

/// A contour table: one single-hex shape and one two-cell shape whose
/// contour uses a pen-up move.
pub const MULTIHEX_CSV: &str = "\
abbrev,fourhex_x,fourhex_y,fourhex_contour,fourhex_label_offset_x,fourhex_label_offset_y
AA,0,0,abcdef,0,0
BB,2,0,abcdefAbcdef,0.5,0.25
";

/// A multi-square contour table.
pub const MULTISQUARE_CSV: &str = "\
abbrev,multisquare_x,multisquare_y,multisquare_contour,multisquare_label_offset_x,multisquare_label_offset_y
AA,0,0,abcd,0,0
BB,2,0,aabccd,0.5,0
";

/// A map table with trivial pre-computed path data.
pub const MAP_CSV: &str = "\
abbrev,map_path
AA,M 0 0 L 10 0 L 10 10 Z
BB,M 20 0 L 30 0 L 30 10 Z
";

/// Write a fixture table to a scratch file; the directory guard keeps it
/// alive for the test's duration.
pub fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("entities.csv");
    fs::write(&path, contents).expect("failed to write fixture table");
    (dir, path)
}

/// Ids matching the square/hex fixtures.
pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// A distinct color per id, in `#rrggbb` form.
pub fn colors(n: usize) -> Vec<String> {
    ["#084081", "#2b8cbe", "#7bccc4", "#ccebc5"]
        .iter()
        .take(n)
        .map(|c| c.to_string())
        .collect()
}
