//! Integration tests for minard.
//!
//! These tests run the binner and renderer together the way a caller
//! would: bin quantities into colors, feed the colors to a draw
//! operation, and inspect the serialized SVG.

mod common;

use common::test_data;
use pretty_assertions::assert_eq;

use minard::renderer::{ContourColumns, DrawOptions};
use minard::{ChoroGrid, ColorBinner, DisplaySink, GridSpacing, HexOrientation, LegendConfig,
    MapSpacing, Result};

/// A display sink that records what it was shown.
struct CaptureSink {
    shown: Vec<String>,
}

impl DisplaySink for CaptureSink {
    fn show(&mut self, svg: &str) -> Result<()> {
        self.shown.push(svg.to_string());
        Ok(())
    }
}

#[test]
fn test_binner_to_renderer_pipeline() {
    // Bin ten quantities into two classes, then color a grid with them.
    let quantities: Vec<f64> = (1..=10).map(|q| q as f64).collect();
    let binner = ColorBinner::new(quantities, test_data::colors(2), true, None).unwrap();
    assert_eq!(binner.fenceposts, vec![1.0, 5.5, 10.0]);

    // Three of the ten entities happen to be on the grid fixture.
    let ids = test_data::ids(&["AA", "BB", "CC"]);
    let entity_colors = binner.colors_out[0..3].to_vec();
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        ids,
        entity_colors,
        "abbrev",
    )
    .unwrap();
    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();

    let svg = grid.done().unwrap();
    // Quantities 1..3 all fall in the first bin.
    assert_eq!(svg.matches(&format!("fill:{}", binner.palette[0])).count(), 3);
}

#[test]
fn test_square_grid_cell_spacing() {
    let (_guard, path) = test_data::write_csv(test_data::SQUARE_CSV);
    let mut grid = ChoroGrid::new(
        &path,
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();

    let options = DrawOptions {
        spacing: GridSpacing {
            margin_left: 0.0,
            margin_top: 0.0,
            cell_width: 40.0,
            gutter: 1.0,
            ..GridSpacing::default()
        },
        ..DrawOptions::default()
    };
    grid.draw_squares("square_x", "square_y", &options).unwrap();
    let svg = grid.done().unwrap();

    // Adjacent cells sit exactly cell_width + gutter apart.
    assert!(svg.contains("id=\"rectAA\" x=\"0\" y=\"0\""));
    assert!(svg.contains("id=\"rectBB\" x=\"41\" y=\"0\""));
    assert!(svg.contains("id=\"rectCC\" x=\"0\" y=\"41\""));
}

#[test]
fn test_unknown_id_warns_but_renders() {
    // "ZZ" is not in the table; "CC" is in the table but not in our ids.
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "ZZ"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();
    let svg = grid.done().unwrap();

    // Every table row still gets a shape; CC falls back to the missing color.
    assert_eq!(svg.matches("<rect").count(), 3);
    assert!(svg.contains("fill:#a0a0a0"));
}

#[test]
fn test_missing_id_column_is_fatal() {
    let (_guard, path) = test_data::write_csv(test_data::SQUARE_CSV);
    let result = ChoroGrid::new(
        &path,
        test_data::ids(&["AA"]),
        test_data::colors(1),
        "state",
    );
    assert!(result.is_err());
}

#[test]
fn test_hex_grid_both_orientations() {
    for orientation in [HexOrientation::TrueRows, HexOrientation::TrueColumns] {
        let mut grid = ChoroGrid::from_reader(
            test_data::HEX_CSV.as_bytes(),
            test_data::ids(&["AA", "BB", "CC", "DD"]),
            test_data::colors(4),
            "abbrev",
        )
        .unwrap();
        grid.draw_hex("hex_x", "hex_y", orientation, &DrawOptions::default()).unwrap();
        let svg = grid.done().unwrap();

        assert_eq!(svg.matches("<polygon").count(), 4);
        assert_eq!(svg.matches("<text").count(), 4);
        // Each hexagon is six vertices.
        for polygon in svg.lines().filter(|line| line.starts_with("<polygon")) {
            let points = polygon.split("points=\"").nth(1).unwrap();
            let points = points.split('"').next().unwrap();
            assert_eq!(points.split(' ').count(), 6);
        }
    }
}

#[test]
fn test_multihex_draw() {
    let mut grid = ChoroGrid::from_reader(
        test_data::MULTIHEX_CSV.as_bytes(),
        test_data::ids(&["AA", "BB"]),
        test_data::colors(2),
        "abbrev",
    )
    .unwrap();
    grid.draw_multihex(&ContourColumns::multihex(), &DrawOptions::contour_default())
        .unwrap();
    let svg = grid.done().unwrap();

    assert_eq!(svg.matches("<path").count(), 2);
    // BB's contour contains a pen-up move, so its path has a second M.
    let bb = svg
        .lines()
        .find(|line| line.contains("id=\"hexBB\""))
        .unwrap();
    let d = bb.split(" d=\"").nth(1).unwrap().split('"').next().unwrap();
    assert_eq!(d.matches('M').count(), 2);
    assert!(d.ends_with("Z"));
}

#[test]
fn test_multisquare_draw() {
    let mut grid = ChoroGrid::from_reader(
        test_data::MULTISQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB"]),
        test_data::colors(2),
        "abbrev",
    )
    .unwrap();
    grid.draw_multisquare(&ContourColumns::multisquare(), &DrawOptions::contour_default())
        .unwrap();
    let svg = grid.done().unwrap();

    // The unit-square contour walks back to its anchor.
    let aa = svg
        .lines()
        .find(|line| line.contains("id=\"squareAA\""))
        .unwrap();
    assert!(aa.contains("M30,60 L60,60 L60,90 L30,90 L30,60 Z"));
}

#[test]
fn test_map_draw_and_fragment_offset() {
    let mut grid = ChoroGrid::from_reader(
        test_data::MAP_CSV.as_bytes(),
        test_data::ids(&["AA", "BB"]),
        test_data::colors(2),
        "abbrev",
    )
    .unwrap();
    let spacing = MapSpacing::default();
    grid.draw_map("map_path", &spacing).unwrap();
    // Fragments shift by the map's margin translation.
    grid.add_svg("<circle r=\"5\" />", [100.0, 100.0]).unwrap();
    let svg = grid.done().unwrap();

    // Map shapes live in a translated group and carry no labels.
    assert!(svg.contains("transform=\"translate(10 20)\""));
    assert_eq!(svg.matches("<text").count(), 0);
    assert!(svg.contains("transform=\"translate(110 120)\""));
    assert!(svg.contains("<circle r=\"5\" />"));
}

#[test]
fn test_add_svg_requires_draw() {
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    assert!(grid.add_svg("<circle r=\"1\" />", [0.0, 0.0]).is_err());
}

#[test]
fn test_legend_arities() {
    let palette = test_data::colors(4);
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();

    // N labels for N colors.
    let labels = test_data::ids(&["low", "mid", "high", "top"]);
    grid.set_legend(&palette, &labels, Some("Legend"), &LegendConfig::default())
        .unwrap();

    // N+1 fencepost labels.
    let fencepost_labels = test_data::ids(&["0", "1", "2", "3", "4"]);
    grid.set_legend(&palette, &fencepost_labels, None, &LegendConfig::default())
        .unwrap();

    // Exactly two labels, blanks interpolated.
    let two = test_data::ids(&["min", "max"]);
    grid.set_legend(&palette, &two, None, &LegendConfig::default()).unwrap();

    // Anything else is fatal.
    let three = test_data::ids(&["a", "b", "c"]);
    assert!(grid.set_legend(&palette, &three, None, &LegendConfig::default()).is_err());

    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();
    let svg = grid.done().unwrap();
    assert_eq!(svg.matches("legendbox").count(), 4);
    // Two-label arity annotates first and last fenceposts only.
    assert_eq!(svg.matches("legendlabel").count(), 5);
}

#[test]
fn test_legend_gradient_bar_width() {
    let palette = test_data::colors(4);
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    let config = LegendConfig {
        box_width: Some(12.0),
        ..LegendConfig::default()
    };
    let labels = test_data::ids(&["low", "mid", "high", "top"]);
    grid.set_legend(&palette, &labels, None, &config).unwrap();
    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();
    let svg = grid.done().unwrap();

    assert_eq!(svg.matches("width=\"12\"").count(), 4);
}

#[test]
fn test_title_rendered() {
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    grid.set_title("State of the states", None);
    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();
    let svg = grid.done().unwrap();

    assert!(svg.contains("id=\"title\""));
    assert!(svg.contains("State of the states"));
    assert!(svg.contains("font-size:21px"));
}

#[test]
fn test_done_to_file_normalizes_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();

    let saved = grid.done_to_file(&dir.path().join("grid")).unwrap();
    assert!(saved.to_string_lossy().ends_with("grid.svg"));
    let on_disk = std::fs::read_to_string(&saved).unwrap();
    assert_eq!(on_disk, grid.done().unwrap());
}

#[test]
fn test_display_sink_receives_svg() {
    let mut grid = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    grid.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();

    let mut sink = CaptureSink { shown: Vec::new() };
    grid.display(&mut sink).unwrap();
    assert_eq!(sink.shown.len(), 1);
    assert!(sink.shown[0].starts_with("<svg"));
}

#[test]
fn test_overlay_composites_single_root() {
    let mut base = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    base.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();

    let mut inset = ChoroGrid::from_reader(
        test_data::MAP_CSV.as_bytes(),
        test_data::ids(&["AA", "BB"]),
        test_data::colors(2),
        "abbrev",
    )
    .unwrap();
    inset.draw_map("map_path", &MapSpacing::default()).unwrap();

    let svg = base.done_and_overlay(&inset).unwrap();
    assert_eq!(svg.matches("<svg").count(), 1);
    assert_eq!(svg.matches("</svg>").count(), 1);
    // Content from both documents is present.
    assert!(svg.contains("id=\"rectAA\""));
    assert!(svg.contains("M 0 0 L 10 0 L 10 10 Z"));
}

#[test]
fn test_overlay_without_draw_is_fatal() {
    let mut base = ChoroGrid::from_reader(
        test_data::SQUARE_CSV.as_bytes(),
        test_data::ids(&["AA", "BB", "CC"]),
        test_data::colors(3),
        "abbrev",
    )
    .unwrap();
    base.draw_squares("square_x", "square_y", &DrawOptions::default()).unwrap();

    let undrawn = ChoroGrid::from_reader(
        test_data::MAP_CSV.as_bytes(),
        test_data::ids(&["AA", "BB"]),
        test_data::colors(2),
        "abbrev",
    )
    .unwrap();
    assert!(base.done_and_overlay(&undrawn).is_err());
}
