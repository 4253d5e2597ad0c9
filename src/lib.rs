//! # minard
//!
//! A fast, in-memory choropleth grid and map renderer producing SVG.
//!
//! This library bins per-region quantities into discrete color classes and
//! renders them as grid maps (square or hexagonal cells, contour-walked
//! multi-cell shapes) or geographic maps with a legend.
//!
//! ## Key Features
//!
//! - **Two binning strategies**: equal-width bins anchored through a
//!   midpoint, or equal-population quantile bins
//! - **Four tiling schemes**: squares, hexes in both orientations, and
//!   contour-traced multi-hex/multi-square shapes
//! - **Self-contained SVG output**: explicit canvas size, inline styles,
//!   optional title and legend, composable overlays
//!
//! ## Architecture
//!
//! - **Binning**: [`ColorBinner`] maps quantities to palette colors plus
//!   fencepost/label metadata
//! - **Rendering**: [`ChoroGrid`] joins an entity table with the color
//!   assignment and draws shapes, labels, legend and title
//! - **Output**: an in-memory [`document::Document`] tree, serialized on
//!   demand and optionally persisted or handed to a display sink

pub mod binner;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod renderer;
pub mod table;

pub use binner::ColorBinner;
pub use config::{FontColors, FontConfig, GridSpacing, LegendConfig, MapSpacing};
pub use document::{DisplaySink, Document, Element};
pub use error::{MinardError, Result};
pub use geometry::HexOrientation;
pub use logging::init_tracing;
pub use renderer::{ChoroGrid, ContourColumns, DrawOptions};
pub use table::EntityTable;
