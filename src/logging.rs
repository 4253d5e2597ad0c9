//! Logging utilities for minard.
//!
//! This module provides structured logging setup so that library
//! diagnostics (id reconciliation warnings, draw statistics) are
//! searchable and analyzable.

use tracing::info;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Log detailed information about a completed draw operation
pub fn log_draw_stats(mode: &str, entity_count: usize, width: f64, height: f64) {
    info!(
        operation = "draw",
        mode = mode,
        entity_count = entity_count,
        canvas_width = width,
        canvas_height = height,
        "Draw operation completed"
    );
}
