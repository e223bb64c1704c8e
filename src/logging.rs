//! Logging utilities for basinviz.
//!
//! Structured `tracing` events for the colorizer and the crossing finder, so a
//! batch run over many layers or river sets can be searched and timed.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` wins over `log_level` when it is set. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Run `f`, logging its duration under a fresh operation id.
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log summary statistics of a colorized grid
pub fn log_raster_stats(
    colormap: &str,
    shape: (usize, usize),
    invalid_cells: usize,
    encoded_bytes: usize,
) {
    info!(
        operation = "colorize",
        colormap = colormap,
        rows = shape.0,
        cols = shape.1,
        invalid_cells = invalid_cells,
        png_bytes = encoded_bytes,
        "Raster colorized"
    );
}

/// Log summary statistics of a crossing search
pub fn log_crossing_stats(line_count: usize, boundary_segments: usize, crossing_count: usize) {
    info!(
        operation = "find_crossings",
        lines = line_count,
        boundary_segments = boundary_segments,
        crossings = crossing_count,
        dropped = line_count.saturating_sub(crossing_count),
        "Boundary crossings computed"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::BasinvizError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
