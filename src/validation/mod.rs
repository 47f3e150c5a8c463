//! Validation system for msdf shapes.
//!
//! Runs a suite of checks against a parsed shape and reports errors
//! and warnings. Used by both `msdf validate` and `msdf generate`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::types::Shape;

/// Run all validation checks against a shape.
pub fn validate_shape(shape: &Shape) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_unclosed_contours(shape));
    result.merge(checks::check_empty_contours(shape));
    result.merge(checks::check_zero_length_edges(shape));
    result.merge(checks::check_single_edge_contours(shape));
    result.merge(checks::check_zero_area_contours(shape));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(printer: &Printer, result: &ValidationResult) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("  {}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {} {}", printer.dim("help:"), help);
        }
    }
}
