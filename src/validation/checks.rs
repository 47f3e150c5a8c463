//! Validation checks for shapes.
//!
//! Each check takes a `&Shape` and returns a `ValidationResult`.

use crate::types::Shape;

use super::warning::{Diagnostic, ValidationResult};

/// Contours must end where they start.
pub fn check_unclosed_contours(shape: &Shape) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (index, contour) in shape.contours().iter().enumerate() {
        if let Some(edge) = contour.first_gap() {
            result.push(
                Diagnostic::error(
                    "msdf::validate::unclosed-contour",
                    format!("Contour {} is not closed (gap before edge {})", index, edge),
                )
                .with_help("End the path with Z, or make the last point equal the first")
                .in_contour(index),
            );
        }
    }

    result
}

/// Contours without edges contribute nothing.
pub fn check_empty_contours(shape: &Shape) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (index, contour) in shape.contours().iter().enumerate() {
        if contour.is_empty() {
            result.push(
                Diagnostic::warning(
                    "msdf::validate::empty-contour",
                    format!("Contour {} has no edges", index),
                )
                .in_contour(index),
            );
        }
    }

    result
}

/// Edges whose control points all coincide have no direction.
pub fn check_zero_length_edges(shape: &Shape) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (index, contour) in shape.contours().iter().enumerate() {
        for (edge_index, edge) in contour.edges().iter().enumerate() {
            let start = edge.start();
            if edge.points().iter().all(|&p| p == start) {
                result.push(
                    Diagnostic::warning(
                        "msdf::validate::zero-length-edge",
                        format!("Edge {} of contour {} has zero length", edge_index, index),
                    )
                    .with_help("Remove repeated points from the path")
                    .in_contour(index),
                );
            }
        }
    }

    result
}

/// A lone edge is split in thirds during normalization before coloring.
pub fn check_single_edge_contours(shape: &Shape) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (index, contour) in shape.contours().iter().enumerate() {
        if contour.len() == 1 {
            result.push(
                Diagnostic::warning(
                    "msdf::validate::single-edge-contour",
                    format!("Contour {} is a single edge and will be split in thirds", index),
                )
                .in_contour(index),
            );
        }
    }

    result
}

/// Contours with no enclosed area have no inside and cannot fill anything.
pub fn check_zero_area_contours(shape: &Shape) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (index, contour) in shape.contours().iter().enumerate() {
        if !contour.is_empty() && contour.winding() == 0 {
            result.push(
                Diagnostic::warning(
                    "msdf::validate::zero-area-contour",
                    format!("Contour {} encloses no area", index),
                )
                .with_help("Check for a contour that folds back on itself")
                .in_contour(index),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use crate::types::{Contour, EdgeSegment};
    use pretty_assertions::assert_eq;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn triangle() -> Contour {
        Contour::new(vec![
            EdgeSegment::line(v(0.0, 0.0), v(4.0, 0.0)),
            EdgeSegment::line(v(4.0, 0.0), v(2.0, 3.0)),
            EdgeSegment::line(v(2.0, 3.0), v(0.0, 0.0)),
        ])
    }

    #[test]
    fn test_unclosed_contour_is_error() {
        let open = Contour::new(vec![
            EdgeSegment::line(v(0.0, 0.0), v(4.0, 0.0)),
            EdgeSegment::line(v(4.0, 0.0), v(2.0, 3.0)),
        ]);
        let shape = Shape::new(vec![triangle(), open]);

        let result = check_unclosed_contours(&shape);
        assert_eq!(result.error_count(), 1);
        let d = result.iter().next().unwrap();
        assert_eq!(d.contour, Some(1));
        assert_eq!(d.message, "Contour 1 is not closed (gap before edge 0)");
    }

    #[test]
    fn test_empty_contour_is_warning() {
        let shape = Shape::new(vec![Contour::default(), triangle()]);
        let result = check_empty_contours(&shape);
        assert_eq!(result.warning_count(), 1);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_zero_length_edge() {
        let mut contour = triangle();
        contour.push(EdgeSegment::line(v(0.0, 0.0), v(0.0, 0.0)));
        let shape = Shape::new(vec![contour]);

        let result = check_zero_length_edges(&shape);
        assert_eq!(result.codes(), vec!["msdf::validate::zero-length-edge"]);
    }

    #[test]
    fn test_single_edge_contour() {
        let loop_edge = EdgeSegment::cubic(v(0.0, 0.0), v(4.0, 4.0), v(-4.0, 4.0), v(0.0, 0.0));
        let shape = Shape::new(vec![Contour::new(vec![loop_edge])]);

        let result = check_single_edge_contours(&shape);
        assert_eq!(result.warning_count(), 1);
        assert!(check_zero_length_edges(&shape).is_ok());
    }

    #[test]
    fn test_zero_area_contour() {
        let flat = Contour::new(vec![
            EdgeSegment::line(v(0.0, 0.0), v(4.0, 0.0)),
            EdgeSegment::line(v(4.0, 0.0), v(8.0, 0.0)),
            EdgeSegment::line(v(8.0, 0.0), v(0.0, 0.0)),
        ]);
        let shape = Shape::new(vec![flat, triangle()]);

        let result = check_zero_area_contours(&shape);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.iter().next().unwrap().contour, Some(0));
    }
}
