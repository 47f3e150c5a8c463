//! Shapes: collections of contours ready for distance field generation.
//!
//! A shape arrives from an outline decomposer (a font loader or the path-data
//! parser in this crate), is normalized and edge-coloured once, and is then
//! read-only for the rest of generation.

use crate::error::{MsdfError, Result};

use super::{Bounds, Contour};

/// A vector outline made of closed contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    contours: Vec<Contour>,

    /// When set, row 0 of generated output is the top of shape space
    /// rather than the bottom.
    pub inverse_y_axis: bool,
}

impl Shape {
    /// Create a shape from its contours.
    pub fn new(contours: Vec<Contour>) -> Self {
        Self {
            contours,
            inverse_y_axis: false,
        }
    }

    /// Set whether output rows run top-down.
    pub fn with_inverse_y_axis(mut self, inverse: bool) -> Self {
        self.inverse_y_axis = inverse;
        self
    }

    /// Append a contour.
    pub fn add_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Total number of edges across all contours.
    pub fn edge_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Check if the shape has no edges at all.
    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Check that every contour is a closed loop.
    pub fn validate(&self) -> Result<()> {
        for (index, contour) in self.contours.iter().enumerate() {
            if let Some(edge) = contour.first_gap() {
                let edges = contour.edges();
                let prev = edges[(edge + edges.len() - 1) % edges.len()].end();
                let next = edges[edge].start();
                return Err(MsdfError::InvalidShape {
                    message: format!(
                        "contour {} is not closed: edge {} starts at ({}, {}) but the previous edge ends at ({}, {})",
                        index, edge, next.x, next.y, prev.x, prev.y
                    ),
                    help: Some("Every contour must end where it starts; close paths with `Z`".to_string()),
                });
            }
        }
        Ok(())
    }

    /// Split every single-edge contour in thirds so that coloring can place corners on it.
    pub fn normalize(&mut self) {
        self.rebuild_contours(Contour::normalized);
    }

    /// Replace each contour with the result of `rebuild`, in order.
    pub fn rebuild_contours(&mut self, rebuild: impl FnMut(Contour) -> Contour) {
        let contours = std::mem::take(&mut self.contours);
        self.contours = contours.into_iter().map(rebuild).collect();
    }

    /// Bounds of the whole outline, including curve extrema.
    pub fn bounds(&self) -> Bounds {
        self.contours
            .iter()
            .fold(Bounds::EMPTY, |acc, contour| acc.union(contour.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use crate::types::EdgeSegment;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn square() -> Contour {
        Contour::new(vec![
            EdgeSegment::line(v(0.0, 0.0), v(1.0, 0.0)),
            EdgeSegment::line(v(1.0, 0.0), v(1.0, 1.0)),
            EdgeSegment::line(v(1.0, 1.0), v(0.0, 1.0)),
            EdgeSegment::line(v(0.0, 1.0), v(0.0, 0.0)),
        ])
    }

    #[test]
    fn test_validate_closed_shape() {
        let shape = Shape::new(vec![square(), Contour::default()]);
        assert!(shape.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_open_contour() {
        let open = Contour::new(vec![
            EdgeSegment::line(v(0.0, 0.0), v(1.0, 0.0)),
            EdgeSegment::line(v(1.0, 0.0), v(1.0, 1.0)),
        ]);
        let shape = Shape::new(vec![square(), open]);

        let err = shape.validate().unwrap_err();
        assert!(matches!(err, MsdfError::InvalidShape { .. }));
        assert!(err.to_string().contains("contour 1"));
    }

    #[test]
    fn test_normalize_splits_single_edge_contours() {
        let loop_edge = EdgeSegment::quadratic(v(0.0, 0.0), v(5.0, 5.0), v(0.0, 0.0));
        let mut shape = Shape::new(vec![square(), Contour::new(vec![loop_edge])]);

        shape.normalize();

        assert_eq!(shape.contours()[0].len(), 4);
        assert_eq!(shape.contours()[1].len(), 3);
        assert_eq!(shape.edge_count(), 7);
        assert!(shape.validate().is_ok());
    }

    #[test]
    fn test_bounds_and_emptiness() {
        let shape = Shape::new(vec![square()]);
        let bounds = shape.bounds();
        assert_eq!(bounds.width(), 1.0);
        assert_eq!(bounds.height(), 1.0);
        assert!(!shape.is_empty());
        assert!(Shape::default().is_empty());
        assert!(Shape::default().bounds().is_empty());
    }

    #[test]
    fn test_inverse_y_axis_flag() {
        let shape = Shape::new(vec![square()]).with_inverse_y_axis(true);
        assert!(shape.inverse_y_axis);
    }
}
