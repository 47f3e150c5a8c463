//! Closed loops of edges.

use crate::math::{sign, Vector2};

use super::{Bounds, EdgeSegment};

/// An ordered loop of edges. When valid, every edge ends where the next one starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    edges: Vec<EdgeSegment>,
}

impl Contour {
    /// Create a contour from its edges.
    pub fn new(edges: Vec<EdgeSegment>) -> Self {
        Self { edges }
    }

    /// Append an edge.
    pub fn push(&mut self, edge: EdgeSegment) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[EdgeSegment] {
        &self.edges
    }

    /// Consume the contour, returning its edges.
    pub fn into_edges(self) -> Vec<EdgeSegment> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Index of the first edge that does not start where its predecessor ends.
    ///
    /// Comparison is exact; the first edge is compared against the last.
    pub fn first_gap(&self) -> Option<usize> {
        let last = self.edges.last()?;
        let mut corner = last.end();
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.start() != corner {
                return Some(i);
            }
            corner = edge.end();
        }
        None
    }

    /// Check the closed-loop invariant. An empty contour is trivially closed.
    pub fn is_closed(&self) -> bool {
        self.first_gap().is_none()
    }

    /// Orientation of the contour: +1 counter-clockwise, -1 clockwise,
    /// 0 when empty or without area.
    pub fn winding(&self) -> i32 {
        let total = match self.edges.as_slice() {
            [] => return 0,
            [edge] => {
                let a = edge.point(0.0);
                let b = edge.point(1.0 / 3.0);
                let c = edge.point(2.0 / 3.0);
                shoelace(&[a, b, c])
            }
            [first, second] => {
                let a = first.point(0.0);
                let b = first.point(0.5);
                let c = second.point(0.0);
                let d = second.point(0.5);
                shoelace(&[a, b, c, d])
            }
            edges => {
                let starts: Vec<Vector2> = edges.iter().map(EdgeSegment::start).collect();
                shoelace(&starts)
            }
        };
        sign(total)
    }

    /// Bounds of every edge in the contour.
    pub fn bounds(&self) -> Bounds {
        self.edges
            .iter()
            .fold(Bounds::EMPTY, |acc, edge| acc.union(edge.bounds()))
    }

    /// Rebuild a single-edge contour as three edges so it can carry corners.
    /// Other contours are returned unchanged.
    pub fn normalized(self) -> Contour {
        match self.edges.as_slice() {
            [edge] => Contour::new(edge.split_in_thirds().to_vec()),
            _ => self,
        }
    }
}

impl FromIterator<EdgeSegment> for Contour {
    fn from_iter<I: IntoIterator<Item = EdgeSegment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Twice the signed area of the closed polygon through `points`.
fn shoelace(points: &[Vector2]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut total = 0.0;
    for &p in points {
        total += prev.cross(p);
        prev = p;
    }
    total
}
