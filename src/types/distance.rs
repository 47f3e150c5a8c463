//! Signed distance with the "closer edge wins" ordering.

use std::cmp::Ordering;

/// A signed distance to an edge, plus an alignment score for tie-breaking.
///
/// `dot` is zero for hits on the interior of an edge and the absolute cosine
/// between the edge tangent and the direction to the query point for hits on
/// an endpoint. When two edges meet at a vertex they report the same distance;
/// the one hit more perpendicularly (smaller `dot`) is the one whose side
/// determines the correct sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedDistance {
    pub distance: f64,
    pub dot: f64,
}

impl SignedDistance {
    /// Sentinel farther than any real distance.
    pub const INFINITE: Self = Self {
        distance: -1e240,
        dot: 1.0,
    };

    pub const fn new(distance: f64, dot: f64) -> Self {
        Self { distance, dot }
    }

    /// Order by closeness: absolute distance first, then `dot`.
    ///
    /// `Ordering::Less` means `self` is closer than `other`.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.distance
            .abs()
            .total_cmp(&other.distance.abs())
            .then_with(|| self.dot.total_cmp(&other.dot))
    }

    /// Check if `self` is strictly closer than `other`.
    pub fn is_closer_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }
}

impl Default for SignedDistance {
    fn default() -> Self {
        Self::INFINITE
    }
}
