//! Core domain types for msdf.
//!
//! This module contains the outline model consumed by the generator:
//! - `EdgeSegment` - lines, quadratic and cubic curves with their channel colour
//! - `Contour` - a closed loop of edges
//! - `Shape` - the full outline
//! - `SignedDistance` - a distance with the ordering used to pick the nearest edge

mod bounds;
mod color;
mod contour;
mod distance;
mod edge;
mod shape;

pub use bounds::Bounds;
pub use color::EdgeColor;
pub use contour::Contour;
pub use distance::SignedDistance;
pub use edge::{EdgeDistance, EdgeSegment};
pub use shape::Shape;
