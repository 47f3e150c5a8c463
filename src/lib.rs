//! msdf - Signed and multi-channel signed distance field generator
//!
//! A library for turning vector outlines (lines, quadratic and cubic Bézier
//! contours) into distance field bitmaps for resolution-independent rendering.
//! The multi-channel variant keeps sharp corners by spreading edges over the
//! red, green and blue channels and taking the median when sampling.

pub mod cli;
pub mod coloring;
pub mod config;
pub mod error;
pub mod math;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod validation;

pub use coloring::edge_coloring_simple;
pub use config::Config;
pub use error::{MsdfError, Result};
pub use math::Vector2;
pub use parser::{parse_path, parse_shape_file, ShapeDocument};
pub use pipeline::{generate, DistanceField, FieldMetadata, GenerateSettings, Mode};
pub use render::{
    correct_errors, write_png, Bitmap, Generator, MsdfBitmap, MultiDistance, Projection,
    SdfBitmap,
};
pub use types::{Bounds, Contour, EdgeColor, EdgeSegment, Shape, SignedDistance};
pub use validation::{validate_shape, Diagnostic, Severity, ValidationResult};
