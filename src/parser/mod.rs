//! Parser modules for msdf shape files.
//!
//! A shape file is YAML with a list of SVG-style path strings:
//!
//! ```yaml
//! name: triangle
//! contours:
//!   - "M 0 0 L 4 0 L 2 3 Z"
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use msdf::parser::parse_shape_file;
//!
//! let (document, shape) = parse_shape_file(Path::new("shapes/triangle.shape.yaml"))?;
//! println!("{}: {} edges", document.name, shape.edge_count());
//! ```

mod document;
mod path;

pub use document::{parse_shape_file, ShapeDocument};
pub use path::parse_path;
