//! Rendering module for msdf.
//!
//! This module turns shapes into distance fields: framing, per-pixel
//! evaluation, multi-channel error correction and PNG output.

mod bitmap;
mod correction;
mod generate;
mod png;
mod projection;

pub use bitmap::{float_to_byte, Bitmap, MsdfBitmap, SdfBitmap};
pub use correction::{clash_threshold, correct_errors, pixel_clash, DEFAULT_EDGE_THRESHOLD};
pub use generate::{Generator, MultiDistance};
pub use png::write_png;
pub use projection::Projection;
