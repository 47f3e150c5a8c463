//! PNG output for distance fields.
//!
//! Single-channel fields are written as 8-bit greyscale, three-channel fields as 8-bit RGB.

use std::path::Path;

use image::ExtendedColorType;

use crate::error::{MsdfError, Result};

use super::{float_to_byte, Bitmap};

/// Write a distance field to a PNG file.
///
/// # Arguments
///
/// * `bitmap` - The field to write, 1 or 3 channels
/// * `path` - Output file path
/// * `bottom_up` - Row 0 of the field is the bottom of the image (y-up shapes)
pub fn write_png<const N: usize>(bitmap: &Bitmap<N>, path: &Path, bottom_up: bool) -> Result<()> {
    let color = match N {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        _ => {
            return Err(MsdfError::Render {
                message: format!("cannot write a {}-channel field as PNG", N),
                help: None,
            })
        }
    };

    let (width, height) = bitmap.size();
    let too_large = || MsdfError::Render {
        message: format!("{}x{} is too large for a PNG", width, height),
        help: None,
    };
    let png_width = u32::try_from(width).map_err(|_| too_large())?;
    let png_height = u32::try_from(height).map_err(|_| too_large())?;

    let bytes = image_bytes(bitmap, bottom_up);
    image::save_buffer(path, &bytes, png_width, png_height, color).map_err(|e| MsdfError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Bytes in image row order (top row first).
fn image_bytes<const N: usize>(bitmap: &Bitmap<N>, bottom_up: bool) -> Vec<u8> {
    if !bottom_up {
        return bitmap.to_bytes();
    }
    bitmap
        .rows()
        .rev()
        .flatten()
        .flat_map(|pixel| pixel.iter().map(|&v| float_to_byte(v)))
        .collect()
}
