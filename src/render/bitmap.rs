//! Floating-point distance field buffers.

/// A `width × height` grid of `N`-channel float pixels, row-major.
///
/// Values are normalized distances: 0.5 on the outline, above 0.5 inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap<const N: usize> {
    width: usize,
    height: usize,
    pixels: Vec<[f32; N]>,
}

/// Single-channel distance field.
pub type SdfBitmap = Bitmap<1>;

/// Three-channel (RGB) distance field.
pub type MsdfBitmap = Bitmap<3>;

impl<const N: usize> Bitmap<N> {
    /// Create a bitmap with every channel set to zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; N]; width * height],
        }
    }

    /// Create a bitmap from row-major pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<[f32; N]>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<[f32; N]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn pixels(&self) -> &[[f32; N]] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [[f32; N]] {
        &mut self.pixels
    }

    /// Iterate over rows of pixels, row 0 first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[[f32; N]]> + '_ {
        self.pixels.chunks(self.width.max(1))
    }

    /// Convert to bytes, `N` per pixel, scaling [0, 1] to [0, 255] and clamping.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|pixel| pixel.iter().map(|&v| float_to_byte(v)))
            .collect()
    }
}

/// Map a normalized float to a byte, saturating outside [0, 1].
pub fn float_to_byte(value: f32) -> u8 {
    (value * 256.0).clamp(0.0, 255.0) as u8
}
