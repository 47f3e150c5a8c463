//! Mapping between shape space and pixel space.

use crate::error::{MsdfError, Result};
use crate::math::Vector2;
use crate::types::Bounds;

/// Affine transform from shape (design) units to pixels:
/// `pixel = (design + translate) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: Vector2,
    pub translate: Vector2,
}

impl Projection {
    pub fn new(scale: Vector2, translate: Vector2) -> Self {
        Self { scale, translate }
    }

    /// Shape coordinates to pixel coordinates.
    pub fn project(&self, design: Vector2) -> Vector2 {
        (design + self.translate).mul_components(self.scale)
    }

    /// Pixel coordinates back to shape coordinates; the exact inverse of [`Projection::project`].
    pub fn unproject(&self, pixel: Vector2) -> Vector2 {
        pixel.div_components(self.scale) - self.translate
    }

    /// Centre of the pixel at column `x`, row `y`, in shape coordinates.
    pub fn pixel_center(&self, x: usize, y: usize) -> Vector2 {
        self.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5))
    }

    /// Fit `bounds` into a `width × height` bitmap with a uniform scale,
    /// leaving `px_padding` pixels free on every side and centring the shorter axis.
    pub fn fit(bounds: &Bounds, width: u32, height: u32, px_padding: f64) -> Result<Self> {
        if bounds.is_empty() {
            return Err(MsdfError::Render {
                message: "cannot frame an empty shape".to_string(),
                help: Some("Give an explicit --scale and --translate, or add contours".to_string()),
            });
        }

        let frame_x = f64::from(width) - 2.0 * px_padding;
        let frame_y = f64::from(height) - 2.0 * px_padding;
        if frame_x <= 0.0 || frame_y <= 0.0 {
            return Err(MsdfError::Render {
                message: format!(
                    "a {}x{} bitmap leaves no room inside {} pixels of padding",
                    width, height, px_padding
                ),
                help: Some("Increase the output size or reduce the pixel range".to_string()),
            });
        }

        let dims_x = bounds.width();
        let dims_y = bounds.height();
        let (scale, mut translate) = if dims_x * frame_y < dims_y * frame_x {
            let scale = frame_y / dims_y;
            (
                scale,
                Vector2::new(
                    0.5 * (frame_x / frame_y * dims_y - dims_x) - bounds.left,
                    -bounds.bottom,
                ),
            )
        } else if dims_x > 0.0 {
            let scale = frame_x / dims_x;
            (
                scale,
                Vector2::new(
                    -bounds.left,
                    0.5 * (frame_y / frame_x * dims_x - dims_y) - bounds.bottom,
                ),
            )
        } else {
            return Err(MsdfError::Render {
                message: "cannot frame a shape with zero width and height".to_string(),
                help: None,
            });
        };

        translate += Vector2::splat(px_padding / scale);
        Ok(Self::new(Vector2::splat(scale), translate))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(Vector2::splat(1.0), Vector2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(left: f64, bottom: f64, right: f64, top: f64) -> Bounds {
        Bounds {
            left,
            bottom,
            right,
            top,
        }
    }

    #[test]
    fn test_unproject_inverts_project() {
        let projection = Projection::new(Vector2::new(2.0, 4.0), Vector2::new(1.0, -3.0));
        let p = Vector2::new(0.25, 7.5);
        assert_eq!(projection.unproject(projection.project(p)), p);
    }

    #[test]
    fn test_pixel_center() {
        let projection = Projection::default();
        assert_eq!(projection.pixel_center(0, 2), Vector2::new(0.5, 2.5));
    }

    #[test]
    fn test_fit_tall_shape() {
        let b = bounds(0.0, 0.0, 1.0, 2.0);
        let projection = Projection::fit(&b, 20, 20, 2.0).unwrap();

        assert_eq!(projection.scale, Vector2::splat(8.0));
        // Top-left and bottom-right of the bounds land inside the padded frame, centred in x.
        let lo = projection.project(Vector2::new(b.left, b.bottom));
        let hi = projection.project(Vector2::new(b.right, b.top));
        assert!((lo.x - 6.0).abs() < 1e-12);
        assert!((lo.y - 2.0).abs() < 1e-12);
        assert!((hi.x - 14.0).abs() < 1e-12);
        assert!((hi.y - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_wide_shape() {
        let b = bounds(-2.0, 0.0, 2.0, 1.0);
        let projection = Projection::fit(&b, 10, 10, 1.0).unwrap();

        assert_eq!(projection.scale, Vector2::splat(2.0));
        let lo = projection.project(Vector2::new(b.left, b.bottom));
        assert!((lo.x - 1.0).abs() < 1e-12);
        assert!((lo.y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_rejects_empty_bounds() {
        assert!(Projection::fit(&Bounds::EMPTY, 10, 10, 1.0).is_err());
        assert!(Projection::fit(&bounds(0.0, 0.0, 1.0, 1.0), 4, 4, 2.0).is_err());
    }
}
