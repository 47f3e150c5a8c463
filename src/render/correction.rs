//! Clash correction for multi-channel fields.
//!
//! Bilinear interpolation between two neighbouring pixels whose channels swap
//! sides of 0.5 can produce a median that crosses the outline where the shape
//! has none. Such pixels are flattened to their median, which turns them back
//! into plain SDF samples.

use rayon::prelude::*;
use tracing::debug;

use crate::math::{median_f32, Vector2};

use super::MsdfBitmap;

/// Default edge threshold, in pixels, used by [`clash_threshold`].
pub const DEFAULT_EDGE_THRESHOLD: f64 = 1.001;

/// Per-axis clash threshold for a field generated with `range` shape units
/// over a projection of `scale` pixels per unit.
pub fn clash_threshold(edge_threshold: f64, scale: Vector2, range: f64) -> Vector2 {
    Vector2::new(
        edge_threshold / (scale.x * range),
        edge_threshold / (scale.y * range),
    )
}

/// Whether interpolating between `a` and `b` would introduce a false edge.
pub fn pixel_clash(a: [f32; 3], b: [f32; 3], threshold: f32) -> bool {
    let a_in = a.iter().filter(|&&c| c > 0.5).count() >= 2;
    let b_in = b.iter().filter(|&&c| c > 0.5).count() >= 2;
    if a_in != b_in {
        return false;
    }

    let all_same = |p: [f32; 3]| {
        let above = p.iter().filter(|&&c| c > 0.5).count();
        above == 0 || above == 3
    };
    if all_same(a) || all_same(b) {
        return false;
    }

    let [ar, ag, ab] = a;
    let [br, bg, bb] = b;
    let flips = |x: f32, y: f32| (x > 0.5) != (y > 0.5) && (x < 0.5) != (y < 0.5);

    // The two channels that change sides, and the one that stays.
    let (aa, ba, ab_, bb_, ac, bc) = if flips(ar, br) {
        if flips(ag, bg) {
            (ar, br, ag, bg, ab, bb)
        } else if flips(ab, bb) {
            (ar, br, ab, bb, ag, bg)
        } else {
            return false;
        }
    } else if flips(ag, bg) && flips(ab, bb) {
        (ag, bg, ab, bb, ar, br)
    } else {
        return false;
    };

    (aa - ba).abs() >= threshold
        && (ab_ - bb_).abs() >= threshold
        && (ac - 0.5).abs() >= (bc - 0.5).abs()
}

/// Flatten every pixel that clashes with one of its four neighbours.
///
/// Detection reads the uncorrected field; returns the number of corrected pixels.
pub fn correct_errors(bitmap: &mut MsdfBitmap, threshold: Vector2) -> usize {
    let (width, height) = bitmap.size();
    let tx = threshold.x as f32;
    let ty = threshold.y as f32;

    let pixels = bitmap.pixels();
    let clashes: Vec<usize> = (0..width * height)
        .into_par_iter()
        .filter(|&i| {
            let (x, y) = (i % width, i / width);
            let p = pixels[i];
            (x > 0 && pixel_clash(p, pixels[i - 1], tx))
                || (x + 1 < width && pixel_clash(p, pixels[i + 1], tx))
                || (y > 0 && pixel_clash(p, pixels[i - width], ty))
                || (y + 1 < height && pixel_clash(p, pixels[i + width], ty))
        })
        .collect();

    let pixels = bitmap.pixels_mut();
    for &i in &clashes {
        let [r, g, b] = pixels[i];
        pixels[i] = [median_f32(r, g, b); 3];
    }

    debug!(corrected = clashes.len(), "Error correction");
    clashes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coloring::{edge_coloring_simple, DEFAULT_ANGLE_THRESHOLD};
    use crate::render::{Generator, Projection};
    use crate::types::{Contour, EdgeSegment, Shape};

    #[test]
    fn test_clash_is_flattened_to_median() {
        let mut bitmap =
            MsdfBitmap::from_pixels(2, 1, vec![[0.9, 0.1, 0.9], [0.1, 0.9, 0.9]]).unwrap();
        let corrected = correct_errors(&mut bitmap, Vector2::splat(0.2));

        assert_eq!(corrected, 2);
        assert_eq!(bitmap.pixels(), &[[0.9; 3], [0.9; 3]]);
    }

    #[test]
    fn test_pixels_on_opposite_sides_do_not_clash() {
        let pixels = vec![[0.9, 0.1, 0.9], [0.1, 0.9, 0.1]];
        let mut bitmap = MsdfBitmap::from_pixels(2, 1, pixels.clone()).unwrap();

        assert_eq!(correct_errors(&mut bitmap, Vector2::splat(0.2)), 0);
        assert_eq!(bitmap.pixels(), pixels.as_slice());
    }

    #[test]
    fn test_small_differences_are_below_threshold() {
        assert!(!pixel_clash([0.6, 0.4, 0.9], [0.4, 0.6, 0.9], 0.5));
        assert!(pixel_clash([0.6, 0.4, 0.9], [0.4, 0.6, 0.9], 0.1));
    }

    #[test]
    fn test_uniform_pixels_never_clash() {
        assert!(!pixel_clash([0.9, 0.9, 0.9], [0.1, 0.9, 0.9], 0.0));
        assert!(!pixel_clash([0.1, 0.2, 0.3], [0.1, 0.2, 0.3], 0.0));
    }

    #[test]
    fn test_vertical_neighbours_use_y_threshold() {
        let pixels = vec![[0.9, 0.1, 0.9], [0.1, 0.9, 0.9]];
        let mut tall = MsdfBitmap::from_pixels(1, 2, pixels.clone()).unwrap();
        assert_eq!(correct_errors(&mut tall, Vector2::new(0.2, 1.0)), 0);
        assert_eq!(correct_errors(&mut tall, Vector2::new(1.0, 0.2)), 2);
    }

    #[test]
    fn test_correction_is_idempotent() {
        let v = Vector2::new;
        let mut shape = Shape::new(vec![Contour::new(vec![
            EdgeSegment::line(v(1.0, 1.0), v(7.0, 1.0)),
            EdgeSegment::line(v(7.0, 1.0), v(4.0, 2.0)),
            EdgeSegment::line(v(4.0, 2.0), v(7.0, 7.0)),
            EdgeSegment::line(v(7.0, 7.0), v(1.0, 7.0)),
            EdgeSegment::line(v(1.0, 7.0), v(1.0, 1.0)),
        ])]);
        edge_coloring_simple(&mut shape, DEFAULT_ANGLE_THRESHOLD, 0);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();
        let mut bitmap = generator.generate_msdf(8, 8);
        let threshold = clash_threshold(DEFAULT_EDGE_THRESHOLD, Vector2::splat(1.0), 2.0);

        correct_errors(&mut bitmap, threshold);
        let once = bitmap.clone();
        assert_eq!(correct_errors(&mut bitmap, threshold), 0);
        assert_eq!(bitmap, once);
    }

    #[test]
    fn test_clash_threshold_per_axis() {
        let t = clash_threshold(1.0, Vector2::new(2.0, 4.0), 0.5);
        assert_eq!(t, Vector2::new(1.0, 0.5));
    }
}
