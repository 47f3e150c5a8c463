//! Distance field generation.
//!
//! Every pixel is evaluated independently against the read-only shape, so rows
//! are filled in parallel. Contours are combined by winding: the nearest
//! positive (filled) and negative (hole) contours compete, and a contour of the
//! opposite winding that is nearer still overrides the result. This keeps
//! overlapping contours and holes correct without a global boolean union.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{MsdfError, Result};
use crate::math::{median, Vector2};
use crate::types::{Contour, EdgeColor, EdgeDistance, EdgeSegment, Shape, SignedDistance};

use super::{Bitmap, MsdfBitmap, Projection, SdfBitmap};

const CHANNELS: [EdgeColor; 3] = [EdgeColor::RED, EdgeColor::GREEN, EdgeColor::BLUE];

/// Per-channel signed distances of one contour at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiDistance {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub med: f64,
}

impl MultiDistance {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r,
            g,
            b,
            med: median(r, g, b),
        }
    }
}

/// A per-contour value the winding resolution can compare.
trait ContourValue: Copy {
    const FARTHEST: Self;

    fn med(&self) -> f64;
}

impl ContourValue for f64 {
    const FARTHEST: Self = SignedDistance::INFINITE.distance;

    fn med(&self) -> f64 {
        *self
    }
}

impl ContourValue for MultiDistance {
    const FARTHEST: Self = MultiDistance {
        r: SignedDistance::INFINITE.distance,
        g: SignedDistance::INFINITE.distance,
        b: SignedDistance::INFINITE.distance,
        med: SignedDistance::INFINITE.distance,
    };

    fn med(&self) -> f64 {
        self.med
    }
}

/// Pick the distance of the whole shape from per-contour distances.
fn resolve<T: ContourValue>(values: &[T], windings: &[i32]) -> T {
    let mut pos: Option<usize> = None;
    let mut neg: Option<usize> = None;
    for (i, (value, &winding)) in values.iter().zip(windings).enumerate() {
        let d = value.med();
        if winding > 0 && d >= 0.0 && pos.map_or(true, |j| d.abs() < values[j].med().abs()) {
            pos = Some(i);
        }
        if winding < 0 && d <= 0.0 && neg.map_or(true, |j| d.abs() < values[j].med().abs()) {
            neg = Some(i);
        }
    }

    let pos_abs = pos.map_or(f64::INFINITY, |i| values[i].med().abs());
    let neg_abs = neg.map_or(f64::INFINITY, |i| values[i].med().abs());

    let (mut best, winding) = match (pos, neg) {
        (Some(i), _) if pos_abs <= neg_abs => {
            let mut best = values[i];
            for (value, &w) in values.iter().zip(windings) {
                if w > 0 && value.med() > best.med() && value.med().abs() < neg_abs {
                    best = *value;
                }
            }
            (best, 1)
        }
        (_, Some(i)) if neg_abs <= pos_abs => {
            let mut best = values[i];
            for (value, &w) in values.iter().zip(windings) {
                if w < 0 && value.med() < best.med() && value.med().abs() < pos_abs {
                    best = *value;
                }
            }
            (best, -1)
        }
        _ => (T::FARTHEST, 0),
    };

    for (value, &w) in values.iter().zip(windings) {
        if w != winding && value.med().abs() < best.med().abs() {
            best = *value;
        }
    }

    best
}

/// Nearest edge found so far for one channel.
#[derive(Clone, Copy)]
struct Nearest<'s> {
    distance: SignedDistance,
    edge: Option<&'s EdgeSegment>,
    param: f64,
}

impl<'s> Nearest<'s> {
    const NONE: Self = Nearest {
        distance: SignedDistance::INFINITE,
        edge: None,
        param: 0.0,
    };

    fn offer(&mut self, edge: &'s EdgeSegment, result: EdgeDistance) {
        if result.distance.is_closer_than(&self.distance) {
            *self = Nearest {
                distance: result.distance,
                edge: Some(edge),
                param: result.param,
            };
        }
    }

    fn pseudo_distance(&self, origin: Vector2) -> f64 {
        match self.edge {
            Some(edge) => {
                edge.distance_to_pseudo_distance(self.distance, origin, self.param)
                    .distance
            }
            None => self.distance.distance,
        }
    }
}

fn nearest_edge(contour: &Contour, origin: Vector2) -> Nearest<'_> {
    let mut nearest = Nearest::NONE;
    for edge in contour.edges() {
        nearest.offer(edge, edge.signed_distance(origin));
    }
    nearest
}

/// Distance field generator for one shape and framing.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    shape: &'a Shape,
    windings: Vec<i32>,
    range: f64,
    projection: Projection,
}

impl<'a> Generator<'a> {
    /// Create a generator.
    ///
    /// `range` is the distance in shape units spanned by the full [0, 1] output.
    /// Fails if the range or projection is unusable or the shape has open contours.
    pub fn new(shape: &'a Shape, range: f64, projection: Projection) -> Result<Self> {
        if !(range.is_finite() && range > 0.0) {
            return Err(MsdfError::Config {
                message: format!("distance range must be positive, got {}", range),
                help: Some("Pass a positive --range or --px-range".to_string()),
            });
        }
        let scale = projection.scale;
        if !scale.is_finite() || scale.x == 0.0 || scale.y == 0.0 || !projection.translate.is_finite() {
            return Err(MsdfError::config(format!(
                "projection must have a finite, non-zero scale, got {:?}",
                projection
            )));
        }
        shape.validate()?;

        let windings = shape.contours().iter().map(Contour::winding).collect();
        Ok(Self {
            shape,
            windings,
            range,
            projection,
        })
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Map a distance in shape units to the output domain (0.5 on the outline).
    pub fn normalize(&self, distance: f64) -> f32 {
        (distance / self.range + 0.5) as f32
    }

    /// True signed distance from `origin` (shape coordinates) to the shape.
    pub fn sdf_at(&self, origin: Vector2) -> f64 {
        let values: Vec<f64> = self
            .shape
            .contours()
            .iter()
            .map(|contour| nearest_edge(contour, origin).distance.distance)
            .collect();
        resolve(&values, &self.windings)
    }

    /// Signed pseudo-distance: like [`Generator::sdf_at`], but distances past an
    /// edge's endpoint are measured to the edge's tangent line.
    pub fn pseudo_sdf_at(&self, origin: Vector2) -> f64 {
        let values: Vec<f64> = self
            .shape
            .contours()
            .iter()
            .map(|contour| nearest_edge(contour, origin).pseudo_distance(origin))
            .collect();
        resolve(&values, &self.windings)
    }

    /// Per-channel signed pseudo-distances from `origin` to the shape.
    pub fn msdf_at(&self, origin: Vector2) -> MultiDistance {
        let mut global = [Nearest::NONE; 3];
        let mut values = Vec::with_capacity(self.shape.contours().len());

        for contour in self.shape.contours() {
            let mut nearest = [Nearest::NONE; 3];
            for edge in contour.edges() {
                let result = edge.signed_distance(origin);
                for (channel, color) in CHANNELS.iter().enumerate() {
                    if edge.color().contains(*color) {
                        nearest[channel].offer(edge, result);
                    }
                }
            }
            for (best, candidate) in global.iter_mut().zip(&nearest) {
                if candidate.distance.is_closer_than(&best.distance) {
                    *best = *candidate;
                }
            }
            values.push(MultiDistance::new(
                nearest[0].pseudo_distance(origin),
                nearest[1].pseudo_distance(origin),
                nearest[2].pseudo_distance(origin),
            ));
        }

        let closest = MultiDistance::new(
            global[0].pseudo_distance(origin),
            global[1].pseudo_distance(origin),
            global[2].pseudo_distance(origin),
        );
        let resolved = resolve(&values, &self.windings);
        // The single nearest edges per channel win when they agree with the resolved contour.
        if closest.med == resolved.med {
            MultiDistance {
                med: resolved.med,
                ..closest
            }
        } else {
            resolved
        }
    }

    /// Generate a single-channel signed distance field.
    pub fn generate_sdf(&self, width: usize, height: usize) -> SdfBitmap {
        debug!(width, height, "Generating SDF");
        self.fill(width, height, |p| [self.normalize(self.sdf_at(p))])
    }

    /// Generate a single-channel signed pseudo-distance field.
    pub fn generate_pseudo_sdf(&self, width: usize, height: usize) -> SdfBitmap {
        debug!(width, height, "Generating pseudo-SDF");
        self.fill(width, height, |p| [self.normalize(self.pseudo_sdf_at(p))])
    }

    /// Generate a three-channel signed distance field.
    ///
    /// The shape should be edge-coloured first; white edges contribute to every channel.
    pub fn generate_msdf(&self, width: usize, height: usize) -> MsdfBitmap {
        debug!(width, height, "Generating MSDF");
        self.fill(width, height, |p| {
            let d = self.msdf_at(p);
            [self.normalize(d.r), self.normalize(d.g), self.normalize(d.b)]
        })
    }

    /// Evaluate every pixel centre, one row per task.
    fn fill<const N: usize>(
        &self,
        width: usize,
        height: usize,
        eval: impl Fn(Vector2) -> [f32; N] + Sync,
    ) -> Bitmap<N> {
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return bitmap;
        }

        let inverse = self.shape.inverse_y_axis;
        bitmap
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                let y = if inverse { height - 1 - row } else { row };
                for (x, pixel) in out.iter_mut().enumerate() {
                    *pixel = eval(self.projection.pixel_center(x, y));
                }
            });
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coloring::{edge_coloring_simple, DEFAULT_ANGLE_THRESHOLD};

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        Contour::new(vec![
            EdgeSegment::line(v(x0, y0), v(x1, y0)),
            EdgeSegment::line(v(x1, y0), v(x1, y1)),
            EdgeSegment::line(v(x1, y1), v(x0, y1)),
            EdgeSegment::line(v(x0, y1), v(x0, y0)),
        ])
    }

    fn reversed(contour: Contour) -> Contour {
        contour
            .into_edges()
            .into_iter()
            .rev()
            .map(|edge| match edge {
                EdgeSegment::Linear { points: [a, b], .. } => EdgeSegment::line(b, a),
                other => other,
            })
            .collect()
    }

    fn circle(cx: f64, cy: f64, r: f64) -> Contour {
        const K: f64 = 0.552_284_749_8;
        let p = |x: f64, y: f64| v(cx + x * r, cy + y * r);
        Contour::new(vec![
            EdgeSegment::cubic(p(1.0, 0.0), p(1.0, K), p(K, 1.0), p(0.0, 1.0)),
            EdgeSegment::cubic(p(0.0, 1.0), p(-K, 1.0), p(-1.0, K), p(-1.0, 0.0)),
            EdgeSegment::cubic(p(-1.0, 0.0), p(-1.0, -K), p(-K, -1.0), p(0.0, -1.0)),
            EdgeSegment::cubic(p(0.0, -1.0), p(K, -1.0), p(1.0, -K), p(1.0, 0.0)),
        ])
    }

    #[test]
    fn test_unit_square_boundary_inside_outside() {
        let shape = Shape::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();

        assert_eq!(generator.normalize(generator.sdf_at(v(0.5, 0.0))), 0.5);
        assert_eq!(generator.normalize(generator.sdf_at(v(1.0, 0.3))), 0.5);
        assert_eq!(generator.normalize(generator.sdf_at(v(0.5, 0.5))), 0.75);
        assert!(generator.normalize(generator.sdf_at(v(0.25, 0.6))) > 0.5);
        assert!(generator.normalize(generator.sdf_at(v(2.0, 2.0))) < 0.5);
        assert!(generator.normalize(generator.sdf_at(v(-0.3, 0.5))) < 0.5);
    }

    #[test]
    fn test_exterior_corner_distance() {
        let shape = Shape::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();
        let d = generator.sdf_at(v(2.0, 2.0));
        assert!((d + 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_generate_sdf_grid() {
        let shape = Shape::new(vec![rect(1.0, 1.0, 5.0, 5.0)]);
        let generator = Generator::new(&shape, 4.0, Projection::default()).unwrap();
        let bitmap = generator.generate_sdf(6, 6);

        assert_eq!(bitmap.size(), (6, 6));
        // Pixel (0, 0) samples (0.5, 0.5): outside, half a pixel from both sides.
        let corner = bitmap.get(0, 0).unwrap()[0];
        assert!((corner - (0.5 - 0.5f32.sqrt() / 4.0)).abs() < 1e-6);
        // Pixel (1, 2) samples (1.5, 2.5): inside, 0.5 from the left side.
        assert_eq!(bitmap.get(1, 2).unwrap()[0], 0.625);
        assert!(bitmap.get(3, 3).unwrap()[0] > 0.5);
    }

    #[test]
    fn test_inverse_y_axis_flips_rows() {
        let contour = Contour::new(vec![
            EdgeSegment::line(v(0.0, 0.0), v(4.0, 0.0)),
            EdgeSegment::line(v(4.0, 0.0), v(0.0, 3.0)),
            EdgeSegment::line(v(0.0, 3.0), v(0.0, 0.0)),
        ]);
        let upright = Shape::new(vec![contour]);
        let flipped = upright.clone().with_inverse_y_axis(true);
        let projection = Projection::default();

        let a = Generator::new(&upright, 2.0, projection)
            .unwrap()
            .generate_sdf(5, 4);
        let b = Generator::new(&flipped, 2.0, projection)
            .unwrap()
            .generate_sdf(5, 4);

        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(a.get(x, y), b.get(x, 3 - y));
            }
        }
    }

    #[test]
    fn test_hole_is_outside() {
        let shape = Shape::new(vec![
            rect(0.0, 0.0, 10.0, 10.0),
            reversed(rect(3.0, 3.0, 7.0, 7.0)),
        ]);
        assert_eq!(shape.contours()[1].winding(), -1);
        let generator = Generator::new(&shape, 4.0, Projection::default()).unwrap();

        assert!((generator.sdf_at(v(5.0, 5.0)) + 2.0).abs() < 1e-12);
        assert!((generator.sdf_at(v(1.5, 5.0)) - 1.5).abs() < 1e-12);
        assert!(generator.sdf_at(v(11.0, 5.0)) < 0.0);
    }

    #[test]
    fn test_overlapping_contours_stay_inside() {
        let shape = Shape::new(vec![rect(0.0, 0.0, 2.0, 2.0), rect(1.0, 0.0, 3.0, 2.0)]);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();

        assert!(generator.sdf_at(v(1.2, 1.0)) > 0.0);
        assert!(generator.sdf_at(v(1.9, 1.0)) > 0.0);
        assert!(generator.sdf_at(v(3.5, 1.0)) < 0.0);
    }

    #[test]
    fn test_msdf_sign_matches_sdf_on_square() {
        let mut shape = Shape::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        edge_coloring_simple(&mut shape, DEFAULT_ANGLE_THRESHOLD, 0);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();

        let points = [
            v(0.5, 0.5),
            v(0.2, 0.8),
            v(1.2, 0.5),
            v(0.5, -0.4),
            v(1.5, 1.5),
            v(-0.5, -0.5),
            v(-0.3, 1.2),
        ];
        for p in points {
            let sdf = generator.sdf_at(p);
            let msdf = generator.msdf_at(p);
            assert_eq!(sdf > 0.0, msdf.med > 0.0, "at {:?}", p);
        }

        let center = generator.msdf_at(v(0.5, 0.5));
        assert_eq!(center, MultiDistance::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_msdf_corner_keeps_channels_apart() {
        let mut shape = Shape::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        edge_coloring_simple(&mut shape, DEFAULT_ANGLE_THRESHOLD, 0);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();

        // Outside the right edge, the bottom/top edges' channel sees a positive pseudo-distance.
        let d = generator.msdf_at(v(1.2, 0.5));
        assert!((d.med + 0.2).abs() < 1e-12);
        assert!(d.r.max(d.g).max(d.b) > 0.0);
    }

    #[test]
    fn test_straight_quadratics_match_lines() {
        let as_quadratics = |contour: Contour| -> Contour {
            contour
                .into_edges()
                .into_iter()
                .map(|edge| {
                    let (a, b) = (edge.start(), edge.end());
                    EdgeSegment::quadratic(a, (a + b) * 0.5, b)
                })
                .collect()
        };
        let mut lines = Shape::new(vec![rect(0.0, 0.0, 4.0, 4.0)]);
        let mut quads = Shape::new(vec![as_quadratics(rect(0.0, 0.0, 4.0, 4.0))]);
        edge_coloring_simple(&mut lines, DEFAULT_ANGLE_THRESHOLD, 0);
        edge_coloring_simple(&mut quads, DEFAULT_ANGLE_THRESHOLD, 0);
        let a = Generator::new(&lines, 2.0, Projection::default()).unwrap();
        let b = Generator::new(&quads, 2.0, Projection::default()).unwrap();

        let points = [
            v(4.5, -1.0),
            v(-1.0, -1.0),
            v(-1.0, 2.0),
            v(-0.5, 4.5),
            v(5.0, 4.2),
            v(2.0, 1.0),
        ];
        for p in points {
            let (pa, pb) = (a.pseudo_sdf_at(p), b.pseudo_sdf_at(p));
            assert!((pa - pb).abs() < 1e-9, "pseudo at {:?}: {} vs {}", p, pa, pb);

            let (ma, mb) = (a.msdf_at(p), b.msdf_at(p));
            for (ca, cb) in [(ma.r, mb.r), (ma.g, mb.g), (ma.b, mb.b)] {
                assert!((ca - cb).abs() < 1e-9, "msdf at {:?}: {:?} vs {:?}", p, ma, mb);
            }
        }
        assert!((a.pseudo_sdf_at(v(4.5, -1.0)) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_white_msdf_equals_pseudo_sdf() {
        let mut shape = Shape::new(vec![circle(0.0, 0.0, 2.0)]);
        edge_coloring_simple(&mut shape, DEFAULT_ANGLE_THRESHOLD, 0);
        let generator = Generator::new(&shape, 1.0, Projection::default()).unwrap();

        for p in [v(0.0, 0.0), v(1.9, 0.3), v(3.0, 3.0), v(-2.5, 0.1)] {
            let multi = generator.msdf_at(p);
            let pseudo = generator.pseudo_sdf_at(p);
            assert_eq!(multi.r, pseudo);
            assert_eq!(multi.g, pseudo);
            assert_eq!(multi.b, pseudo);
        }
    }

    #[test]
    fn test_generate_msdf_and_pseudo_sdf_dimensions() {
        let mut shape = Shape::new(vec![circle(4.0, 4.0, 3.0)]);
        edge_coloring_simple(&mut shape, DEFAULT_ANGLE_THRESHOLD, 0);
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();

        let msdf = generator.generate_msdf(8, 8);
        let psdf = generator.generate_pseudo_sdf(8, 8);
        assert_eq!(msdf.size(), (8, 8));
        assert_eq!(psdf.size(), (8, 8));
        assert!(msdf.get(4, 4).unwrap().iter().all(|&c| c > 0.5));
        assert!(psdf.get(0, 0).unwrap()[0] < 0.5);
        assert!(generator.generate_msdf(0, 3).pixels().is_empty());
    }

    #[test]
    fn test_empty_shape_is_far_outside() {
        let shape = Shape::default();
        let generator = Generator::new(&shape, 2.0, Projection::default()).unwrap();
        let bitmap = generator.generate_sdf(2, 2);
        assert!(bitmap.pixels().iter().all(|p| p[0] < 0.0));
    }

    #[test]
    fn test_new_rejects_bad_range() {
        let shape = Shape::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        for range in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Generator::new(&shape, range, Projection::default()).unwrap_err();
            assert!(matches!(err, MsdfError::Config { .. }), "range {}", range);
        }
        let flat = Projection::new(v(0.0, 1.0), Vector2::ZERO);
        assert!(Generator::new(&shape, 1.0, flat).is_err());
    }

    #[test]
    fn test_new_rejects_open_shape() {
        let shape = Shape::new(vec![Contour::new(vec![EdgeSegment::line(
            v(0.0, 0.0),
            v(1.0, 0.0),
        )])]);
        let err = Generator::new(&shape, 1.0, Projection::default()).unwrap_err();
        assert!(matches!(err, MsdfError::InvalidShape { .. }));
    }
}
