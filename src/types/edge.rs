//! Edge segments: lines, quadratic and cubic Bezier curves.
//!
//! Every distance query reports distances as positive on the left of the
//! edge's direction of travel, so a counter-clockwise contour is positive
//! inside.

use crate::math::{mix, non_zero_sign, solve_cubic, solve_quadratic, Vector2};

use super::{Bounds, EdgeColor, SignedDistance};

/// Guard for divisions by squared lengths and Newton denominators.
const EPSILON: f64 = 1e-14;

/// Number of evenly spaced starting parameters for the cubic nearest-point search
/// (the search starts at `i / CUBIC_SEARCH_STARTS` for every `i` up to and including it).
const CUBIC_SEARCH_STARTS: u32 = 4;

/// Newton iterations per starting parameter.
const CUBIC_SEARCH_STEPS: u32 = 4;

/// One segment of a contour, tagged with the channels it contributes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeSegment {
    Linear {
        points: [Vector2; 2],
        color: EdgeColor,
    },
    Quadratic {
        points: [Vector2; 3],
        color: EdgeColor,
    },
    Cubic {
        points: [Vector2; 4],
        color: EdgeColor,
    },
}

/// Result of a nearest-point query against one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistance {
    /// Signed distance to the nearest point.
    pub distance: SignedDistance,
    /// Curve parameter of the nearest point; outside `[0, 1]` when an endpoint
    /// was nearest and the query point lies beyond it.
    pub param: f64,
}

impl EdgeSegment {
    /// Create a white line segment.
    pub fn line(p0: Vector2, p1: Vector2) -> Self {
        EdgeSegment::Linear {
            points: [p0, p1],
            color: EdgeColor::WHITE,
        }
    }

    /// Create a white quadratic segment.
    ///
    /// A control point sitting on an endpoint is moved to the middle of the chord.
    pub fn quadratic(p0: Vector2, mut p1: Vector2, p2: Vector2) -> Self {
        if p1 == p0 || p1 == p2 {
            p1 = (p0 + p2) * 0.5;
        }
        EdgeSegment::Quadratic {
            points: [p0, p1, p2],
            color: EdgeColor::WHITE,
        }
    }

    /// Create a white cubic segment.
    ///
    /// When both control points sit on endpoints the curve is a straight line with
    /// vanishing tangents; the controls are spread along the chord instead.
    pub fn cubic(p0: Vector2, mut p1: Vector2, mut p2: Vector2, p3: Vector2) -> Self {
        if (p1 == p0 || p1 == p3) && (p2 == p0 || p2 == p3) {
            p1 = mix(p0, p3, 1.0 / 3.0);
            p2 = mix(p0, p3, 2.0 / 3.0);
        }
        EdgeSegment::Cubic {
            points: [p0, p1, p2, p3],
            color: EdgeColor::WHITE,
        }
    }

    /// Return this edge with a different colour.
    pub fn with_color(mut self, color: EdgeColor) -> Self {
        self.set_color(color);
        self
    }

    pub fn color(&self) -> EdgeColor {
        match *self {
            EdgeSegment::Linear { color, .. }
            | EdgeSegment::Quadratic { color, .. }
            | EdgeSegment::Cubic { color, .. } => color,
        }
    }

    pub fn set_color(&mut self, value: EdgeColor) {
        match self {
            EdgeSegment::Linear { color, .. }
            | EdgeSegment::Quadratic { color, .. }
            | EdgeSegment::Cubic { color, .. } => *color = value,
        }
    }

    /// The defining points (endpoints and control points).
    pub fn points(&self) -> &[Vector2] {
        match self {
            EdgeSegment::Linear { points, .. } => points,
            EdgeSegment::Quadratic { points, .. } => points,
            EdgeSegment::Cubic { points, .. } => points,
        }
    }

    pub fn start(&self) -> Vector2 {
        self.points()[0]
    }

    pub fn end(&self) -> Vector2 {
        let points = self.points();
        points[points.len() - 1]
    }

    /// Point on the edge at parameter `t`.
    pub fn point(&self, t: f64) -> Vector2 {
        match self {
            EdgeSegment::Linear { points: [p0, p1], .. } => mix(*p0, *p1, t),
            EdgeSegment::Quadratic {
                points: [p0, p1, p2],
                ..
            } => mix(mix(*p0, *p1, t), mix(*p1, *p2, t), t),
            EdgeSegment::Cubic {
                points: [p0, p1, p2, p3],
                ..
            } => {
                let p12 = mix(*p1, *p2, t);
                mix(
                    mix(mix(*p0, *p1, t), p12, t),
                    mix(p12, mix(*p2, *p3, t), t),
                    t,
                )
            }
        }
    }

    /// Tangent of the edge at parameter `t` (not normalized).
    pub fn direction(&self, t: f64) -> Vector2 {
        match self {
            EdgeSegment::Linear { points: [p0, p1], .. } => *p1 - *p0,
            EdgeSegment::Quadratic {
                points: [p0, p1, p2],
                ..
            } => {
                let tangent = mix(*p1 - *p0, *p2 - *p1, t);
                if tangent.is_zero() {
                    return *p2 - *p0;
                }
                tangent
            }
            EdgeSegment::Cubic {
                points: [p0, p1, p2, p3],
                ..
            } => {
                let tangent = mix(
                    mix(*p1 - *p0, *p2 - *p1, t),
                    mix(*p2 - *p1, *p3 - *p2, t),
                    t,
                );
                if tangent.is_zero() {
                    if t == 0.0 {
                        return *p2 - *p0;
                    }
                    if t == 1.0 {
                        return *p3 - *p1;
                    }
                }
                tangent
            }
        }
    }

    /// Signed distance from `origin` to the nearest point of the edge.
    pub fn signed_distance(&self, origin: Vector2) -> EdgeDistance {
        match *self {
            EdgeSegment::Linear { points: [p0, p1], .. } => linear_distance(p0, p1, origin),
            EdgeSegment::Quadratic { points, .. } => self.quadratic_distance(points, origin),
            EdgeSegment::Cubic { points, .. } => self.cubic_distance(points, origin),
        }
    }

    fn quadratic_distance(&self, [p0, p1, p2]: [Vector2; 3], origin: Vector2) -> EdgeDistance {
        let qa = p0 - origin;
        let ab = p1 - p0;
        let br = p2 - p1 - ab;
        let a = br.dot(br);
        let b = 3.0 * ab.dot(br);
        let c = 2.0 * ab.dot(ab) + qa.dot(br);
        let d = qa.dot(ab);

        let (mut min_distance, mut param) = self.endpoint_candidate(origin);

        for t in solve_cubic(a, b, c, d).iter() {
            if t > 0.0 && t < 1.0 {
                let to_origin = origin - self.point(t);
                let distance =
                    non_zero_sign(self.direction(t).cross(to_origin)) * to_origin.length();
                if distance.abs() <= min_distance.abs() {
                    min_distance = distance;
                    param = t;
                }
            }
        }

        self.finish_distance(min_distance, param, origin)
    }

    fn cubic_distance(&self, [p0, p1, p2, p3]: [Vector2; 4], origin: Vector2) -> EdgeDistance {
        let ab = p1 - p0;
        let br = p2 - p1 - ab;
        let a3 = (p3 - p2) - (p2 - p1) - br;

        let (mut min_distance, mut param) = self.endpoint_candidate(origin);

        for i in 0..=CUBIC_SEARCH_STARTS {
            let mut t = f64::from(i) / f64::from(CUBIC_SEARCH_STARTS);
            let mut step = 0;
            loop {
                let qe = self.point(t) - origin;
                let distance = non_zero_sign(self.direction(t).cross(-qe)) * qe.length();
                if distance.abs() < min_distance.abs() {
                    min_distance = distance;
                    param = t;
                }
                if step == CUBIC_SEARCH_STEPS {
                    break;
                }
                // Newton step on the derivative of the squared distance.
                let d1 = a3 * (3.0 * t * t) + br * (6.0 * t) + ab * 3.0;
                let d2 = a3 * (6.0 * t) + br * 6.0;
                let denominator = d1.dot(d1) + qe.dot(d2);
                if denominator.abs() < EPSILON {
                    break;
                }
                t -= qe.dot(d1) / denominator;
                if !(0.0..=1.0).contains(&t) {
                    break;
                }
                step += 1;
            }
        }

        self.finish_distance(min_distance, param, origin)
    }

    /// Nearest of the two endpoints, with a pseudo-parameter that lies outside
    /// `[0, 1]` when the origin is past that endpoint along its tangent.
    fn endpoint_candidate(&self, origin: Vector2) -> (f64, f64) {
        let start_dir = self.direction(0.0);
        let from_start = origin - self.start();
        let mut min_distance = non_zero_sign(start_dir.cross(from_start)) * from_start.length();
        let mut param = projection_ratio(from_start, start_dir);

        let end_dir = self.direction(1.0);
        let from_end = origin - self.end();
        let distance = non_zero_sign(end_dir.cross(from_end)) * from_end.length();
        if distance.abs() < min_distance.abs() {
            min_distance = distance;
            param = 1.0 + projection_ratio(from_end, end_dir);
        }

        (min_distance, param)
    }

    fn finish_distance(&self, distance: f64, param: f64, origin: Vector2) -> EdgeDistance {
        let dot = if (0.0..=1.0).contains(&param) {
            0.0
        } else if param < 0.5 {
            self.direction(0.0)
                .normalize(false)
                .dot((self.start() - origin).normalize(false))
                .abs()
        } else {
            self.direction(1.0)
                .normalize(false)
                .dot((self.end() - origin).normalize(false))
                .abs()
        };
        EdgeDistance {
            distance: SignedDistance::new(distance, dot),
            param,
        }
    }

    /// Replace an endpoint distance by the distance to the endpoint's tangent line.
    ///
    /// Applies only when `param` is outside `[0, 1]` and the origin lies beyond
    /// that endpoint, and never grows the magnitude of `distance`.
    pub fn distance_to_pseudo_distance(
        &self,
        distance: SignedDistance,
        origin: Vector2,
        param: f64,
    ) -> SignedDistance {
        if param < 0.0 {
            let dir = self.direction(0.0).normalize(false);
            let aq = origin - self.start();
            if aq.dot(dir) < 0.0 {
                let pseudo = dir.cross(aq);
                if pseudo.abs() <= distance.distance.abs() {
                    return SignedDistance::new(pseudo, 0.0);
                }
            }
        } else if param > 1.0 {
            let dir = self.direction(1.0).normalize(false);
            let bq = origin - self.end();
            if bq.dot(dir) > 0.0 {
                let pseudo = dir.cross(bq);
                if pseudo.abs() <= distance.distance.abs() {
                    return SignedDistance::new(pseudo, 0.0);
                }
            }
        }
        distance
    }

    /// Axis-aligned bounds, including interior extrema of curves.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::EMPTY;
        bounds.include(self.start());
        bounds.include(self.end());

        match *self {
            EdgeSegment::Linear { .. } => {}
            EdgeSegment::Quadratic {
                points: [p0, p1, p2],
                ..
            } => {
                let bottom = (p1 - p0) - (p2 - p1);
                if bottom.x != 0.0 {
                    let t = (p1.x - p0.x) / bottom.x;
                    if t > 0.0 && t < 1.0 {
                        bounds.include(self.point(t));
                    }
                }
                if bottom.y != 0.0 {
                    let t = (p1.y - p0.y) / bottom.y;
                    if t > 0.0 && t < 1.0 {
                        bounds.include(self.point(t));
                    }
                }
            }
            EdgeSegment::Cubic {
                points: [p0, p1, p2, p3],
                ..
            } => {
                let a0 = p1 - p0;
                let a1 = (p2 - p1 - a0) * 2.0;
                let a2 = p3 - p2 * 3.0 + p1 * 3.0 - p0;
                let extrema = solve_quadratic(a2.x, a1.x, a0.x)
                    .iter()
                    .chain(solve_quadratic(a2.y, a1.y, a0.y).iter())
                    .filter(|t| *t > 0.0 && *t < 1.0)
                    .collect::<Vec<_>>();
                for t in extrema {
                    bounds.include(self.point(t));
                }
            }
        }

        bounds
    }

    /// Split into three edges of the same kind covering `[0,⅓]`, `[⅓,⅔]`, `[⅔,1]`.
    pub fn split_in_thirds(&self) -> [EdgeSegment; 3] {
        const THIRD: f64 = 1.0 / 3.0;
        const TWO_THIRDS: f64 = 2.0 / 3.0;

        let color = self.color();
        let a = self.point(THIRD);
        let b = self.point(TWO_THIRDS);

        match *self {
            EdgeSegment::Linear { points: [p0, p1], .. } => [
                EdgeSegment::Linear {
                    points: [p0, a],
                    color,
                },
                EdgeSegment::Linear {
                    points: [a, b],
                    color,
                },
                EdgeSegment::Linear {
                    points: [b, p1],
                    color,
                },
            ],
            EdgeSegment::Quadratic {
                points: [p0, p1, p2],
                ..
            } => [
                EdgeSegment::Quadratic {
                    points: [p0, mix(p0, p1, THIRD), a],
                    color,
                },
                EdgeSegment::Quadratic {
                    points: [
                        a,
                        mix(mix(p0, p1, 5.0 / 9.0), mix(p1, p2, 4.0 / 9.0), 0.5),
                        b,
                    ],
                    color,
                },
                EdgeSegment::Quadratic {
                    points: [b, mix(p1, p2, TWO_THIRDS), p2],
                    color,
                },
            ],
            EdgeSegment::Cubic {
                points: [p0, p1, p2, p3],
                ..
            } => {
                let first_control = if p0 == p1 { p0 } else { mix(p0, p1, THIRD) };
                let last_control = if p2 == p3 { p3 } else { mix(p2, p3, TWO_THIRDS) };
                [
                    EdgeSegment::Cubic {
                        points: [
                            p0,
                            first_control,
                            mix(mix(p0, p1, THIRD), mix(p1, p2, THIRD), THIRD),
                            a,
                        ],
                        color,
                    },
                    EdgeSegment::Cubic {
                        points: [
                            a,
                            mix(
                                mix(mix(p0, p1, THIRD), mix(p1, p2, THIRD), THIRD),
                                mix(mix(p1, p2, THIRD), mix(p2, p3, THIRD), THIRD),
                                TWO_THIRDS,
                            ),
                            mix(
                                mix(mix(p0, p1, TWO_THIRDS), mix(p1, p2, TWO_THIRDS), TWO_THIRDS),
                                mix(mix(p1, p2, TWO_THIRDS), mix(p2, p3, TWO_THIRDS), TWO_THIRDS),
                                THIRD,
                            ),
                            b,
                        ],
                        color,
                    },
                    EdgeSegment::Cubic {
                        points: [
                            b,
                            mix(mix(p1, p2, TWO_THIRDS), mix(p2, p3, TWO_THIRDS), TWO_THIRDS),
                            last_control,
                            p3,
                        ],
                        color,
                    },
                ]
            }
        }
    }

    /// Relocate the start point, keeping the start tangent direction where possible.
    pub fn move_start_point(&mut self, to: Vector2) {
        match self {
            EdgeSegment::Linear { points, .. } => points[0] = to,
            EdgeSegment::Quadratic { points, .. } => {
                let [p0, p1, p2] = *points;
                let original_dir = p0 - p1;
                let denominator = (p0 - p1).cross(p2 - p1);
                let mut control = p1;
                if denominator.abs() > EPSILON {
                    control += (p2 - p1) * ((p0 - p1).cross(to - p0) / denominator);
                }
                if original_dir.dot(to - control) < 0.0 {
                    control = p1;
                }
                *points = [to, control, p2];
            }
            EdgeSegment::Cubic { points, .. } => {
                points[1] += to - points[0];
                points[0] = to;
            }
        }
    }

    /// Relocate the end point, keeping the end tangent direction where possible.
    pub fn move_end_point(&mut self, to: Vector2) {
        match self {
            EdgeSegment::Linear { points, .. } => points[1] = to,
            EdgeSegment::Quadratic { points, .. } => {
                let [p0, p1, p2] = *points;
                let original_dir = p2 - p1;
                let denominator = (p2 - p1).cross(p0 - p1);
                let mut control = p1;
                if denominator.abs() > EPSILON {
                    control += (p0 - p1) * ((p2 - p1).cross(to - p2) / denominator);
                }
                if original_dir.dot(to - control) < 0.0 {
                    control = p1;
                }
                *points = [p0, control, to];
            }
            EdgeSegment::Cubic { points, .. } => {
                points[2] += to - points[3];
                points[3] = to;
            }
        }
    }
}

/// Projection of `v` onto `dir` as a fraction of `dir`'s length.
fn projection_ratio(v: Vector2, dir: Vector2) -> f64 {
    let len2 = dir.dot(dir);
    if len2 < EPSILON {
        return 0.0;
    }
    v.dot(dir) / len2
}

fn linear_distance(p0: Vector2, p1: Vector2, origin: Vector2) -> EdgeDistance {
    let aq = origin - p0;
    let ab = p1 - p0;
    let param = projection_ratio(aq, ab);
    let eq = (if param > 0.5 { p1 } else { p0 }) - origin;
    let endpoint_distance = eq.length();

    if param > 0.0 && param < 1.0 {
        let ortho_distance = ab.orthonormal(true, false).dot(aq);
        if ortho_distance.abs() < endpoint_distance {
            return EdgeDistance {
                distance: SignedDistance::new(ortho_distance, 0.0),
                param,
            };
        }
    }

    EdgeDistance {
        distance: SignedDistance::new(
            non_zero_sign(ab.cross(aq)) * endpoint_distance,
            ab.normalize(false).dot(eq.normalize(false)).abs(),
        ),
        param,
    }
}
