//! Edge coloring: assigns output channels to edges so that corners stay sharp.
//!
//! Edges meeting at a corner must not share two channels, otherwise the median
//! of the three channel distances rounds the corner off. Smooth contours need
//! no special treatment and are coloured white.

use tracing::debug;

use crate::math::Vector2;
use crate::types::{Contour, EdgeColor, EdgeSegment, Shape};

/// Default angle threshold in radians; turns sharper than this count as corners.
pub const DEFAULT_ANGLE_THRESHOLD: f64 = 3.0;

/// Check if two consecutive unit directions form a corner.
pub fn is_corner(a: Vector2, b: Vector2, cross_threshold: f64) -> bool {
    a.dot(b) <= 0.0 || a.cross(b).abs() > cross_threshold
}

/// Pick the next colour, consuming part of `seed`.
///
/// When `color` shares exactly one channel with `banned`, the result is the
/// complement of that channel, which differs from both. Black or white start
/// colours pick one of cyan, magenta or yellow; any other colour is rotated by
/// one or two bits. Returns the new colour and the remaining seed.
pub fn switch_color(color: EdgeColor, seed: u64, banned: EdgeColor) -> (EdgeColor, u64) {
    const START: [EdgeColor; 3] = [EdgeColor::CYAN, EdgeColor::MAGENTA, EdgeColor::YELLOW];

    let combined = color & banned;
    if combined.is_primary() {
        return (combined ^ EdgeColor::WHITE, seed);
    }
    if color == EdgeColor::BLACK || color == EdgeColor::WHITE {
        return (START[(seed % 3) as usize], seed / 3);
    }
    let shifted = color.bits() << (1 + (seed & 1));
    (EdgeColor::from_bits(shifted | shifted >> 3), seed >> 1)
}

/// Indices of edges that start at a corner.
fn find_corners(edges: &[EdgeSegment], cross_threshold: f64) -> Vec<usize> {
    let Some(last) = edges.last() else {
        return Vec::new();
    };
    let mut prev_direction = last.direction(1.0);
    let mut corners = Vec::new();
    for (i, edge) in edges.iter().enumerate() {
        if is_corner(
            prev_direction.normalize(false),
            edge.direction(0.0).normalize(false),
            cross_threshold,
        ) {
            corners.push(i);
        }
        prev_direction = edge.direction(1.0);
    }
    corners
}

/// Colour one contour, returning the rebuilt contour and the remaining seed.
fn color_contour(contour: Contour, cross_threshold: f64, seed: u64) -> (Contour, u64) {
    let mut edges = contour.into_edges();
    let corners = find_corners(&edges, cross_threshold);

    match corners.as_slice() {
        [] => {
            for edge in &mut edges {
                edge.set_color(EdgeColor::WHITE);
            }
            (Contour::new(edges), seed)
        }
        [corner] => {
            let (first, seed) = switch_color(EdgeColor::WHITE, seed, EdgeColor::BLACK);
            let (last, seed) = switch_color(first, seed, EdgeColor::BLACK);
            let colors = [first, EdgeColor::WHITE, last];
            (color_teardrop(edges, *corner, colors), seed)
        }
        _ => color_multi_corner(edges, &corners, seed),
    }
}

/// A contour with a single corner gets three colour spans around the loop.
fn color_teardrop(mut edges: Vec<EdgeSegment>, corner: usize, colors: [EdgeColor; 3]) -> Contour {
    let m = edges.len();
    if m >= 3 {
        for i in 0..m {
            let span = (3.0 + 2.875 * i as f64 / (m - 1) as f64 - 1.4375 + 0.5) as usize - 2;
            edges[(corner + i) % m].set_color(colors[span]);
        }
        return Contour::new(edges);
    }

    // Too few edges to hold three spans: split each in thirds, starting at the corner.
    let parts: Vec<EdgeSegment> = match edges.as_slice() {
        [edge] => edge
            .split_in_thirds()
            .into_iter()
            .zip(colors)
            .map(|(part, color)| part.with_color(color))
            .collect(),
        [a, b] => {
            let (first, second) = if corner == 0 { (a, b) } else { (b, a) };
            first
                .split_in_thirds()
                .into_iter()
                .chain(second.split_in_thirds())
                .enumerate()
                .map(|(i, part)| part.with_color(colors[i / 2]))
                .collect()
        }
        _ => edges,
    };
    Contour::new(parts)
}

fn color_multi_corner(
    mut edges: Vec<EdgeSegment>,
    corners: &[usize],
    seed: u64,
) -> (Contour, u64) {
    let corner_count = corners.len();
    let start = corners[0];
    let m = edges.len();

    let (mut color, mut seed) = switch_color(EdgeColor::WHITE, seed, EdgeColor::BLACK);
    let initial = color;
    let mut spline = 0;

    for i in 0..m {
        let index = (start + i) % m;
        if spline + 1 < corner_count && corners[spline + 1] == index {
            spline += 1;
            // The last span must also differ from the first, which it meets at the seam.
            let banned = if spline == corner_count - 1 {
                initial
            } else {
                EdgeColor::BLACK
            };
            (color, seed) = switch_color(color, seed, banned);
        }
        edges[index].set_color(color);
    }

    (Contour::new(edges), seed)
}

/// Assign edge colours to every contour of `shape`.
///
/// `angle_threshold` is in radians. The same seed always yields the same coloring;
/// the seed is consumed across contours in order.
pub fn edge_coloring_simple(shape: &mut Shape, angle_threshold: f64, seed: u64) {
    let cross_threshold = angle_threshold.sin();
    let mut seed = seed;
    shape.rebuild_contours(|contour| {
        let (colored, next) = color_contour(contour, cross_threshold, seed);
        seed = next;
        colored
    });
    debug!(
        contours = shape.contours().len(),
        edges = shape.edge_count(),
        "Edge coloring complete"
    );
}
