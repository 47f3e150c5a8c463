//! Geometric primitives and scalar helpers.

mod equation;
mod vector;

pub use equation::{solve_cubic, solve_quadratic, Roots};
pub use vector::Vector2;

/// Linear interpolation between `a` and `b`.
pub fn mix(a: Vector2, b: Vector2, t: f64) -> Vector2 {
    a * (1.0 - t) + b * t
}

/// Median of three values.
pub fn median(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).max(a.max(b).min(c))
}

/// Median of three single-precision values.
pub fn median_f32(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).max(a.max(b).min(c))
}

/// Sign of `n` as -1, 0 or +1.
pub fn sign(n: f64) -> i32 {
    (n > 0.0) as i32 - (n < 0.0) as i32
}

/// Sign of `n` where zero counts as positive.
///
/// Orientation tests on degenerate geometry produce exact zeros; treating them as
/// positive keeps every distance signed.
pub fn non_zero_sign(n: f64) -> f64 {
    if n >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
