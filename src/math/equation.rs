//! Closed-form polynomial root solvers.
//!
//! Both solvers degrade to the next lower degree when the leading coefficient is
//! too small to divide by, so callers never see NaN or infinite roots.

use std::f64::consts::PI;

/// Coefficients with a magnitude below this are treated as zero.
const EPSILON: f64 = 1e-14;

/// A set of at most three real roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roots {
    values: [f64; 3],
    len: usize,
}

impl Roots {
    fn none() -> Self {
        Self::default()
    }

    fn from_slice(roots: &[f64]) -> Self {
        let mut values = [0.0; 3];
        values[..roots.len()].copy_from_slice(roots);
        Self {
            values,
            len: roots.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Solve `a·x² + b·x + c = 0`.
///
/// A fully degenerate equation (all coefficients zero) has infinitely many
/// solutions; it is reported as no roots because no single parameter is special.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return Roots::none();
        }
        return Roots::from_slice(&[-c / b]);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant > 0.0 {
        let root = discriminant.sqrt();
        Roots::from_slice(&[(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)])
    } else if discriminant == 0.0 {
        Roots::from_slice(&[-b / (2.0 * a)])
    } else {
        Roots::none()
    }
}

/// Solve the monic cubic `x³ + a·x² + b·x + c = 0`.
fn solve_cubic_normed(a: f64, b: f64, c: f64) -> Roots {
    let a2 = a * a;
    let q = (a2 - 3.0 * b) / 9.0;
    let r = (a * (2.0 * a2 - 9.0 * b) + 27.0 * c) / 54.0;
    let r2 = r * r;
    let q3 = q * q * q;
    let shift = a / 3.0;

    if r2 < q3 {
        // Three real roots: trigonometric method.
        let t = (r / q3.sqrt()).clamp(-1.0, 1.0).acos();
        let m = -2.0 * q.sqrt();
        return Roots::from_slice(&[
            m * (t / 3.0).cos() - shift,
            m * ((t + 2.0 * PI) / 3.0).cos() - shift,
            m * ((t - 2.0 * PI) / 3.0).cos() - shift,
        ]);
    }

    let mut big_a = -(r.abs() + (r2 - q3).sqrt()).cbrt();
    if r < 0.0 {
        big_a = -big_a;
    }
    let big_b = if big_a == 0.0 { 0.0 } else { q / big_a };

    let first = (big_a + big_b) - shift;
    let second = -0.5 * (big_a + big_b) - shift;
    let imaginary = 0.5 * 3f64.sqrt() * (big_a - big_b);
    if imaginary.abs() < EPSILON {
        Roots::from_slice(&[first, second])
    } else {
        Roots::from_slice(&[first])
    }
}

/// Solve `a·x³ + b·x² + c·x + d = 0`.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Roots {
    if a.abs() < EPSILON {
        return solve_quadratic(b, c, d);
    }
    solve_cubic_normed(b / a, c / a, d / a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(roots: Roots) -> Vec<f64> {
        let mut v: Vec<f64> = roots.iter().collect();
        v.sort_by(|a, b| a.total_cmp(b));
        v
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_quadratic_two_roots() {
        // (x - 1)(x - 3)
        assert_close(&sorted(solve_quadratic(1.0, -4.0, 3.0)), &[1.0, 3.0]);
    }

    #[test]
    fn test_quadratic_double_root() {
        assert_close(&sorted(solve_quadratic(1.0, -2.0, 1.0)), &[1.0]);
    }

    #[test]
    fn test_quadratic_no_real_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quadratic_falls_back_to_linear() {
        assert_close(&sorted(solve_quadratic(1e-20, 2.0, -4.0)), &[2.0]);
        assert!(solve_quadratic(0.0, 0.0, 0.0).is_empty());
        assert!(solve_quadratic(0.0, 0.0, 5.0).is_empty());
    }

    #[test]
    fn test_cubic_three_roots() {
        // (x + 1)(x - 2)(x - 4) = x³ - 5x² + 2x + 8
        assert_close(&sorted(solve_cubic(1.0, -5.0, 2.0, 8.0)), &[-1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_cubic_one_real_root() {
        // (x - 2)(x² + 1) = x³ - 2x² + x - 2
        assert_close(&sorted(solve_cubic(1.0, -2.0, 1.0, -2.0)), &[2.0]);
    }

    #[test]
    fn test_cubic_falls_back_to_quadratic() {
        assert_close(&sorted(solve_cubic(0.0, 1.0, -4.0, 3.0)), &[1.0, 3.0]);
    }

    #[test]
    fn test_roots_are_finite() {
        let roots = solve_cubic(1e-15, 1e-15, 0.0, 1.0);
        assert!(roots.iter().all(f64::is_finite));
    }
}
