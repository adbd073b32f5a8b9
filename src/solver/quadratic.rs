//! Closed-form complex quadratic solver.

use crate::error::{FaultError, Result};
use crate::phasor::Complex64;

use super::SINGULAR_TOLERANCE;

/// Solve `a·x² + b·x + c = 0` over the complex numbers.
///
/// Returns two roots, or one when `a` vanishes and the equation is linear.
/// Uses the cancellation-free form `q = -(b ± √Δ)/2`, `x₁ = q/a`, `x₂ = c/q`
/// with the sign chosen so that `|b ± √Δ|` is maximal.
pub fn solve_quadratic(a: Complex64, b: Complex64, c: Complex64) -> Result<Vec<Complex64>> {
    if a.norm() <= SINGULAR_TOLERANCE {
        if b.norm() <= SINGULAR_TOLERANCE {
            return Err(FaultError::singular(
                "quadratic degenerates to a constant equation",
            ));
        }
        return Ok(vec![-c / b]);
    }

    let mut sqrt_disc = (b * b - a * c * 4.0).sqrt();
    if (b.conj() * sqrt_disc).re < 0.0 {
        sqrt_disc = -sqrt_disc;
    }
    let q = -(b + sqrt_disc) / 2.0;

    if q.norm() <= SINGULAR_TOLERANCE {
        // b and c both vanish: double root at the origin
        return Ok(vec![Complex64::new(0.0, 0.0); 2]);
    }

    Ok(vec![q / a, c / q])
}

/// First root with a strictly positive real part.
///
/// A root with non-positive real part would mean a source with zero or
/// negative resistance.
pub fn select_physical_root(roots: &[Complex64]) -> Option<Complex64> {
    roots.iter().copied().find(|r| r.re > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contains(roots: &[Complex64], expected: Complex64) -> bool {
        roots.iter().any(|r| (r - expected).norm() < 1e-9)
    }

    #[test]
    fn test_real_roots() {
        // 3x² - x - 2 = (x - 1)(3x + 2)
        let roots = solve_quadratic(
            Complex64::new(3.0, 0.0),
            Complex64::new(-1.0, 0.0),
            Complex64::new(-2.0, 0.0),
        )
        .unwrap();
        assert_eq!(roots.len(), 2);
        assert!(contains(&roots, Complex64::new(1.0, 0.0)));
        assert!(contains(&roots, Complex64::new(-2.0 / 3.0, 0.0)));
    }

    #[test]
    fn test_complex_roots() {
        // (x - (2 + i))(x - (-3 + 0.5i)) = x² + (1 - 1.5i)x + (-6.5 - 2i)
        let roots = solve_quadratic(
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, -1.5),
            Complex64::new(-6.5, -2.0),
        )
        .unwrap();
        assert!(contains(&roots, Complex64::new(2.0, 1.0)));
        assert!(contains(&roots, Complex64::new(-3.0, 0.5)));
    }

    #[test]
    fn test_conjugate_pair() {
        // x² + 1 = 0
        let roots = solve_quadratic(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
        .unwrap();
        assert!(contains(&roots, Complex64::new(0.0, 1.0)));
        assert!(contains(&roots, Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_linear_fallback() {
        let roots = solve_quadratic(
            Complex64::new(0.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(-4.0, 0.0),
        )
        .unwrap();
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0].re, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_equation_is_singular() {
        let zero = Complex64::new(0.0, 0.0);
        assert!(matches!(
            solve_quadratic(zero, zero, Complex64::new(1.0, 0.0)),
            Err(FaultError::SingularNetwork { .. })
        ));
    }

    #[test]
    fn test_select_positive_root() {
        let roots = [Complex64::new(-3.0, 0.5), Complex64::new(2.0, 1.0)];
        assert_eq!(select_physical_root(&roots), Some(Complex64::new(2.0, 1.0)));
    }

    #[test]
    fn test_select_none_when_all_non_positive() {
        let roots = [Complex64::new(-3.0, 0.5), Complex64::new(0.0, 1.0)];
        assert_eq!(select_physical_root(&roots), None);
    }
}
