//! Finite difference utilities for derivative verification.
//!
//! Numerical gradients used to cross-check the power-rule derivatives and the
//! steps taken by gradient descent.

use crate::polynomial::Polynomial;

/// `(g(h) - g(-h)) / 2h`, where `g` evaluates the function shifted by its argument.
fn central_difference(g: impl Fn(f64) -> f64, h: f64) -> f64 {
    (g(h) - g(-h)) / (2.0 * h)
}

/// Numerical gradient of `f` at `point`, one central difference per coordinate.
///
/// `eps` is the half-width of each difference; 1e-7 to 1e-5 works well for
/// the polynomials in this crate.
///
/// # Example
/// ```
/// use gd_core::{finite_diff_grad, Polynomial, SeparableSum};
///
/// // f(x, y) = x^2 + 3y
/// let f = SeparableSum::new(
///     Polynomial::new(vec![1.0, 0.0, 0.0]),
///     Polynomial::new(vec![3.0, 0.0]),
/// );
/// let grads = finite_diff_grad(|v: &[f64]| f.value(v[0], v[1]), &[2.0, 5.0], 1e-6);
///
/// assert!((grads[0] - 4.0).abs() < 1e-5); // df/dx = 2x at x=2
/// assert!((grads[1] - 3.0).abs() < 1e-5); // df/dy = 3
/// ```
pub fn finite_diff_grad<F>(f: F, point: &[f64], eps: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    (0..point.len())
        .map(|axis| {
            central_difference(
                |h| {
                    let mut shifted = point.to_vec();
                    shifted[axis] += h;
                    f(&shifted)
                },
                eps,
            )
        })
        .collect()
}

/// Central difference derivative of a single-variable polynomial at `x`.
pub fn finite_diff_derivative(polynomial: &Polynomial, x: f64, eps: f64) -> f64 {
    central_difference(|h| polynomial.evaluate(x + h), eps)
}

/// Largest absolute componentwise difference between two gradients.
///
/// # Panics
/// Panics if the gradients differ in length.
pub fn max_grad_error(analytic: &[f64], numeric: &[f64]) -> f64 {
    assert_eq!(analytic.len(), numeric.len(), "gradient lengths differ");
    analytic
        .iter()
        .zip(numeric)
        .fold(0.0, |worst, (a, n)| f64::max(worst, (a - n).abs()))
}
