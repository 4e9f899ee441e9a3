//! # gd_core - Polynomials and Surfaces for Gradient Descent
//!
//! This crate provides the numeric pieces behind a small gradient-descent
//! demonstration on separable functions f(x, y) = p(x) + q(y), where p and q are
//! independent single-variable polynomials.
//!
//! ## Overview
//!
//! A polynomial is a dense coefficient vector ordered from the highest power
//! down, so `[4, 2, 1]` is 4x² + 2x + 1. Evaluation uses Horner's rule and the
//! derivative is the usual power-rule transform. Because f is separable, its
//! gradient is just (p'(x), q'(y)).
//!
//! ## Quick Start
//!
//! ```
//! use gd_core::{differentiate, evaluate, Polynomial, SeparableSum};
//!
//! assert_eq!(evaluate(&[4.0, 2.0, 1.0], 2.0), 21.0);
//! assert_eq!(differentiate(&[4.0, 3.0, 2.0, 1.0]).coefficients(), &[12.0, 6.0, 2.0]);
//!
//! // f(x, y) = x^2 + (y^2 - 1)
//! let f = SeparableSum::new(
//!     Polynomial::new(vec![1.0, 0.0, 0.0]),
//!     Polynomial::new(vec![1.0, 0.0, -1.0]),
//! );
//! assert_eq!(f.value(1.0, 2.0), 4.0);
//! assert_eq!(f.gradient(1.0, 2.0), [2.0, 4.0]);
//! ```
//!
//! ## Architecture
//!
//! - **[`Polynomial`]** and [`CoefficientScheme`]: random creation, evaluation, differentiation.
//! - **[`SeparableSum`]**: the bivariate sum and its gradient.
//! - **[`Domain`]** and [`validate_domain`]: checked sampling intervals.
//! - **[`sample_surface`]**: grid evaluation for rendering.
//! - **[`finite_diff_grad`]**: numerical gradients for verification.
//!
//! ## Example: Seeded Random Polynomials
//!
//! ```
//! use gd_core::{create, CoefficientScheme};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let p = create(3, &CoefficientScheme::Integer { low: -5, high: 5 }, &mut rng);
//! assert_eq!(p.coefficients().len(), 4);
//! ```

pub mod domain;
pub mod finite_diff;
pub mod polynomial;
pub mod sampling;
pub mod separable;

pub use domain::{validate_domain, Bound, Domain, DomainError, DEFAULT_MIN_WIDTH};
pub use finite_diff::{finite_diff_derivative, finite_diff_grad, max_grad_error};
pub use polynomial::{create, differentiate, evaluate, CoefficientScheme, Polynomial};
pub use sampling::{linspace, sample_polynomial, sample_surface, CurveSamples, GridResolution, Surface};
pub use separable::{sum_bivariate, Point, SeparableSum};
