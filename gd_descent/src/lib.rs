//! # gd_descent - Fixed-Step Gradient Descent on Separable Surfaces
//!
//! Builds on `gd_core` to run plain gradient descent over f(x, y) = p(x) + q(y):
//!
//! - **Runner**: [`DescentRunner`], a Start / Stepping / Done state machine
//! - **Update rule**: [`FixedStep`] (`position -= rate * gradient`)
//! - **Configuration**: [`DemoConfig`], loadable from JSON
//! - **Scene**: [`Scene`], the surface grid plus path handed to a renderer
//!
//! ## Example: Descending a Paraboloid
//!
//! ```
//! use gd_core::{Polynomial, SeparableSum};
//! use gd_descent::DescentRunner;
//!
//! // f(x, y) = x^2 + y^2, gradient (2x, 2y)
//! let f = SeparableSum::new(
//!     Polynomial::new(vec![1.0, 0.0, 0.0]),
//!     Polynomial::new(vec![1.0, 0.0, 0.0]),
//! );
//!
//! let path = DescentRunner::from_start(&f, 0.25, 2, 2.0, -2.0).run();
//!
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.end().map(|p| (p.x, p.y)), Some((0.5, -0.5)));
//! ```
//!
//! ## Example: A Full Seeded Run
//!
//! ```
//! use gd_descent::{DemoConfig, Scene};
//!
//! let config = DemoConfig { seed: Some(3), ..DemoConfig::default() };
//! let mut rng = config.rng();
//! let scene = Scene::build(&config, &mut rng).unwrap();
//! assert_eq!(scene.path.len(), config.steps + 1);
//! ```

pub mod config;
pub mod optim;
pub mod runner;
pub mod scene;

// Re-exports for convenience
pub use config::{ConfigError, DemoConfig, DEFAULT_MAX_SAMPLES_PER_AXIS, DEFAULT_MAX_STEPS};
pub use optim::FixedStep;
pub use runner::{create_descent_path, DescentPath, DescentRunner, DescentState};
pub use scene::{Scene, AXIS_LABELS};
