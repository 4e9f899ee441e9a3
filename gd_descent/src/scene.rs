//! Everything a renderer needs to draw one run: the surface and the path over it.

use gd_core::{create, sample_surface, Domain, Point, Polynomial, SeparableSum, Surface};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, DemoConfig};
use crate::runner::{create_descent_path, DescentPath};

/// Axis labels handed to the renderer.
pub const AXIS_LABELS: [&str; 3] = ["x", "y", "z"];

/// A sampled surface `z = p(x) + q(y)` with a descent path on top of it.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub labels: [&'static str; 3],
    pub domain: Domain,
    pub poly_x: Polynomial,
    pub poly_y: Polynomial,
    pub surface: Surface,
    pub path: DescentPath,
}

impl Scene {
    /// Validate `config`, draw both polynomials, run descent and sample the surface.
    ///
    /// Random draws happen in a fixed order (p, then q, then the start point),
    /// so a seeded `rng` always yields the same scene.
    pub fn build<R: Rng + ?Sized>(config: &DemoConfig, rng: &mut R) -> Result<Scene, ConfigError> {
        let domain = config.validate()?;

        let poly_x = create(config.degree_x, &config.coefficients, rng);
        let poly_y = create(config.degree_y, &config.coefficients, rng);
        debug!(%poly_x, %poly_y, "created polynomials");

        let f = SeparableSum::new(poly_x.clone(), poly_y.clone());
        let path = create_descent_path(&f, &domain, config.learning_rate, config.steps, rng);
        let surface = sample_surface(&f, &domain, config.resolution);

        let (rows, cols) = surface.dimensions();
        info!(steps = config.steps, rows, cols, "scene built");

        Ok(Scene {
            labels: AXIS_LABELS,
            domain,
            poly_x,
            poly_y,
            surface,
            path,
        })
    }

    /// Lowest sampled grid point, for comparing against where descent ended.
    pub fn sampled_minimum(&self) -> Option<Point> {
        self.surface.min_point()
    }

    /// Pretty-printed JSON for an external plotter.
    ///
    /// JSON has no infinities or NaN, so non-finite values on a diverged path
    /// come out as `null` and the path cannot be read back. Check
    /// [`DescentPath::is_finite`] first when that matters.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
