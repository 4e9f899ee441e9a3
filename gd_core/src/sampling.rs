//! Evaluating polynomials and separable sums over evenly spaced grids.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::Domain;
use crate::polynomial::Polynomial;
use crate::separable::{Point, SeparableSum};

/// `num` evenly spaced values from `start` to `stop`, both ends included.
///
/// `num == 1` yields `[start]` and `num == 0` yields an empty vector.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            // Pin the last sample so rounding in `step` never moves the endpoint.
            values[num - 1] = stop;
            values
        }
    }
}

/// Values of a single polynomial at evenly spaced points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveSamples {
    pub xs: Vec<f64>,
    pub values: Vec<f64>,
}

/// Sample `polynomial` at `probes + 1` points spanning `[low, high]`.
pub fn sample_polynomial(polynomial: &Polynomial, low: f64, high: f64, probes: usize) -> CurveSamples {
    let xs = linspace(low, high, probes + 1);
    let values = xs.iter().map(|&x| polynomial.evaluate(x)).collect();
    CurveSamples { xs, values }
}

/// How many samples each grid axis gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridResolution {
    /// Exactly `samples` points per axis over the domain as given.
    Fixed { samples: usize },
    /// The domain is widened to integer bounds and each unit gets
    /// `values_per_unit` intervals, i.e. `span * values_per_unit + 1` points.
    PerUnit { values_per_unit: usize },
}

impl Default for GridResolution {
    fn default() -> Self {
        GridResolution::PerUnit { values_per_unit: 10 }
    }
}

impl GridResolution {
    /// Number of samples [`axis`](Self::axis) produces over `domain`, or `None`
    /// if that count does not fit in a `usize`.
    pub fn samples_per_axis(&self, domain: &Domain) -> Option<usize> {
        match *self {
            GridResolution::Fixed { samples } => Some(samples),
            GridResolution::PerUnit { values_per_unit } => {
                let span = domain.widened().span().round();
                if span >= usize::MAX as f64 {
                    return None;
                }
                (span as usize).checked_mul(values_per_unit)?.checked_add(1)
            }
        }
    }

    /// Sample positions along one axis of `domain`.
    ///
    /// Empty when [`samples_per_axis`](Self::samples_per_axis) overflows;
    /// callers bound the count before sampling.
    pub fn axis(&self, domain: &Domain) -> Vec<f64> {
        let samples = self.samples_per_axis(domain).unwrap_or(0);
        match *self {
            GridResolution::Fixed { .. } => linspace(domain.low(), domain.high(), samples),
            GridResolution::PerUnit { .. } => {
                let widened = domain.widened();
                linspace(widened.low(), widened.high(), samples)
            }
        }
    }
}

/// A sampled surface in meshgrid layout: `z[i][j] = f(xs[j], ys[i])`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Surface {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}

impl Surface {
    /// `(rows, columns)`, i.e. `(ys.len(), xs.len())`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    /// The grid point with the smallest finite `z`, if any.
    pub fn min_point(&self) -> Option<Point> {
        let mut best: Option<Point> = None;
        for (i, row) in self.z.iter().enumerate() {
            for (j, &z) in row.iter().enumerate() {
                if !z.is_finite() {
                    continue;
                }
                if best.map_or(true, |b| z < b.z) {
                    best = Some(Point {
                        x: self.xs[j],
                        y: self.ys[i],
                        z,
                    });
                }
            }
        }
        best
    }
}

/// Evaluate `f` over a square grid covering `domain`.
pub fn sample_surface(f: &SeparableSum, domain: &Domain, resolution: GridResolution) -> Surface {
    let xs = resolution.axis(domain);
    let ys = xs.clone();
    trace!(samples_per_axis = xs.len(), "sampling surface");

    // Separable: every cell is p(x_j) + q(y_i), so each axis is evaluated once.
    let px: Vec<f64> = xs.iter().map(|&x| f.poly_x().evaluate(x)).collect();
    let z = ys
        .iter()
        .map(|&y| {
            let qy = f.poly_y().evaluate(y);
            px.iter().map(|&p| p + qy).collect()
        })
        .collect();

    Surface { xs, ys, z }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(10.0, 1.0, 4), vec![10.0, 7.0, 4.0, 1.0]);
        assert_eq!(linspace(-2.0, 2.0, 5), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(linspace(10.0, 1.0, 1), vec![10.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());

        let v = linspace(0.0, 0.3, 7);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[6], 0.3);
    }

    #[test]
    fn test_sample_polynomial_round_trip() {
        let p = Polynomial::new(vec![0.3, -1.7, 2.9, 0.1]);
        let samples = sample_polynomial(&p, -5.0, 5.0, 1000);

        assert_eq!(samples.xs.len(), 1001);
        assert_eq!(samples.values.len(), 1001);
        assert_eq!(samples.xs[0], -5.0);
        assert_eq!(samples.xs[1000], 5.0);
        for (x, v) in samples.xs.iter().zip(samples.values.iter()) {
            assert_eq!(p.evaluate(*x), *v);
        }
    }

    #[test]
    fn test_per_unit_axis_widens_domain() {
        let domain = Domain::new(-1.5, 1.2).unwrap();
        let axis = GridResolution::PerUnit { values_per_unit: 10 }.axis(&domain);
        // floor/ceil -> [-2, 2], 4 units * 10 + 1
        assert_eq!(axis.len(), 41);
        assert_eq!(axis[0], -2.0);
        assert_eq!(axis[40], 2.0);
        assert!((axis[1] - (-1.9)).abs() < 1e-12);
    }

    #[test]
    fn test_samples_per_axis() {
        let domain = Domain::new(-1.5, 1.2).unwrap();
        assert_eq!(GridResolution::PerUnit { values_per_unit: 10 }.samples_per_axis(&domain), Some(41));
        assert_eq!(GridResolution::Fixed { samples: 7 }.samples_per_axis(&domain), Some(7));
    }

    #[test]
    fn test_huge_domain_does_not_overflow() {
        let domain = Domain::new(-1e300, 1e300).unwrap();
        let resolution = GridResolution::PerUnit { values_per_unit: 10 };
        assert_eq!(resolution.samples_per_axis(&domain), None);
        assert!(resolution.axis(&domain).is_empty());

        // Fits in the span cast but not after multiplying by values_per_unit
        let domain = Domain::new(0.0, 1e19).unwrap();
        assert_eq!(resolution.samples_per_axis(&domain), None);
    }

    #[test]
    fn test_fixed_axis() {
        let domain = Domain::new(-2.0, 2.0).unwrap();
        let axis = GridResolution::Fixed { samples: 1001 }.axis(&domain);
        assert_eq!(axis.len(), 1001);
        assert!(axis[500].abs() < 1e-12);
    }

    #[test]
    fn test_sample_surface_matches_direct_evaluation() {
        let f = SeparableSum::new(
            Polynomial::new(vec![1.0, 0.0, -1.0]),
            Polynomial::new(vec![2.0, 1.0]),
        );
        let domain = Domain::new(-2.0, 2.0).unwrap();
        let surface = sample_surface(&f, &domain, GridResolution::PerUnit { values_per_unit: 2 });

        assert_eq!(surface.dimensions(), (9, 9));
        for (i, row) in surface.z.iter().enumerate() {
            assert_eq!(row.len(), 9);
            for (j, &z) in row.iter().enumerate() {
                assert_eq!(z, f.value(surface.xs[j], surface.ys[i]));
            }
        }
    }

    #[test]
    fn test_min_point() {
        // x^2 + y^2 has its minimum at the origin
        let f = SeparableSum::new(
            Polynomial::new(vec![1.0, 0.0, 0.0]),
            Polynomial::new(vec![1.0, 0.0, 0.0]),
        );
        let domain = Domain::new(-2.0, 2.0).unwrap();
        let surface = sample_surface(&f, &domain, GridResolution::Fixed { samples: 5 });
        let min = surface.min_point().unwrap();
        assert_eq!((min.x, min.y, min.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_min_point_empty_surface() {
        let surface = Surface {
            xs: vec![],
            ys: vec![],
            z: vec![],
        };
        assert!(surface.min_point().is_none());
    }
}
