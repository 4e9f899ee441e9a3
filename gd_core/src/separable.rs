//! Separable bivariate functions `f(x, y) = p(x) + q(y)`.

use serde::{Deserialize, Serialize};

use crate::polynomial::Polynomial;

/// A point on the surface `z = f(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// `p(x) + q(y)`. The variables never interact.
pub fn sum_bivariate(poly_x: &Polynomial, poly_y: &Polynomial, x: f64, y: f64) -> f64 {
    poly_x.evaluate(x) + poly_y.evaluate(y)
}

/// The function `f(x, y) = p(x) + q(y)` together with its partial derivatives.
#[derive(Clone, Debug)]
pub struct SeparableSum {
    poly_x: Polynomial,
    poly_y: Polynomial,
    // Derivatives are computed once; each partial depends on one variable only.
    d_poly_x: Polynomial,
    d_poly_y: Polynomial,
}

impl SeparableSum {
    pub fn new(poly_x: Polynomial, poly_y: Polynomial) -> Self {
        let d_poly_x = poly_x.derivative();
        let d_poly_y = poly_y.derivative();
        SeparableSum {
            poly_x,
            poly_y,
            d_poly_x,
            d_poly_y,
        }
    }

    pub fn poly_x(&self) -> &Polynomial {
        &self.poly_x
    }

    pub fn poly_y(&self) -> &Polynomial {
        &self.poly_y
    }

    pub fn value(&self, x: f64, y: f64) -> f64 {
        sum_bivariate(&self.poly_x, &self.poly_y, x, y)
    }

    /// `[∂f/∂x, ∂f/∂y] = [p'(x), q'(y)]`.
    pub fn gradient(&self, x: f64, y: f64) -> [f64; 2] {
        [self.d_poly_x.evaluate(x), self.d_poly_y.evaluate(y)]
    }

    pub fn point(&self, x: f64, y: f64) -> Point {
        Point {
            x,
            y,
            z: self.value(x, y),
        }
    }
}
