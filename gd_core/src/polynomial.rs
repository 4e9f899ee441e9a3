//! Single-variable polynomials stored as dense coefficient vectors.
//!
//! Coefficients are ordered from the highest power down: index `i` holds the
//! coefficient of `x^(degree - i)` and the last entry is the constant term.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sampling::linspace;

/// How [`create`] draws random coefficients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoefficientScheme {
    /// `uniform[0, 1) * w_i` where `w` falls linearly from `max_weight` to
    /// `min_weight`, so higher-degree terms get the larger scale.
    Weighted { max_weight: f64, min_weight: f64 },
    /// Like [`CoefficientScheme::Weighted`], plus a linearly falling additive
    /// term from `max_offset` to `min_offset`.
    WeightedWithOffset {
        max_weight: f64,
        min_weight: f64,
        max_offset: f64,
        min_offset: f64,
    },
    /// Uniform integers in `[low, high)`.
    Integer { low: i64, high: i64 },
}

impl Default for CoefficientScheme {
    fn default() -> Self {
        CoefficientScheme::Weighted {
            max_weight: 10.0,
            min_weight: 1.0,
        }
    }
}

/// A polynomial in one variable with `f64` coefficients.
///
/// Always holds at least one coefficient; an empty list becomes the zero
/// polynomial `[0]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Build a polynomial from coefficients, highest power first.
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Polynomial::zero();
        }
        Polynomial { coefficients }
    }

    /// The constant polynomial `0`.
    pub fn zero() -> Self {
        Polynomial {
            coefficients: vec![0.0],
        }
    }

    /// Draw a random polynomial of the given degree. See [`create`].
    pub fn random<R: Rng + ?Sized>(degree: usize, scheme: &CoefficientScheme, rng: &mut R) -> Self {
        create(degree, scheme, rng)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Number of coefficients minus one.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Value at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate(&self.coefficients, x)
    }

    /// First derivative, via the power rule.
    pub fn derivative(&self) -> Polynomial {
        differentiate(&self.coefficients)
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Polynomial::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(p: Polynomial) -> Self {
        p.coefficients
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.degree();
        let mut wrote_term = false;

        for (i, &c) in self.coefficients.iter().enumerate() {
            if c == 0.0 {
                continue;
            }

            let magnitude = if wrote_term { c.abs() } else { c };
            if wrote_term {
                f.write_str(if c < 0.0 { " - " } else { " + " })?;
            }
            match f.precision() {
                Some(p) => write!(f, "{:.*}", p, magnitude)?,
                None => write!(f, "{}", magnitude)?,
            }

            match degree - i {
                0 => {}
                1 => f.write_str("x")?,
                power => write!(f, "x^{}", power)?,
            }
            wrote_term = true;
        }

        if !wrote_term {
            f.write_str("0")?;
        }
        Ok(())
    }
}

/// Create a random polynomial of `degree`, i.e. `degree + 1` coefficients.
///
/// # Panics
/// Panics if `scheme` is [`CoefficientScheme::Integer`] with `low >= high`.
pub fn create<R: Rng + ?Sized>(degree: usize, scheme: &CoefficientScheme, rng: &mut R) -> Polynomial {
    let size = degree + 1;

    let coefficients = match *scheme {
        CoefficientScheme::Weighted {
            max_weight,
            min_weight,
        } => linspace(max_weight, min_weight, size)
            .into_iter()
            .map(|w| rng.gen::<f64>() * w)
            .collect(),
        CoefficientScheme::WeightedWithOffset {
            max_weight,
            min_weight,
            max_offset,
            min_offset,
        } => linspace(max_weight, min_weight, size)
            .into_iter()
            .zip(linspace(max_offset, min_offset, size))
            .map(|(w, offset)| rng.gen::<f64>() * w + offset)
            .collect(),
        CoefficientScheme::Integer { low, high } => {
            assert!(low < high, "empty coefficient range [{}, {})", low, high);
            (0..size).map(|_| rng.gen_range(low..high) as f64).collect()
        }
    };

    Polynomial { coefficients }
}

/// Evaluate `Σ c_i · x^(degree - i)` using Horner's rule.
///
/// An empty slice evaluates to `0`.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Power-rule derivative: coefficient `i` becomes `c_i · (degree - i)` and
/// the constant term is dropped.
///
/// Inputs with fewer than two coefficients (constants and the empty slice)
/// differentiate to `[0]`.
pub fn differentiate(coefficients: &[f64]) -> Polynomial {
    if coefficients.len() < 2 {
        return Polynomial::zero();
    }

    let degree = coefficients.len() - 1;
    let derived = coefficients[..degree]
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (degree - i) as f64)
        .collect();

    Polynomial {
        coefficients: derived,
    }
}
