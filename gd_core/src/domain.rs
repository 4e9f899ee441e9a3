//! Sampling and start-point domains.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum span a domain must exceed to be accepted by [`validate_domain`].
pub const DEFAULT_MIN_WIDTH: f64 = 1.0;

/// A raw domain endpoint as written by a user.
///
/// Integer and float endpoints are kept apart so that a mixed pair can be
/// rejected. In JSON, `-2` reads as [`Bound::Int`] and `-2.0` as
/// [`Bound::Float`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

impl Bound {
    pub fn as_f64(self) -> f64 {
        match self {
            Bound::Int(v) => v as f64,
            Bound::Float(v) => v,
        }
    }

    fn same_kind(self, other: Bound) -> bool {
        matches!(
            (self, other),
            (Bound::Int(_), Bound::Int(_)) | (Bound::Float(_), Bound::Float(_))
        )
    }
}

impl From<i64> for Bound {
    fn from(v: i64) -> Self {
        Bound::Int(v)
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Bound::Float(v)
    }
}

/// Reasons a domain is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("domain must have exactly 2 bounds, got {0}")]
    WrongArity(usize),
    #[error("domain bounds must both be integers or both be floats")]
    MixedTypes,
    #[error("domain bounds must be finite, got ({low}, {high})")]
    NonFinite { low: f64, high: f64 },
    #[error("domain must be strictly increasing, got ({low}, {high})")]
    NotIncreasing { low: f64, high: f64 },
    #[error("domain span {span} must exceed {min_width}")]
    TooNarrow { span: f64, min_width: f64 },
}

/// A validated interval `[low, high]` with `low < high`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Domain {
    low: f64,
    high: f64,
}

impl Domain {
    /// Checked constructor: both ends finite and strictly increasing.
    pub fn new(low: f64, high: f64) -> Result<Self, DomainError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(DomainError::NonFinite { low, high });
        }
        if low >= high {
            return Err(DomainError::NotIncreasing { low, high });
        }
        Ok(Domain { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    /// The smallest integer-aligned domain covering this one.
    pub fn widened(&self) -> Domain {
        Domain {
            low: self.low.floor(),
            high: self.high.ceil(),
        }
    }

    /// Draw `low + u * (high - low)` with `u` uniform in `[0, 1)`.
    ///
    /// The result always lies in `[low, high)`: a draw that rounds up to
    /// `high` is moved to the float just below it.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = rng.gen::<f64>();
        let span = self.span();
        let x = if span.is_finite() {
            self.low + u * span
        } else {
            // `high - low` overflowed; interpolate without forming the span.
            self.low * (1.0 - u) + self.high * u
        };
        if x < self.high {
            x.max(self.low)
        } else {
            next_below(self.high).max(self.low)
        }
    }
}

/// The largest `f64` strictly less than a finite `x`.
fn next_below(x: f64) -> f64 {
    if x == 0.0 {
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits - 1 } else { bits + 1 })
}

/// Validate raw bounds and build a [`Domain`].
///
/// Checks, in order: exactly two bounds, matching integer/float kind, finite
/// values, strictly increasing, and a span strictly greater than `min_width`.
pub fn validate_domain(bounds: &[Bound], min_width: f64) -> Result<Domain, DomainError> {
    let (low, high) = match *bounds {
        [low, high] => (low, high),
        _ => return Err(DomainError::WrongArity(bounds.len())),
    };

    if !low.same_kind(high) {
        return Err(DomainError::MixedTypes);
    }

    let domain = Domain::new(low.as_f64(), high.as_f64())?;

    let span = domain.span();
    if span <= min_width {
        return Err(DomainError::TooNarrow { span, min_width });
    }

    Ok(domain)
}
