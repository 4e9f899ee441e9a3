//! Plain fixed-step gradient descent update.

/// Fixed-step update rule: `position = position - rate * gradient`.
///
/// No momentum, no adaptation, no state between steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    /// Learning rate (the "gradient weight").
    pub rate: f64,
}

impl FixedStep {
    /// Create a new fixed-step rule.
    pub fn new(rate: f64) -> Self {
        FixedStep { rate }
    }

    /// Move `position` one step against `gradient`.
    pub fn apply(&self, position: [f64; 2], gradient: [f64; 2]) -> [f64; 2] {
        [
            position[0] - self.rate * gradient[0],
            position[1] - self.rate * gradient[1],
        ]
    }
}
