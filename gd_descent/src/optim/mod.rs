//! Update rules for descent.

mod fixed_step;

pub use fixed_step::FixedStep;
