//! The descent runner: a fixed number of gradient steps from a random start.

use gd_core::{Domain, Point, SeparableSum};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::optim::FixedStep;

/// Points reserved up front; longer paths grow as they go.
const PREALLOCATED_POINTS: usize = 4096;

/// Where a [`DescentRunner`] is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescentState {
    /// Nothing recorded yet.
    Start,
    /// Start point recorded and `completed` of the steps taken.
    Stepping { completed: usize },
    /// All steps taken.
    Done,
}

/// The visited points, start point first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescentPath {
    points: Vec<Point>,
}

impl DescentPath {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn end(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Whether every coordinate on the path is finite, i.e. it did not diverge.
    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a DescentPath {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Runs fixed-step gradient descent on a [`SeparableSum`].
///
/// There is no convergence check: the runner always takes exactly `steps`
/// steps, and a rate that is too large simply lets the path diverge.
pub struct DescentRunner<'a> {
    f: &'a SeparableSum,
    rule: FixedStep,
    steps: usize,
    state: DescentState,
    position: [f64; 2],
    points: Vec<Point>,
    diverged: bool,
}

impl<'a> DescentRunner<'a> {
    /// Runner starting at a point drawn uniformly from `domain` (x first, then y).
    pub fn new<R: Rng + ?Sized>(
        f: &'a SeparableSum,
        domain: &Domain,
        rate: f64,
        steps: usize,
        rng: &mut R,
    ) -> Self {
        let x0 = domain.sample(rng);
        let y0 = domain.sample(rng);
        Self::from_start(f, rate, steps, x0, y0)
    }

    /// Runner starting at `(x0, y0)`.
    pub fn from_start(f: &'a SeparableSum, rate: f64, steps: usize, x0: f64, y0: f64) -> Self {
        DescentRunner {
            f,
            rule: FixedStep::new(rate),
            steps,
            state: DescentState::Start,
            position: [x0, y0],
            points: Vec::with_capacity(steps.saturating_add(1).min(PREALLOCATED_POINTS)),
            diverged: false,
        }
    }

    pub fn state(&self) -> DescentState {
        self.state
    }

    /// Current `[x, y]`.
    pub fn position(&self) -> [f64; 2] {
        self.position
    }

    /// Advance by one transition and return the new state.
    ///
    /// From `Start` this records the start point; from `Stepping` it takes one
    /// gradient step; `Done` is terminal.
    pub fn step(&mut self) -> DescentState {
        self.state = match self.state {
            DescentState::Start => {
                self.record();
                if self.steps == 0 {
                    DescentState::Done
                } else {
                    DescentState::Stepping { completed: 0 }
                }
            }
            DescentState::Stepping { completed } => {
                let [x, y] = self.position;
                let gradient = self.f.gradient(x, y);
                self.position = self.rule.apply(self.position, gradient);
                let point = self.record();
                debug!(
                    step = completed + 1,
                    x = point.x,
                    y = point.y,
                    z = point.z,
                    grad_x = gradient[0],
                    grad_y = gradient[1],
                    "descent step"
                );

                if completed + 1 == self.steps {
                    DescentState::Done
                } else {
                    DescentState::Stepping {
                        completed: completed + 1,
                    }
                }
            }
            DescentState::Done => DescentState::Done,
        };
        self.state
    }

    /// Step until `Done` and return the recorded path.
    pub fn run(mut self) -> DescentPath {
        while self.step() != DescentState::Done {}
        DescentPath {
            points: self.points,
        }
    }

    fn record(&mut self) -> Point {
        let [x, y] = self.position;
        let point = self.f.point(x, y);
        if !self.diverged && !point.z.is_finite() {
            self.diverged = true;
            warn!(
                step = self.points.len(),
                rate = self.rule.rate,
                "descent path diverged; the learning rate is likely too large"
            );
        }
        self.points.push(point);
        point
    }
}

/// Run `steps` fixed-step descent iterations from a random start in `domain`.
///
/// The returned path has `steps + 1` points.
pub fn create_descent_path<R: Rng + ?Sized>(
    f: &SeparableSum,
    domain: &Domain,
    rate: f64,
    steps: usize,
    rng: &mut R,
) -> DescentPath {
    DescentRunner::new(f, domain, rate, steps, rng).run()
}
