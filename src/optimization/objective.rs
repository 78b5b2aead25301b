//! # Objective
//!
//! The `Objective` trait is the numeric function being optimized, and
//! `ObjectiveFunction` binds it to the search domain (`Bounds`) and the optimization
//! `Direction`. All algorithms evaluate positions exclusively through
//! `ObjectiveFunction`, which rejects failed or non-finite evaluations.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::optimization::{Direction, ObjectiveFunction};
//! use swarmopt::population::Bounds;
//!
//! let bounds = Bounds::new(vec![(-5.0, 5.0), (-5.0, 5.0)]).unwrap();
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let objective = ObjectiveFunction::new(sphere, bounds).with_direction(Direction::Minimize);
//!
//! assert_eq!(objective.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
//! assert!(objective.is_better(1.0, 5.0));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::{
    error::{OptimizationError, Result},
    population::Bounds,
};

/// A scalar function over positions.
///
/// Any closure `Fn(&[f64]) -> f64 + Send + Sync` is an `Objective`. Types wrapping a
/// fallible evaluator (an expression interpreter, for example) can override
/// [`Objective::try_value`] to report failures.
pub trait Objective: Send + Sync {
    /// Evaluates the function at `position`.
    fn value(&self, position: &[f64]) -> f64;

    /// Evaluates the function at `position`, reporting failures as an error message.
    fn try_value(&self, position: &[f64]) -> std::result::Result<f64, String> {
        Ok(self.value(position))
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn value(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// Whether smaller or larger objective values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

/// An objective bound to its search domain and optimization direction.
pub struct ObjectiveFunction<O: Objective> {
    objective: O,
    bounds: Bounds,
    direction: Direction,
    parallel_threshold: usize,
    evaluations: AtomicUsize,
}

impl<O: Objective> ObjectiveFunction<O> {
    /// Creates a minimizing objective over `bounds`.
    pub fn new(objective: O, bounds: Bounds) -> Self {
        Self {
            objective,
            bounds,
            direction: Direction::Minimize,
            parallel_threshold: 1000,
            evaluations: AtomicUsize::new(0),
        }
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the minimum batch size evaluated in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn dimensions(&self) -> usize {
        self.bounds.dimensions()
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Number of evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Evaluates a single position.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizationError::Evaluation`] if the position has the wrong number
    /// of coordinates, the objective reports a failure, or the value is NaN or infinite.
    pub fn evaluate(&self, position: &[f64]) -> Result<f64> {
        if position.len() != self.dimensions() {
            return Err(OptimizationError::Evaluation {
                position: position.to_vec(),
                reason: format!(
                    "expected {} coordinates, got {}",
                    self.dimensions(),
                    position.len()
                ),
            });
        }

        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let value = self
            .objective
            .try_value(position)
            .map_err(|reason| OptimizationError::Evaluation {
                position: position.to_vec(),
                reason,
            })?;

        if !value.is_finite() {
            return Err(OptimizationError::Evaluation {
                position: position.to_vec(),
                reason: format!("non-finite objective value {}", value),
            });
        }

        Ok(value)
    }

    /// Evaluates a batch of positions, returning values in the same order.
    ///
    /// Batches of at least `parallel_threshold` positions are evaluated with Rayon.
    /// Results are collected by index, so the outcome does not depend on scheduling.
    /// When several positions fail, the error for the lowest index is returned.
    pub fn evaluate_all(&self, positions: &[Vec<f64>]) -> Result<Vec<f64>> {
        if positions.len() >= self.parallel_threshold {
            let values: Vec<Result<f64>> = positions
                .par_iter()
                .map(|position| self.evaluate(position))
                .collect();
            values.into_iter().collect()
        } else {
            positions
                .iter()
                .map(|position| self.evaluate(position))
                .collect()
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self.direction {
            Direction::Minimize => candidate < incumbent,
            Direction::Maximize => candidate > incumbent,
        }
    }

    /// Maps an objective value to a cost where smaller is always better.
    pub fn cost(&self, value: f64) -> f64 {
        match self.direction {
            Direction::Minimize => value,
            Direction::Maximize => -value,
        }
    }
}

impl<O: Objective> fmt::Debug for ObjectiveFunction<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectiveFunction")
            .field("bounds", &self.bounds)
            .field("direction", &self.direction)
            .field("parallel_threshold", &self.parallel_threshold)
            .field("evaluations", &self.evaluations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Objective for Failing {
        fn value(&self, _position: &[f64]) -> f64 {
            f64::NAN
        }

        fn try_value(&self, _position: &[f64]) -> std::result::Result<f64, String> {
            Err("division by zero".to_string())
        }
    }

    fn square_bounds() -> Bounds {
        Bounds::new(vec![(-1.0, 1.0), (-1.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_closure_objective() {
        let objective = ObjectiveFunction::new(|x: &[f64]| x[0] - x[1], square_bounds());
        assert_eq!(objective.evaluate(&[0.5, 0.25]).unwrap(), 0.25);
        assert_eq!(objective.evaluations(), 1);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let objective = ObjectiveFunction::new(|_: &[f64]| f64::INFINITY, square_bounds());
        match objective.evaluate(&[0.0, 0.0]) {
            Err(OptimizationError::Evaluation { position, reason }) => {
                assert_eq!(position, vec![0.0, 0.0]);
                assert!(reason.contains("non-finite"));
            }
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }

    #[test]
    fn test_failing_objective_is_reported() {
        let objective = ObjectiveFunction::new(Failing, square_bounds());
        match objective.evaluate(&[0.1, 0.2]) {
            Err(OptimizationError::Evaluation { reason, .. }) => {
                assert_eq!(reason, "division by zero");
            }
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let objective = ObjectiveFunction::new(|x: &[f64]| x[0], square_bounds());
        assert!(objective.evaluate(&[0.0]).is_err());
        assert_eq!(objective.evaluations(), 0);
    }

    #[test]
    fn test_direction_comparisons() {
        let min = ObjectiveFunction::new(|x: &[f64]| x[0], square_bounds());
        assert!(min.is_better(1.0, 2.0));
        assert!(!min.is_better(2.0, 2.0));
        assert_eq!(min.cost(3.0), 3.0);

        let max = ObjectiveFunction::new(|x: &[f64]| x[0], square_bounds())
            .with_direction(Direction::Maximize);
        assert!(max.is_better(2.0, 1.0));
        assert!(!max.is_better(1.0, 1.0));
        assert_eq!(max.cost(3.0), -3.0);
    }

    #[test]
    fn test_parallel_and_sequential_batches_agree() {
        let positions: Vec<Vec<f64>> = (0..64)
            .map(|i| vec![i as f64 / 64.0, -(i as f64) / 64.0])
            .collect();
        let f = |x: &[f64]| x[0].sin() * x[1].cos();

        let sequential = ObjectiveFunction::new(f, square_bounds()).with_parallel_threshold(1000);
        let parallel = ObjectiveFunction::new(f, square_bounds()).with_parallel_threshold(1);

        assert_eq!(
            sequential.evaluate_all(&positions).unwrap(),
            parallel.evaluate_all(&positions).unwrap()
        );
        assert_eq!(parallel.evaluations(), 64);
    }

    #[test]
    fn test_batch_reports_lowest_failing_index() {
        let objective = ObjectiveFunction::new(
            |x: &[f64]| if x[0] > 0.0 { f64::NAN } else { x[0] },
            square_bounds(),
        )
        .with_parallel_threshold(1);
        let positions = vec![vec![-0.5, 0.0], vec![0.25, 0.0], vec![0.75, 0.0]];

        match objective.evaluate_all(&positions) {
            Err(OptimizationError::Evaluation { position, .. }) => {
                assert_eq!(position, vec![0.25, 0.0]);
            }
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }
}
