use crate::{
    error::{OptimizationError, Result},
    population::Bounds,
    strategy::{AlgorithmKind, AlgorithmParameters},
};

use super::{CancellationToken, Objective, OptimizationOptions, Optimizer};

/// Assembles an [`Optimizer`] step by step.
///
/// The objective and the algorithm are required. Bounds may be given explicitly or as
/// a dimension count, in which case every dimension spans `[-100, 100]`.
///
/// ```rust
/// use swarmopt::optimization::{OptimizationOptions, OptimizerBuilder};
/// use swarmopt::strategy::AlgorithmKind;
///
/// let optimizer = OptimizerBuilder::new()
///     .with_objective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>())
///     .with_dimensions(3)
///     .with_algorithm(AlgorithmKind::GreyWolf)
///     .with_options(OptimizationOptions::builder().seed(1).iterations(20).build())
///     .build()
///     .unwrap();
///
/// let result = optimizer.run().unwrap();
/// assert_eq!(result.best_position.len(), 3);
/// ```
pub struct OptimizerBuilder<O: Objective> {
    objective: Option<O>,
    bounds: Option<Bounds>,
    dimensions: Option<usize>,
    parameters: Option<AlgorithmParameters>,
    options: OptimizationOptions,
    initial_population: Option<Vec<Vec<f64>>>,
    cancellation: Option<CancellationToken>,
}

impl<O: Objective> OptimizerBuilder<O> {
    pub fn new() -> Self {
        Self {
            objective: None,
            bounds: None,
            dimensions: None,
            parameters: None,
            options: OptimizationOptions::default(),
            initial_population: None,
            cancellation: None,
        }
    }

    pub fn with_objective(mut self, objective: O) -> Self {
        self.objective = Some(objective);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Uses `[-100, 100]` for each of `dimensions` dimensions unless explicit bounds
    /// are given.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Selects an algorithm with its default parameters.
    pub fn with_algorithm(mut self, kind: AlgorithmKind) -> Self {
        self.parameters = Some(AlgorithmParameters::defaults(kind));
        self
    }

    /// Selects an algorithm through its parameters.
    pub fn with_parameters(mut self, parameters: AlgorithmParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_options(mut self, options: OptimizationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_initial_population(mut self, positions: Vec<Vec<f64>>) -> Self {
        self.initial_population = Some(positions);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn build(self) -> Result<Optimizer<O>> {
        let objective = self
            .objective
            .ok_or_else(|| OptimizationError::config("objective not specified"))?;

        let parameters = self
            .parameters
            .ok_or_else(|| OptimizationError::config("algorithm not specified"))?;

        let bounds = match (self.bounds, self.dimensions) {
            (Some(bounds), _) => bounds,
            (None, Some(dimensions)) => Bounds::default_for(dimensions)?,
            (None, None) => {
                return Err(OptimizationError::config(
                    "neither bounds nor dimensions specified",
                ))
            }
        };

        let mut optimizer = Optimizer::new(objective, bounds, parameters, self.options);
        if let Some(positions) = self.initial_population {
            optimizer = optimizer.with_initial_population(positions);
        }
        if let Some(token) = self.cancellation {
            optimizer = optimizer.with_cancellation(token);
        }
        Ok(optimizer)
    }
}

impl<O: Objective> Default for OptimizerBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_missing_pieces_are_configuration_errors() {
        let no_objective = OptimizerBuilder::<fn(&[f64]) -> f64>::new()
            .with_dimensions(2)
            .with_algorithm(AlgorithmKind::Firefly)
            .build();
        assert!(no_objective.unwrap_err().is_configuration());

        let no_algorithm = OptimizerBuilder::new()
            .with_objective(sphere)
            .with_dimensions(2)
            .build();
        assert!(no_algorithm.unwrap_err().is_configuration());

        let no_domain = OptimizerBuilder::new()
            .with_objective(sphere)
            .with_algorithm(AlgorithmKind::Firefly)
            .build();
        assert!(no_domain.unwrap_err().is_configuration());
    }

    #[test]
    fn test_dimensions_use_default_bounds() {
        let optimizer = OptimizerBuilder::new()
            .with_objective(sphere)
            .with_dimensions(4)
            .with_algorithm(AlgorithmKind::ShuffledFrogLeaping)
            .build()
            .unwrap();
        let bounds = optimizer.objective().bounds();
        assert_eq!(bounds.dimensions(), 4);
        assert!(bounds.ranges().iter().all(|&range| range == (-100.0, 100.0)));
    }

    #[test]
    fn test_explicit_bounds_win() {
        let optimizer = OptimizerBuilder::new()
            .with_objective(sphere)
            .with_dimensions(4)
            .with_bounds(Bounds::uniform(2, 0.0, 1.0).unwrap())
            .with_algorithm(AlgorithmKind::GreyWolf)
            .build()
            .unwrap();
        assert_eq!(optimizer.objective().dimensions(), 2);
    }
}
