//! # Strategy
//!
//! The `Strategy` trait is the common iteration contract shared by every
//! metaheuristic: given the population, the objective and the run's random number
//! generator, apply one iteration of the update rule and report the current best
//! agent. Every strategy keeps positions inside the bounds and re-evaluates every
//! agent whose position changes.
//!
//! [`Algorithm`] is the closed set of strategies the driver can construct from
//! [`AlgorithmParameters`]; it dispatches to the selected variant.
pub mod abc;
pub mod afsa;
pub mod firefly;
pub mod gwo;
pub mod parameters;
pub mod sfla;

use std::fmt::Debug;

use crate::{
    error::Result,
    optimization::{Objective, ObjectiveFunction},
    population::{Bounds, Population},
    rng::RandomNumberGenerator,
};

pub use abc::ArtificialBeeColony;
pub use afsa::FishSwarm;
pub use firefly::FireflyAlgorithm;
pub use gwo::GreyWolfOptimizer;
pub use parameters::{
    AbcParameters, AfsaParameters, AlgorithmKind, AlgorithmParameters, FireflyParameters,
    GwoParameters, ParameterValue, SflaParameters, VisualRange,
};
pub use sfla::ShuffledFrogLeaping;

/// Position of the current iteration within the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Zero-based index of the iteration being executed.
    pub iteration: usize,
    /// Total number of iterations in the run.
    pub iterations: usize,
}

impl Schedule {
    pub fn new(iteration: usize, iterations: usize) -> Self {
        Self {
            iteration,
            iterations,
        }
    }

    /// Fraction of the run completed before this iteration, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.iteration as f64 / self.iterations as f64
    }
}

/// One iteration of a population-based metaheuristic.
pub trait Strategy: Debug + Send {
    /// Short algorithm name used in logs.
    fn name(&self) -> &'static str;

    /// Applies one iteration of the update rule to `population`.
    ///
    /// ## Parameters
    ///
    /// - `population`: The agents, updated in place. Its size never changes.
    /// - `objective`: Evaluates positions and defines the bounds and direction.
    /// - `rng`: The run's only source of randomness.
    /// - `schedule`: The iteration index and total iteration count.
    ///
    /// ## Returns
    ///
    /// The index of the best agent after the iteration.
    ///
    /// ## Errors
    ///
    /// Fails only if the objective rejects a position.
    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize>;
}

/// The strategy selected for a run.
#[derive(Debug, Clone)]
pub enum Algorithm {
    GreyWolf(GreyWolfOptimizer),
    Firefly(FireflyAlgorithm),
    BeeColony(ArtificialBeeColony),
    FishSwarm(FishSwarm),
    FrogLeaping(ShuffledFrogLeaping),
}

impl Algorithm {
    /// Validates `parameters` and constructs the matching strategy.
    pub fn from_parameters(
        parameters: &AlgorithmParameters,
        population_size: usize,
        dimensions: usize,
    ) -> Result<Self> {
        parameters.validate(population_size, dimensions)?;
        let algorithm = match parameters {
            AlgorithmParameters::Gwo(params) => {
                Algorithm::GreyWolf(GreyWolfOptimizer::new(params.clone()))
            }
            AlgorithmParameters::Firefly(params) => {
                Algorithm::Firefly(FireflyAlgorithm::new(params.clone()))
            }
            AlgorithmParameters::Abc(params) => Algorithm::BeeColony(ArtificialBeeColony::new(
                params,
                population_size,
                dimensions,
            )),
            AlgorithmParameters::Afsa(params) => Algorithm::FishSwarm(FishSwarm::new(params.clone())),
            AlgorithmParameters::Sfla(params) => {
                Algorithm::FrogLeaping(ShuffledFrogLeaping::new(params.clone()))
            }
        };
        Ok(algorithm)
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::GreyWolf(_) => AlgorithmKind::GreyWolf,
            Algorithm::Firefly(_) => AlgorithmKind::Firefly,
            Algorithm::BeeColony(_) => AlgorithmKind::ArtificialBeeColony,
            Algorithm::FishSwarm(_) => AlgorithmKind::FishSwarm,
            Algorithm::FrogLeaping(_) => AlgorithmKind::ShuffledFrogLeaping,
        }
    }
}

impl Strategy for Algorithm {
    fn name(&self) -> &'static str {
        self.kind().code()
    }

    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize> {
        match self {
            Algorithm::GreyWolf(strategy) => strategy.step(population, objective, rng, schedule),
            Algorithm::Firefly(strategy) => strategy.step(population, objective, rng, schedule),
            Algorithm::BeeColony(strategy) => strategy.step(population, objective, rng, schedule),
            Algorithm::FishSwarm(strategy) => strategy.step(population, objective, rng, schedule),
            Algorithm::FrogLeaping(strategy) => strategy.step(population, objective, rng, schedule),
        }
    }
}

/// Moves `from` towards `to` by `factor` in every dimension and clamps the result.
pub(crate) fn move_towards(from: &[f64], to: &[f64], factor: f64, bounds: &Bounds) -> Vec<f64> {
    from.iter()
        .zip(to)
        .enumerate()
        .map(|(d, (&x, &target))| bounds.clamp_coordinate(d, x + factor * (target - x)))
        .collect()
}
