use std::fmt;
use std::ops::ControlFlow;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use tracing::{debug, info};

use super::{
    options::{LogLevel, OptimizationOptions},
    Objective, ObjectiveFunction,
};
use crate::{
    error::{OptimizationError, Result},
    population::{Agent, Bounds, Population},
    rng::RandomNumberGenerator,
    strategy::{
        Algorithm, AlgorithmKind, AlgorithmParameters, ParameterValue, Schedule, Strategy,
    },
};

/// The outcome of a run.
///
/// Field names are part of the output contract consumed by reporting tools.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// The best position found.
    pub best_position: Vec<f64>,
    /// The objective value at `best_position`.
    pub best_value: f64,
    /// Elapsed wall-clock time in seconds.
    pub time: f64,
}

/// Snapshot handed to the observer after initialization and after every iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationReport<'a> {
    /// Completed iterations; 0 for the initial population.
    pub iteration: usize,
    pub agents: &'a [Agent],
    /// Best position seen so far in the run.
    pub best_position: &'a [f64],
    pub best_value: f64,
}

/// A thread-safe flag that stops a run before its next iteration.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Best-ever agent of a run. Only a strictly better candidate replaces it.
#[derive(Debug, Clone)]
struct BestRecord {
    position: Vec<f64>,
    value: f64,
}

impl BestRecord {
    fn from_agent(agent: &Agent) -> Self {
        Self {
            position: agent.position().to_vec(),
            value: agent.fitness(),
        }
    }

    fn offer<O: Objective>(&mut self, agent: &Agent, objective: &ObjectiveFunction<O>) -> bool {
        if objective.is_better(agent.fitness(), self.value) {
            self.position.clear();
            self.position.extend_from_slice(agent.position());
            self.value = agent.fitness();
            true
        } else {
            false
        }
    }
}

/// Runs one algorithm against one objective.
///
/// The optimizer validates its configuration when a run starts, seeds the random
/// number generator, initializes the population and then applies exactly
/// `iterations` steps of the selected algorithm, unless the observer or the
/// cancellation token stops it earlier. It tracks the best agent seen across the whole
/// run.
pub struct Optimizer<O: Objective> {
    objective: ObjectiveFunction<O>,
    parameters: AlgorithmParameters,
    options: OptimizationOptions,
    initial_population: Option<Vec<Vec<f64>>>,
    cancellation: Option<CancellationToken>,
}

impl<O: Objective> Optimizer<O> {
    /// Creates an optimizer. The objective takes its direction and parallel threshold
    /// from `options`.
    pub fn new(
        objective: O,
        bounds: Bounds,
        parameters: AlgorithmParameters,
        options: OptimizationOptions,
    ) -> Self {
        let objective = ObjectiveFunction::new(objective, bounds)
            .with_direction(options.get_direction())
            .with_parallel_threshold(options.get_parallel_threshold());
        Self {
            objective,
            parameters,
            options,
            initial_population: None,
            cancellation: None,
        }
    }

    /// Starts from the given positions instead of a random population.
    pub fn with_initial_population(mut self, positions: Vec<Vec<f64>>) -> Self {
        self.initial_population = Some(positions);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn objective(&self) -> &ObjectiveFunction<O> {
        &self.objective
    }

    pub fn parameters(&self) -> &AlgorithmParameters {
        &self.parameters
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Runs the optimization to completion.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` before any evaluation if the population size or
    /// iteration count is zero, the parameters are invalid, or the initial population
    /// does not match the configuration. Returns `Evaluation` if the objective fails.
    pub fn run(&self) -> Result<OptimizationResult> {
        self.run_with_observer(|_| ControlFlow::Continue(()))
    }

    /// Runs the optimization, calling `observer` after initialization and after every
    /// iteration. Returning `ControlFlow::Break` ends the run with the best result so far.
    pub fn run_with_observer<F>(&self, mut observer: F) -> Result<OptimizationResult>
    where
        F: FnMut(&IterationReport<'_>) -> ControlFlow<()>,
    {
        let started = Instant::now();
        let evaluations_before = self.objective.evaluations();
        let iterations = self.options.get_iterations();
        let population_size = self.options.get_population_size();

        if iterations == 0 {
            return Err(OptimizationError::config("iterations must be positive"));
        }
        if population_size == 0 {
            return Err(OptimizationError::config("population_size must be positive"));
        }
        let mut algorithm = Algorithm::from_parameters(
            &self.parameters,
            population_size,
            self.objective.dimensions(),
        )?;
        if let Some(positions) = &self.initial_population {
            if positions.len() != population_size {
                return Err(OptimizationError::config(format!(
                    "initial population has {} agents, population_size is {}",
                    positions.len(),
                    population_size
                )));
            }
        }

        let mut rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        let log_level = self.options.get_log_level();
        if log_level != LogLevel::None {
            info!(
                algorithm = algorithm.name(),
                seed = rng.seed(),
                population_size,
                iterations,
                dimensions = self.objective.dimensions(),
                "starting optimization"
            );
        }

        let mut population = match &self.initial_population {
            Some(positions) => Population::from_positions(&self.objective, positions.clone())?,
            None => Population::initialize(&self.objective, population_size, &mut rng)?,
        };
        let mut best = BestRecord::from_agent(population.best(&self.objective)?);

        let mut completed = 0;
        let mut flow = observer(&IterationReport {
            iteration: 0,
            agents: population.agents(),
            best_position: &best.position,
            best_value: best.value,
        });

        while flow.is_continue() && completed < iterations {
            if self.is_cancelled() {
                debug!(completed, "optimization cancelled");
                break;
            }

            let schedule = Schedule::new(completed, iterations);
            let leader = algorithm.step(&mut population, &self.objective, &mut rng, schedule)?;
            let improved = best.offer(&population.agents()[leader], &self.objective);
            completed += 1;

            if log_level == LogLevel::Verbose {
                debug!(
                    iteration = completed,
                    best_value = best.value,
                    population_best = population.agents()[leader].fitness(),
                    improved,
                    "iteration complete"
                );
            }

            flow = observer(&IterationReport {
                iteration: completed,
                agents: population.agents(),
                best_position: &best.position,
                best_value: best.value,
            });
        }

        let time = started.elapsed().as_secs_f64();
        if log_level != LogLevel::None {
            info!(
                algorithm = algorithm.name(),
                iterations = completed,
                best_value = best.value,
                evaluations = self.objective.evaluations() - evaluations_before,
                elapsed_secs = time,
                "optimization finished"
            );
        }

        Ok(OptimizationResult {
            best_position: best.position,
            best_value: best.value,
            time,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

impl<O: Objective> fmt::Debug for Optimizer<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimizer")
            .field("objective", &self.objective)
            .field("parameters", &self.parameters)
            .field("options", &self.options)
            .field("initial_population", &self.initial_population.as_ref().map(Vec::len))
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

/// Runs `algorithm` on `objective` in one call.
///
/// `algorithm` is one of `GWO`, `FA`, `ABC`, `AFSA` or `SFLA` (case-insensitive).
/// `parameters` are named algorithm parameters as accepted by
/// [`AlgorithmParameters::from_named`]; omitted ones take their defaults.
///
/// # Example
///
/// ```rust
/// use swarmopt::{benchmarks, optimization::optimize, strategy::ParameterValue};
///
/// let result = optimize(
///     "ABC",
///     benchmarks::sphere,
///     vec![(-5.0, 5.0), (-5.0, 5.0)],
///     20,
///     50,
///     42,
///     vec![("limit", ParameterValue::from(10usize))],
/// )
/// .unwrap();
///
/// assert_eq!(result.best_position.len(), 2);
/// assert!(result.best_value < 1.0);
/// ```
///
/// # Errors
///
/// Returns `InvalidConfiguration` for an unknown algorithm, invalid bounds, unknown or
/// malformed parameters, or a zero population size or iteration count.
pub fn optimize<O, I, K>(
    algorithm: &str,
    objective: O,
    bounds: Vec<(f64, f64)>,
    population_size: usize,
    iterations: usize,
    seed: u64,
    parameters: I,
) -> Result<OptimizationResult>
where
    O: Objective,
    I: IntoIterator<Item = (K, ParameterValue)>,
    K: AsRef<str>,
{
    let kind: AlgorithmKind = algorithm.parse()?;
    let bounds = Bounds::new(bounds)?;
    let parameters = AlgorithmParameters::from_named(kind, parameters)?;
    let options = OptimizationOptions::new(iterations, population_size, Some(seed));
    Optimizer::new(objective, bounds, parameters, options).run()
}
