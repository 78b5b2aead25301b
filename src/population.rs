//! # Population
//!
//! Search-domain and candidate-solution types shared by every algorithm:
//!
//! - [`Bounds`]: one `(lower, upper)` interval per dimension, validated on construction.
//! - [`Agent`]: a position together with its objective value. The value is set only
//!   together with the position, so it is never stale.
//! - [`Population`]: a fixed-size, index-addressed sequence of agents.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::optimization::ObjectiveFunction;
//! use swarmopt::population::{Bounds, Population};
//! use swarmopt::rng::RandomNumberGenerator;
//!
//! let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
//! let objective = ObjectiveFunction::new(|x: &[f64]| x.iter().sum::<f64>(), bounds);
//! let mut rng = RandomNumberGenerator::from_seed(5);
//!
//! let population = Population::initialize(&objective, 10, &mut rng).unwrap();
//! assert_eq!(population.len(), 10);
//! assert!(population.iter().all(|agent| objective.bounds().contains(agent.position())));
//! ```

use crate::{
    error::{OptimizationError, OptionExt, Result},
    optimization::{Objective, ObjectiveFunction},
    rng::RandomNumberGenerator,
};

/// Axis-aligned box constraints, one interval per dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    ranges: Vec<(f64, f64)>,
}

impl Bounds {
    /// Creates bounds from `(lower, upper)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if there are no dimensions, or if any pair is
    /// non-finite or has `lower >= upper`. The message names the bound index.
    pub fn new(ranges: Vec<(f64, f64)>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(OptimizationError::config(
                "bounds must contain at least one dimension",
            ));
        }

        for (index, &(lower, upper)) in ranges.iter().enumerate() {
            if !lower.is_finite() || !upper.is_finite() {
                return Err(OptimizationError::config(format!(
                    "bound {} is not finite: [{}, {}]",
                    index, lower, upper
                )));
            }
            if lower >= upper {
                return Err(OptimizationError::config(format!(
                    "bound {} has lower >= upper: [{}, {}]",
                    index, lower, upper
                )));
            }
        }

        Ok(Self { ranges })
    }

    /// Creates bounds with the same interval in every dimension.
    pub fn uniform(dimensions: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(vec![(lower, upper); dimensions])
    }

    /// The fallback domain used when no bounds are given: `[-100, 100]` per dimension.
    pub fn default_for(dimensions: usize) -> Result<Self> {
        Self::uniform(dimensions, -100.0, 100.0)
    }

    pub fn dimensions(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.ranges
    }

    pub fn lower(&self, dimension: usize) -> f64 {
        self.ranges[dimension].0
    }

    pub fn upper(&self, dimension: usize) -> f64 {
        self.ranges[dimension].1
    }

    pub fn span(&self, dimension: usize) -> f64 {
        let (lower, upper) = self.ranges[dimension];
        upper - lower
    }

    /// The span of the widest dimension.
    pub fn widest_span(&self) -> f64 {
        (0..self.dimensions())
            .map(|d| self.span(d))
            .fold(0.0, f64::max)
    }

    /// Clamps a single coordinate into its dimension's interval.
    pub fn clamp_coordinate(&self, dimension: usize, value: f64) -> f64 {
        let (lower, upper) = self.ranges[dimension];
        value.clamp(lower, upper)
    }

    /// Clamps every coordinate of `position` in place.
    pub fn clamp(&self, position: &mut [f64]) {
        for (value, &(lower, upper)) in position.iter_mut().zip(&self.ranges) {
            *value = value.clamp(lower, upper);
        }
    }

    /// Returns `true` if `position` has the right length and lies within the box.
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimensions()
            && position
                .iter()
                .zip(&self.ranges)
                .all(|(&value, &(lower, upper))| value >= lower && value <= upper)
    }

    /// Draws a position uniformly from the box, one draw per dimension in order.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        rng.fetch_uniform(0.0, 1.0, self.dimensions())
            .into_iter()
            .zip(&self.ranges)
            .map(|(u, &(lower, upper))| (lower + u * (upper - lower)).clamp(lower, upper))
            .collect()
    }
}

/// One candidate solution: a position and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Vec<f64>,
    fitness: f64,
}

impl Agent {
    pub(crate) fn new(position: Vec<f64>, fitness: f64) -> Self {
        Self { position, fitness }
    }

    /// Evaluates `position` and wraps it as an agent.
    pub fn evaluated<O: Objective>(
        position: Vec<f64>,
        objective: &ObjectiveFunction<O>,
    ) -> Result<Self> {
        let fitness = objective.evaluate(&position)?;
        Ok(Self { position, fitness })
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn into_position(self) -> Vec<f64> {
        self.position
    }
}

/// A fixed-size ordered collection of agents.
///
/// The size is set at construction and never changes; algorithms replace agents
/// in place by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Creates `size` agents with positions drawn uniformly within the objective's
    /// bounds, then evaluates them as one batch.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `size` is zero, or an evaluation error if
    /// the objective rejects an initial position.
    pub fn initialize<O: Objective>(
        objective: &ObjectiveFunction<O>,
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if size == 0 {
            return Err(OptimizationError::config("population_size must be positive"));
        }

        let positions: Vec<Vec<f64>> = (0..size)
            .map(|_| objective.bounds().sample(rng))
            .collect();
        Self::evaluate_positions(objective, positions)
    }

    /// Builds a population from caller-supplied positions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if there are no positions, or if a position has
    /// the wrong dimension count or lies outside the bounds; the message names the
    /// agent index.
    pub fn from_positions<O: Objective>(
        objective: &ObjectiveFunction<O>,
        positions: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if positions.is_empty() {
            return Err(OptimizationError::config(
                "initial population must not be empty",
            ));
        }

        let bounds = objective.bounds();
        for (index, position) in positions.iter().enumerate() {
            if position.len() != bounds.dimensions() {
                return Err(OptimizationError::config(format!(
                    "initial agent {} has {} coordinates, bounds have {} dimensions",
                    index,
                    position.len(),
                    bounds.dimensions()
                )));
            }
            if !bounds.contains(position) {
                return Err(OptimizationError::config(format!(
                    "initial agent {} lies outside the bounds: {:?}",
                    index, position
                )));
            }
        }

        Self::evaluate_positions(objective, positions)
    }

    fn evaluate_positions<O: Objective>(
        objective: &ObjectiveFunction<O>,
        positions: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let values = objective.evaluate_all(&positions)?;
        let agents = positions
            .into_iter()
            .zip(values)
            .map(|(position, fitness)| Agent::new(position, fitness))
            .collect();
        Ok(Self { agents })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    /// Replaces the agent at `index`.
    pub(crate) fn replace(&mut self, index: usize, agent: Agent) {
        self.agents[index] = agent;
    }

    /// Copies every position, in index order.
    pub fn positions(&self) -> Vec<Vec<f64>> {
        self.agents.iter().map(|agent| agent.position.clone()).collect()
    }

    /// Copies every objective value, in index order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.agents.iter().map(|agent| agent.fitness).collect()
    }

    /// Index of the best agent. Ties resolve to the lowest index.
    pub fn best_index<O: Objective>(&self, objective: &ObjectiveFunction<O>) -> Result<usize> {
        let mut best: Option<usize> = None;
        for (index, agent) in self.agents.iter().enumerate() {
            match best {
                Some(current) if !objective.is_better(agent.fitness, self.agents[current].fitness) => {}
                _ => best = Some(index),
            }
        }
        best.ok_or_else_opt(|| OptimizationError::EmptyPopulation)
    }

    /// The best agent. Ties resolve to the lowest index.
    pub fn best<O: Objective>(&self, objective: &ObjectiveFunction<O>) -> Result<&Agent> {
        let index = self.best_index(objective)?;
        Ok(&self.agents[index])
    }

    /// Agent indices ordered from best to worst. The sort is stable, so agents with
    /// equal values keep their index order.
    pub fn ranking<O: Objective>(&self, objective: &ObjectiveFunction<O>) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.agents.len()).collect();
        order.sort_by(|&a, &b| {
            objective
                .cost(self.agents[a].fitness)
                .total_cmp(&objective.cost(self.agents[b].fitness))
        });
        order
    }

    /// Rearranges agents so that position `k` holds the agent previously at `order[k]`.
    ///
    /// `order` must be a permutation of `0..len`.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.agents.len());
        let reordered: Vec<Agent> = order.iter().map(|&index| self.agents[index].clone()).collect();
        self.agents = reordered;
    }
}
