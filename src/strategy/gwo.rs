//! # Grey Wolf Optimizer
//!
//! The three best wolves (alpha, beta, delta) lead the hunt. Every other wolf
//! computes one candidate per leader,
//!
//! ```text
//! A = a * (2 * r1 - 1)        C = initial_c * r2
//! D = |C * leader - x|        X_k = leader - A * D
//! ```
//!
//! and proposes the mean of the three candidates. `a` decays linearly from
//! `initial_a` at the first iteration to 0 at the end of the run. A wolf moves only
//! when its proposal is strictly better than its current position.

use tracing::trace;

use super::{GwoParameters, Schedule, Strategy};
use crate::{
    error::Result,
    optimization::{Objective, ObjectiveFunction},
    population::{Agent, Bounds, Population},
    rng::RandomNumberGenerator,
};

const PACK_LEADERS: usize = 3;

#[derive(Debug, Clone)]
pub struct GreyWolfOptimizer {
    params: GwoParameters,
}

impl GreyWolfOptimizer {
    pub fn new(params: GwoParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &GwoParameters {
        &self.params
    }

    /// The exploration coefficient for the given point of the run.
    pub fn coefficient_a(&self, schedule: Schedule) -> f64 {
        self.params.initial_a * (1.0 - schedule.progress())
    }

    fn hunt(
        &self,
        wolf: &[f64],
        leaders: &[&[f64]; PACK_LEADERS],
        a: f64,
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<f64> {
        let mut proposal = Vec::with_capacity(wolf.len());
        for (d, &x) in wolf.iter().enumerate() {
            let mut sum = 0.0;
            for leader in leaders {
                let r1 = rng.unit();
                let r2 = rng.unit();
                let big_a = a * (2.0 * r1 - 1.0);
                let big_c = self.params.initial_c * r2;
                let distance = (big_c * leader[d] - x).abs();
                sum += leader[d] - big_a * distance;
            }
            proposal.push(bounds.clamp_coordinate(d, sum / PACK_LEADERS as f64));
        }
        proposal
    }
}

impl Strategy for GreyWolfOptimizer {
    fn name(&self) -> &'static str {
        "GWO"
    }

    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize> {
        let ranking = population.ranking(objective);
        let leader_count = PACK_LEADERS.min(ranking.len());
        if leader_count == 0 {
            return population.best_index(objective);
        }

        // With fewer than three wolves the weakest available leader fills the gaps.
        let leader_at = |k: usize| ranking[k.min(leader_count - 1)];
        let leaders: [Vec<f64>; PACK_LEADERS] = [
            population.agents()[leader_at(0)].position().to_vec(),
            population.agents()[leader_at(1)].position().to_vec(),
            population.agents()[leader_at(2)].position().to_vec(),
        ];
        let leaders: [&[f64]; PACK_LEADERS] = [&leaders[0], &leaders[1], &leaders[2]];

        let a = self.coefficient_a(schedule);
        let omegas = &ranking[leader_count..];

        let mut proposals = Vec::with_capacity(omegas.len());
        for &index in omegas {
            let wolf = population.agents()[index].position();
            proposals.push(self.hunt(wolf, &leaders, a, objective.bounds(), rng));
        }
        let values = objective.evaluate_all(&proposals)?;

        let mut moved = 0usize;
        for ((&index, proposal), value) in omegas.iter().zip(proposals).zip(values) {
            if objective.is_better(value, population.agents()[index].fitness()) {
                population.replace(index, Agent::new(proposal, value));
                moved += 1;
            }
        }
        trace!(iteration = schedule.iteration, a, moved, "grey wolf hunt");

        population.best_index(objective)
    }
}
