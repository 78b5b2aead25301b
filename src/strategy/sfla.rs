//! # Shuffled Frog Leaping Algorithm
//!
//! Frogs are ranked and dealt round-robin into `subpopulations_count` memeplexes, so
//! memeplex sizes differ by at most one. Each memeplex runs `i_max` local iterations
//! in which its worst frog leaps:
//!
//! 1. towards the memeplex's best frog, or, if that does not improve it,
//! 2. towards the global best frog, or, if that fails too,
//! 3. to a uniformly random position.
//!
//! Afterwards the memeplexes are concatenated back into one population.

use tracing::trace;

use super::{move_towards, Schedule, SflaParameters, Strategy};
use crate::{
    error::Result,
    optimization::{Objective, ObjectiveFunction},
    population::{Agent, Population},
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone)]
pub struct ShuffledFrogLeaping {
    params: SflaParameters,
}

impl ShuffledFrogLeaping {
    pub fn new(params: SflaParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &SflaParameters {
        &self.params
    }

    /// Returns `(best, worst)` positions within `memeplex`. Ties favour the earlier
    /// frog for best and the later one for worst.
    fn extremes<O: Objective>(
        population: &Population,
        memeplex: &[usize],
        objective: &ObjectiveFunction<O>,
    ) -> (usize, usize) {
        let agents = population.agents();
        let mut best = memeplex[0];
        let mut worst = memeplex[0];
        for &frog in &memeplex[1..] {
            if objective.is_better(agents[frog].fitness(), agents[best].fitness()) {
                best = frog;
            }
            if !objective.is_better(agents[frog].fitness(), agents[worst].fitness()) {
                worst = frog;
            }
        }
        (best, worst)
    }

    fn leap<O: Objective>(
        population: &Population,
        worst: usize,
        targets: [&[f64]; 2],
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Option<Agent>> {
        let frog = &population.agents()[worst];
        for target in targets {
            let candidate = move_towards(frog.position(), target, rng.unit(), objective.bounds());
            let value = objective.evaluate(&candidate)?;
            if objective.is_better(value, frog.fitness()) {
                return Ok(Some(Agent::new(candidate, value)));
            }
        }
        Ok(None)
    }
}

/// Deals `ranking` round-robin into `count` memeplexes.
pub(crate) fn partition(ranking: &[usize], count: usize) -> Vec<Vec<usize>> {
    let count = count.clamp(1, ranking.len().max(1));
    (0..count)
        .map(|k| ranking.iter().skip(k).step_by(count).copied().collect())
        .collect()
}

impl Strategy for ShuffledFrogLeaping {
    fn name(&self) -> &'static str {
        "SFLA"
    }

    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize> {
        let ranking = population.ranking(objective);
        let memeplexes = partition(&ranking, self.params.subpopulations_count);
        let mut global_best = population.best(objective)?.clone();
        let mut resets = 0usize;

        for memeplex in memeplexes.iter().filter(|memeplex| memeplex.len() > 1) {
            for _ in 0..self.params.i_max {
                let (best, worst) = Self::extremes(population, memeplex, objective);
                if best == worst {
                    break;
                }

                let local_best = population.agents()[best].position().to_vec();
                let targets = [local_best.as_slice(), global_best.position()];
                let frog = match Self::leap(population, worst, targets, objective, rng)? {
                    Some(frog) => frog,
                    None => {
                        resets += 1;
                        Agent::evaluated(objective.bounds().sample(rng), objective)?
                    }
                };

                if objective.is_better(frog.fitness(), global_best.fitness()) {
                    global_best = frog.clone();
                }
                population.replace(worst, frog);
            }
        }

        population.reorder(&memeplexes.concat());
        trace!(
            iteration = schedule.iteration,
            memeplexes = memeplexes.len(),
            resets,
            "memeplexes shuffled"
        );

        population.best_index(objective)
    }
}
