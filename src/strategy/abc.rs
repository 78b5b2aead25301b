//! # Artificial Bee Colony
//!
//! Every population slot is a food source with a stagnation counter.
//!
//! - Employed bees visit every source once and try a neighbouring solution that
//!   changes one random dimension relative to a random partner.
//! - Onlooker bees perform `forager_size` further trials on sources chosen by
//!   roulette, favouring sources with lower cost.
//! - Scouts abandon every source whose counter has reached `limit` and replace it with
//!   a uniformly random position, resetting the counter.
//!
//! A successful trial replaces the source and resets its counter; a failed one
//! increments it.

use tracing::debug;

use super::{AbcParameters, Schedule, Strategy};
use crate::{
    error::Result,
    optimization::{Objective, ObjectiveFunction},
    population::{Agent, Bounds, Population},
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone)]
pub struct ArtificialBeeColony {
    limit: usize,
    onlookers: usize,
    trials: Vec<usize>,
}

impl ArtificialBeeColony {
    pub fn new(params: &AbcParameters, population_size: usize, dimensions: usize) -> Self {
        Self {
            limit: params.resolved_limit(population_size, dimensions),
            onlookers: params.resolved_forager_size(population_size),
            trials: vec![0; population_size],
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn onlookers(&self) -> usize {
        self.onlookers
    }

    /// Consecutive failed trials per food source.
    pub fn trials(&self) -> &[usize] {
        &self.trials
    }

    fn neighbour(
        source: &[f64],
        partner: &[f64],
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<f64> {
        let mut candidate = source.to_vec();
        let d = rng.uniform_int(0, source.len());
        let phi = rng.symmetric();
        candidate[d] = bounds.clamp_coordinate(d, source[d] + phi * (source[d] - partner[d]));
        candidate
    }

    fn record<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        index: usize,
        candidate: Vec<f64>,
        value: f64,
    ) -> bool {
        if objective.is_better(value, population.agents()[index].fitness()) {
            population.replace(index, Agent::new(candidate, value));
            self.trials[index] = 0;
            true
        } else {
            self.trials[index] += 1;
            false
        }
    }

    fn employed_phase<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let n = population.len();
        let mut candidates = Vec::with_capacity(n);
        for i in 0..n {
            let k = rng.index_except(n, i);
            let agents = population.agents();
            candidates.push(Self::neighbour(
                agents[i].position(),
                agents[k].position(),
                objective.bounds(),
                rng,
            ));
        }

        let values = objective.evaluate_all(&candidates)?;
        for (i, (candidate, value)) in candidates.into_iter().zip(values).enumerate() {
            self.record(population, objective, i, candidate, value);
        }
        Ok(())
    }

    fn onlooker_phase<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let n = population.len();
        let mut weights: Vec<f64> = population
            .iter()
            .map(|agent| selection_weight(objective.cost(agent.fitness())))
            .collect();

        for _ in 0..self.onlookers {
            let j = roulette(&weights, rng.unit());
            let k = rng.index_except(n, j);
            let agents = population.agents();
            let candidate = Self::neighbour(
                agents[j].position(),
                agents[k].position(),
                objective.bounds(),
                rng,
            );
            let value = objective.evaluate(&candidate)?;
            if self.record(population, objective, j, candidate, value) {
                weights[j] = selection_weight(objective.cost(value));
            }
        }
        Ok(())
    }

    fn scout_phase<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<()> {
        let abandoned: Vec<usize> = (0..population.len())
            .filter(|&i| self.trials[i] >= self.limit)
            .collect();
        if abandoned.is_empty() {
            return Ok(());
        }

        let positions: Vec<Vec<f64>> = abandoned
            .iter()
            .map(|_| objective.bounds().sample(rng))
            .collect();
        let values = objective.evaluate_all(&positions)?;
        for ((&i, position), value) in abandoned.iter().zip(positions).zip(values) {
            population.replace(i, Agent::new(position, value));
            self.trials[i] = 0;
        }
        debug!(
            iteration = schedule.iteration,
            abandoned = abandoned.len(),
            "scouts replaced exhausted food sources"
        );
        Ok(())
    }
}

/// Roulette weight of a food source. Always positive, larger for lower cost.
pub(crate) fn selection_weight(cost: f64) -> f64 {
    if cost >= 0.0 {
        1.0 / (1.0 + cost)
    } else {
        1.0 + cost.abs()
    }
}

/// Picks the first index whose cumulative weight exceeds `fraction` of the total.
pub(crate) fn roulette(weights: &[f64], fraction: f64) -> usize {
    let total: f64 = weights.iter().sum();
    let threshold = fraction * total;
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > threshold {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}

impl Strategy for ArtificialBeeColony {
    fn name(&self) -> &'static str {
        "ABC"
    }

    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize> {
        if self.trials.len() != population.len() {
            self.trials = vec![0; population.len()];
        }

        self.employed_phase(population, objective, rng)?;
        self.onlooker_phase(population, objective, rng)?;
        self.scout_phase(population, objective, rng, schedule)?;

        population.best_index(objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colony(limit: usize, population_size: usize) -> ArtificialBeeColony {
        let params = AbcParameters {
            limit: Some(limit),
            forager_size: None,
        };
        ArtificialBeeColony::new(&params, population_size, 2)
    }

    #[test]
    fn test_defaults_resolved_from_population() {
        let abc = ArtificialBeeColony::new(&AbcParameters::default(), 100, 2);
        assert_eq!(abc.limit(), 100);
        assert_eq!(abc.onlookers(), 50);
        assert_eq!(abc.trials().len(), 100);
    }

    #[test]
    fn test_selection_weight() {
        assert_eq!(selection_weight(0.0), 1.0);
        assert_eq!(selection_weight(3.0), 0.25);
        assert_eq!(selection_weight(-2.0), 3.0);
        assert!(selection_weight(1e300) > 0.0);
    }

    #[test]
    fn test_roulette_cumulative_choice() {
        let weights = [1.0, 2.0, 1.0];
        assert_eq!(roulette(&weights, 0.0), 0);
        assert_eq!(roulette(&weights, 0.2), 0);
        assert_eq!(roulette(&weights, 0.25), 1);
        assert_eq!(roulette(&weights, 0.74), 1);
        assert_eq!(roulette(&weights, 0.8), 2);
        assert_eq!(roulette(&weights, 1.0), 2);
    }

    #[test]
    fn test_stagnant_sources_are_reinitialized() {
        let objective = ObjectiveFunction::new(|_: &[f64]| 1.0, Bounds::uniform(2, 0.0, 1.0).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut population = Population::initialize(&objective, 6, &mut rng).unwrap();
        let before = population.positions();
        let mut abc = colony(1, 6);

        abc.step(&mut population, &objective, &mut rng, Schedule::new(0, 1))
            .unwrap();

        // A constant objective never improves, so every source hits the limit.
        assert!(abc.trials().iter().all(|&t| t == 0));
        assert_eq!(population.len(), 6);
        for (after, before) in population.positions().iter().zip(&before) {
            assert_ne!(after, before);
            assert!(objective.bounds().contains(after));
        }
    }

    #[test]
    fn test_counters_below_limit_survive() {
        let objective = ObjectiveFunction::new(|_: &[f64]| 1.0, Bounds::uniform(2, 0.0, 1.0).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut population = Population::initialize(&objective, 4, &mut rng).unwrap();
        let mut abc = colony(1000, 4);

        abc.step(&mut population, &objective, &mut rng, Schedule::new(0, 1))
            .unwrap();

        // One employed trial per source plus two onlooker trials in total.
        assert_eq!(abc.trials().iter().sum::<usize>(), 4 + 2);
        assert!(abc.trials().iter().all(|&t| t >= 1));
    }

    #[test]
    fn test_never_worsens_a_source_before_scouting() {
        let objective = ObjectiveFunction::new(
            |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>(),
            Bounds::uniform(2, -5.12, 5.12).unwrap(),
        );
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut population = Population::initialize(&objective, 20, &mut rng).unwrap();
        let mut abc = colony(usize::MAX, 20);

        for iteration in 0..30 {
            let before = population.fitness_values();
            abc.step(&mut population, &objective, &mut rng, Schedule::new(iteration, 30))
                .unwrap();
            for (after, before) in population.fitness_values().iter().zip(&before) {
                assert!(after <= before);
            }
            assert!(population
                .iter()
                .all(|agent| objective.bounds().contains(agent.position())));
        }
    }
}
