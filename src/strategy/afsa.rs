//! # Artificial Fish Swarm Algorithm
//!
//! Fish are visited in index order and see the school as it is at that moment,
//! including moves already made in this iteration. Each fish tries, in order:
//!
//! 1. **Prey**: probe up to `max_tries` random points within the visual distance and
//!    swim towards the first one that beats its current position. When no probe
//!    leads to an improvement it drifts randomly by up to `teta` times the visual
//!    distance, and that drift is always accepted.
//! 2. **Swarm**: swim towards the centroid of the fish in view when the centroid is
//!    better and the view is not crowded.
//! 3. **Follow**: swim towards the best fish in view when it is better.
//!
//! Swarming and following only move the fish on strict improvement. The visual
//! distance is a fraction of the widest bound span that decays over the run, see
//! [`VisualRange`](super::VisualRange).
//!
//! With `jump_after` set, a school that goes that many iterations without a new best
//! sends one random fish jumping by up to a random fraction of every bound span. The
//! jump is always accepted and the stagnation count starts over.

use tracing::{debug, trace};

use super::{move_towards, AfsaParameters, Schedule, Strategy};
use crate::{
    error::Result,
    optimization::{Objective, ObjectiveFunction},
    population::{Agent, Bounds, Population},
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone)]
pub struct FishSwarm {
    params: AfsaParameters,
    best_seen: Option<f64>,
    stagnant: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Moves {
    preyed: usize,
    drifted: usize,
    swarmed: usize,
    followed: usize,
}

impl FishSwarm {
    pub fn new(params: AfsaParameters) -> Self {
        Self {
            params,
            best_seen: None,
            stagnant: 0,
        }
    }

    pub fn parameters(&self) -> &AfsaParameters {
        &self.params
    }

    /// Absolute visual distance at the given point of the run.
    pub fn visual_distance(&self, bounds: &Bounds, schedule: Schedule) -> f64 {
        self.params.visual.at(schedule.progress()) * bounds.widest_span()
    }

    /// A random point around `position`, at most `reach` away in each dimension.
    fn wander(
        position: &[f64],
        reach: f64,
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<f64> {
        position
            .iter()
            .enumerate()
            .map(|(d, &x)| {
                let delta = rng.symmetric() * reach.min(bounds.span(d));
                bounds.clamp_coordinate(d, x + delta)
            })
            .collect()
    }

    /// Moves towards `target` by `eta * u` and returns the new agent if it improves on
    /// the fish at `index`.
    fn approach<O: Objective>(
        &self,
        population: &Population,
        index: usize,
        target: &[f64],
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Option<Agent>> {
        let fish = &population.agents()[index];
        let factor = self.params.eta * rng.unit();
        let candidate = move_towards(fish.position(), target, factor, objective.bounds());
        let value = objective.evaluate(&candidate)?;
        if objective.is_better(value, fish.fitness()) {
            Ok(Some(Agent::new(candidate, value)))
        } else {
            Ok(None)
        }
    }

    /// Iterations since the school last found a new best.
    pub fn stagnant_iterations(&self) -> usize {
        self.stagnant
    }

    fn jump<O: Objective>(
        population: &mut Population,
        index: usize,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let bounds = objective.bounds();
        let reach = rng.unit();
        let position: Vec<f64> = population.agents()[index]
            .position()
            .iter()
            .enumerate()
            .map(|(d, &x)| bounds.clamp_coordinate(d, x + rng.symmetric() * reach * bounds.span(d)))
            .collect();
        population.replace(index, Agent::evaluated(position, objective)?);
        Ok(())
    }

    fn track_stagnation<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<()> {
        let best = population.best_index(objective)?;
        let value = population.agents()[best].fitness();
        match self.best_seen {
            Some(seen) if !objective.is_better(value, seen) => self.stagnant += 1,
            _ => {
                self.best_seen = Some(value);
                self.stagnant = 0;
            }
        }

        let Some(limit) = self.params.jump_after else {
            return Ok(());
        };
        if self.stagnant >= limit {
            let index = rng.uniform_int(0, population.len());
            Self::jump(population, index, objective, rng)?;
            debug!(
                iteration = schedule.iteration,
                fish = index,
                stagnant = self.stagnant,
                "school stagnated, fish jumped"
            );
            self.stagnant = 0;
        }
        Ok(())
    }

    fn prey<O: Objective>(
        &self,
        population: &mut Population,
        index: usize,
        visual: f64,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        moves: &mut Moves,
    ) -> Result<()> {
        let bounds = objective.bounds();
        for _ in 0..self.params.max_tries {
            let fish = &population.agents()[index];
            let probe = Self::wander(fish.position(), visual, bounds, rng);
            let probe_value = objective.evaluate(&probe)?;
            if !objective.is_better(probe_value, fish.fitness()) {
                continue;
            }
            if let Some(agent) = self.approach(population, index, &probe, objective, rng)? {
                population.replace(index, agent);
                moves.preyed += 1;
                return Ok(());
            }
        }

        let fish = &population.agents()[index];
        let drift = Self::wander(fish.position(), self.params.teta * visual, bounds, rng);
        let agent = Agent::evaluated(drift, objective)?;
        population.replace(index, agent);
        moves.drifted += 1;
        Ok(())
    }

    fn swarm<O: Objective>(
        &self,
        population: &mut Population,
        index: usize,
        visual: f64,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        moves: &mut Moves,
    ) -> Result<()> {
        let in_view = neighbours(population, index, visual);
        if in_view.is_empty() {
            return Ok(());
        }
        let crowd = in_view.len() as f64 / population.len() as f64;
        if crowd > self.params.crowding {
            return Ok(());
        }

        let centre = centroid(population, &in_view);
        let centre_value = objective.evaluate(&centre)?;
        if !objective.is_better(centre_value, population.agents()[index].fitness()) {
            return Ok(());
        }
        if let Some(agent) = self.approach(population, index, &centre, objective, rng)? {
            population.replace(index, agent);
            moves.swarmed += 1;
        }
        Ok(())
    }

    fn follow<O: Objective>(
        &self,
        population: &mut Population,
        index: usize,
        visual: f64,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        moves: &mut Moves,
    ) -> Result<()> {
        let in_view = neighbours(population, index, visual);
        let Some(leader) = best_of(population, &in_view, objective) else {
            return Ok(());
        };
        let agents = population.agents();
        if !objective.is_better(agents[leader].fitness(), agents[index].fitness()) {
            return Ok(());
        }
        let target = agents[leader].position().to_vec();
        if let Some(agent) = self.approach(population, index, &target, objective, rng)? {
            population.replace(index, agent);
            moves.followed += 1;
        }
        Ok(())
    }
}

/// Indices of the fish other than `index` within Euclidean distance `visual`.
fn neighbours(population: &Population, index: usize, visual: f64) -> Vec<usize> {
    let origin = population.agents()[index].position();
    population
        .iter()
        .enumerate()
        .filter(|&(j, fish)| {
            j != index && {
                let distance: f64 = fish
                    .position()
                    .iter()
                    .zip(origin)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                distance <= visual
            }
        })
        .map(|(j, _)| j)
        .collect()
}

fn centroid(population: &Population, members: &[usize]) -> Vec<f64> {
    let dimensions = population.agents()[members[0]].position().len();
    let mut centre = vec![0.0; dimensions];
    for &member in members {
        for (c, x) in centre.iter_mut().zip(population.agents()[member].position()) {
            *c += x;
        }
    }
    let count = members.len() as f64;
    centre.iter_mut().for_each(|c| *c /= count);
    centre
}

/// The best of `members`; ties go to the one listed first.
fn best_of<O: Objective>(
    population: &Population,
    members: &[usize],
    objective: &ObjectiveFunction<O>,
) -> Option<usize> {
    let agents = population.agents();
    members.iter().copied().fold(None, |best, candidate| match best {
        Some(current)
            if !objective.is_better(agents[candidate].fitness(), agents[current].fitness()) =>
        {
            Some(current)
        }
        _ => Some(candidate),
    })
}

impl Strategy for FishSwarm {
    fn name(&self) -> &'static str {
        "AFSA"
    }

    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize> {
        let visual = self.visual_distance(objective.bounds(), schedule);
        let mut moves = Moves::default();

        for index in 0..population.len() {
            self.prey(population, index, visual, objective, rng, &mut moves)?;
            self.swarm(population, index, visual, objective, rng, &mut moves)?;
            self.follow(population, index, visual, objective, rng, &mut moves)?;
        }
        trace!(
            iteration = schedule.iteration,
            visual,
            preyed = moves.preyed,
            drifted = moves.drifted,
            swarmed = moves.swarmed,
            followed = moves.followed,
            "fish swarm moved"
        );
        self.track_stagnation(population, objective, rng, schedule)?;

        population.best_index(objective)
    }
}
