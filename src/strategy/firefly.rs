//! # Firefly Algorithm
//!
//! Every firefly is attracted by every firefly that was brighter at the start of the
//! iteration. Attraction decays with the squared distance:
//!
//! ```text
//! beta = beta0 * exp(-gamma_i * r^2)
//! x_d += beta * (x_j,d - x_d) + alpha_t * (u - 0.5) * span_d
//! alpha_t = alpha * (1 - t / T)
//! ```
//!
//! `gamma_i` is `gamma` divided by the largest distance from firefly `i` to any other
//! firefly, so each firefly mostly follows brighter ones in its own neighbourhood and
//! distant groups explore independently. The perturbation shrinks linearly over the
//! run: early moves roam across basins, late moves refine around the brightest points.
//!
//! The brightest fireflies, having no one to follow, take a pure random step. A firefly
//! keeps its new position only when it is strictly brighter than where it started. All
//! brightness comparisons and partner positions come from the snapshot taken before
//! any firefly moves, so the update does not depend on the order agents are visited.

use tracing::trace;

use super::{FireflyParameters, Schedule, Strategy};
use crate::{
    error::Result,
    optimization::{Objective, ObjectiveFunction},
    population::{Agent, Bounds, Population},
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone)]
pub struct FireflyAlgorithm {
    params: FireflyParameters,
}

impl FireflyAlgorithm {
    pub fn new(params: FireflyParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &FireflyParameters {
        &self.params
    }

    /// Light absorption for a firefly whose farthest companion is `reach` away.
    fn absorption(&self, reach: f64) -> f64 {
        if reach > 0.0 {
            self.params.gamma / reach
        } else {
            0.0
        }
    }

    fn attractiveness(&self, from: &[f64], to: &[f64], absorption: f64) -> f64 {
        self.params.beta0 * (-absorption * squared_distance(from, to)).exp()
    }

    /// Perturbation scale for the given point of the run.
    pub fn randomness(&self, schedule: Schedule) -> f64 {
        self.params.alpha * (1.0 - schedule.progress())
    }

    fn noise(scale: f64, span: f64, rng: &mut RandomNumberGenerator) -> f64 {
        scale * (rng.unit() - 0.5) * span
    }

    fn jitter(
        scale: f64,
        position: &mut [f64],
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) {
        for (d, x) in position.iter_mut().enumerate() {
            let step = Self::noise(scale, bounds.span(d), rng);
            *x = bounds.clamp_coordinate(d, *x + step);
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl Strategy for FireflyAlgorithm {
    fn name(&self) -> &'static str {
        "FA"
    }

    fn step<O: Objective>(
        &mut self,
        population: &mut Population,
        objective: &ObjectiveFunction<O>,
        rng: &mut RandomNumberGenerator,
        schedule: Schedule,
    ) -> Result<usize> {
        let bounds = objective.bounds();
        let snapshot = population.positions();
        let brightness = population.fitness_values();
        let scale = self.randomness(schedule);

        let mut moved = Vec::with_capacity(snapshot.len());
        let mut wanderers = 0usize;
        for (i, start) in snapshot.iter().enumerate() {
            let reach = snapshot
                .iter()
                .map(|other| squared_distance(start, other))
                .fold(0.0, f64::max)
                .sqrt();
            let absorption = self.absorption(reach);
            let mut position = start.clone();
            let mut attracted = false;

            for (j, partner) in snapshot.iter().enumerate() {
                if !objective.is_better(brightness[j], brightness[i]) {
                    continue;
                }
                attracted = true;
                let beta = self.attractiveness(&position, partner, absorption);
                for (d, x) in position.iter_mut().enumerate() {
                    let step = beta * (partner[d] - *x) + Self::noise(scale, bounds.span(d), rng);
                    *x = bounds.clamp_coordinate(d, *x + step);
                }
            }

            if !attracted {
                wanderers += 1;
                Self::jitter(scale, &mut position, bounds, rng);
            }
            moved.push(position);
        }

        let values = objective.evaluate_all(&moved)?;
        let mut brightened = 0usize;
        for (index, (position, value)) in moved.into_iter().zip(values).enumerate() {
            if objective.is_better(value, brightness[index]) {
                population.replace(index, Agent::new(position, value));
                brightened += 1;
            }
        }
        trace!(
            iteration = schedule.iteration,
            wanderers,
            brightened,
            "fireflies moved"
        );

        population.best_index(objective)
    }
}
