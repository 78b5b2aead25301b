//! # OptimizationOptions
//!
//! The `OptimizationOptions` struct holds the run-level configuration shared by all
//! algorithms: the number of iterations, the population size, the random seed, the
//! optimization direction, the logging level and the batch size from which
//! evaluations run in parallel.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::optimization::{Direction, LogLevel, OptimizationOptions};
//!
//! // Fixed seed, everything else at the defaults
//! let options = OptimizationOptions::builder().seed(42).build();
//! assert_eq!(options.get_seed(), Some(42));
//! assert_eq!(options.get_iterations(), 100);
//!
//! // Fully specified
//! let options = OptimizationOptions::new(300, 100, Some(7))
//!     .with_direction(Direction::Maximize)
//!     .with_log_level(LogLevel::Minimal);
//! assert_eq!(options.get_population_size(), 100);
//! ```
//!
//! ## Defaults
//!
//! - `iterations`: 100
//! - `population_size`: 50
//! - `seed`: `None` (a seed is drawn from OS entropy and logged)
//! - `direction`: `Minimize`
//! - `log_level`: `None`
//! - `parallel_threshold`: 1000

use super::Direction;

/// Controls which events the driver emits through `tracing`.
///
/// - `Verbose`: run summary plus one `debug` event per iteration.
/// - `Minimal`: run start and end only.
/// - `None`: no driver events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationOptions {
    iterations: usize,
    population_size: usize,
    seed: Option<u64>,
    direction: Direction,
    log_level: LogLevel,
    /// Minimum batch size evaluated in parallel
    parallel_threshold: usize,
}

impl OptimizationOptions {
    pub fn new(iterations: usize, population_size: usize, seed: Option<u64>) -> Self {
        Self {
            iterations,
            population_size,
            seed,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn get_iterations(&self) -> usize {
        self.iterations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum batch size evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder with every field at its default.
    pub fn builder() -> OptimizationOptionsBuilder {
        OptimizationOptionsBuilder::default()
    }
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            iterations: 100,
            population_size: 50,
            seed: None,
            direction: Direction::Minimize,
            log_level: LogLevel::None,
            parallel_threshold: 1000,
        }
    }
}

/// Fluent builder for [`OptimizationOptions`].
#[derive(Debug, Clone, Default)]
pub struct OptimizationOptionsBuilder {
    iterations: Option<usize>,
    population_size: Option<usize>,
    seed: Option<u64>,
    direction: Option<Direction>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl OptimizationOptionsBuilder {
    pub fn iterations(mut self, value: usize) -> Self {
        self.iterations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn direction(mut self, value: Direction) -> Self {
        self.direction = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn build(self) -> OptimizationOptions {
        let defaults = OptimizationOptions::default();
        OptimizationOptions {
            iterations: self.iterations.unwrap_or(defaults.iterations),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            seed: self.seed.or(defaults.seed),
            direction: self.direction.unwrap_or(defaults.direction),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OptimizationOptions::default();
        assert_eq!(options.get_iterations(), 100);
        assert_eq!(options.get_population_size(), 50);
        assert_eq!(options.get_seed(), None);
        assert_eq!(options.get_direction(), Direction::Minimize);
        assert_eq!(options.get_log_level(), LogLevel::None);
        assert_eq!(options.get_parallel_threshold(), 1000);
        assert_eq!(OptimizationOptions::builder().build(), options);
    }

    #[test]
    fn test_builder_overrides() {
        let options = OptimizationOptions::builder()
            .iterations(10)
            .population_size(5)
            .seed(3)
            .direction(Direction::Maximize)
            .log_level(LogLevel::Verbose)
            .parallel_threshold(1)
            .build();

        assert_eq!(options.get_iterations(), 10);
        assert_eq!(options.get_population_size(), 5);
        assert_eq!(options.get_seed(), Some(3));
        assert_eq!(options.get_direction(), Direction::Maximize);
        assert_eq!(options.get_log_level(), LogLevel::Verbose);
        assert_eq!(options.get_parallel_threshold(), 1);
    }

    #[test]
    fn test_setters() {
        let mut options = OptimizationOptions::new(1, 1, None);
        options.set_iterations(20);
        options.set_population_size(30);
        options.set_seed(Some(9));
        options.set_direction(Direction::Maximize);
        options.set_log_level(LogLevel::Minimal);
        options.set_parallel_threshold(64);

        assert_eq!(
            options,
            OptimizationOptions::builder()
                .iterations(20)
                .population_size(30)
                .seed(9)
                .direction(Direction::Maximize)
                .log_level(LogLevel::Minimal)
                .parallel_threshold(64)
                .build()
        );
    }
}
