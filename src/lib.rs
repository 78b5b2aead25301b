pub mod benchmarks;
pub mod error;
pub mod optimization;
pub mod population;
pub mod rng;
pub mod strategy;

// Re-export commonly used types for convenience
pub use error::{OptimizationError, OptionExt, Result};
pub use optimization::{
    optimize, Direction, LogLevel, Objective, OptimizationOptions, OptimizationResult, Optimizer,
    OptimizerBuilder,
};
pub use population::Bounds;
pub use strategy::{AlgorithmKind, AlgorithmParameters, ParameterValue};
