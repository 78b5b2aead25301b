//! # Optimization
//!
//! The driver side of the engine: the objective wrapper, run options, the
//! [`Optimizer`] that owns the iteration loop and its builder, and the one-call
//! [`optimize`] entry point.
pub mod builder;
pub mod launcher;
pub mod objective;
pub mod options;

pub use builder::OptimizerBuilder;
pub use launcher::{
    optimize, CancellationToken, IterationReport, OptimizationResult, Optimizer,
};
pub use objective::{Direction, Objective, ObjectiveFunction};
pub use options::{LogLevel, OptimizationOptions, OptimizationOptionsBuilder};
