//! # Benchmark Functions
//!
//! Standard test functions for continuous optimization. All of them are minimized.
//!
//! | Function     | Global minimum                       | Usual domain       |
//! |--------------|--------------------------------------|--------------------|
//! | `sphere`     | 0 at the origin                      | `[-100, 100]^n`    |
//! | `rosenbrock` | 0 at `(1, ..., 1)`                   | `[-5, 5]^n`        |
//! | `rastrigin`  | 0 at the origin                      | `[-5.12, 5.12]^n`  |
//! | `schwefel`   | ~0 at `(420.9687, ..., 420.9687)`    | `[-500, 500]^n`    |
//! | `ackley`     | 0 at the origin                      | `[-32.768, 32.768]^n` |
//! | `levi`       | 0 at `(1, 1)`                        | `[-10, 10]^2`      |

use std::f64::consts::{E, PI};

pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|pair| (1.0 - pair[0]).powi(2) + 100.0 * (pair[1] - pair[0] * pair[0]).powi(2))
        .sum()
}

pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>()
}

pub fn schwefel(x: &[f64]) -> f64 {
    418.9829 * x.len() as f64 - x.iter().map(|v| v * v.abs().sqrt().sin()).sum::<f64>()
}

pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let squares = x.iter().map(|v| v * v).sum::<f64>() / n;
    let cosines = x.iter().map(|v| (2.0 * PI * v).cos()).sum::<f64>() / n;
    -20.0 * (-0.2 * squares.sqrt()).exp() - cosines.exp() + 20.0 + E
}

/// Lévi function N.13. Uses the first two coordinates.
pub fn levi(x: &[f64]) -> f64 {
    let a = x.first().copied().unwrap_or(0.0);
    let b = x.get(1).copied().unwrap_or(0.0);
    (3.0 * PI * a).sin().powi(2)
        + (a - 1.0).powi(2) * (1.0 + (3.0 * PI * b).sin().powi(2))
        + (b - 1.0).powi(2) * (1.0 + (2.0 * PI * b).sin().powi(2))
}
