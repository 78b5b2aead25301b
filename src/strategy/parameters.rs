//! # Algorithm Parameters
//!
//! Every algorithm has its own tuning parameters. They are modelled as one struct per
//! algorithm, collected in the tagged [`AlgorithmParameters`] enum, and validated once
//! before a run starts. Unspecified parameters take the defaults documented on each
//! struct.
//!
//! External layers that only have name/value pairs (a command line, a JSON request)
//! can use [`AlgorithmParameters::from_named`], which accepts the conventional
//! parameter names and reports unknown or malformed entries as configuration errors.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::strategy::{AlgorithmKind, AlgorithmParameters, ParameterValue};
//!
//! let params = AlgorithmParameters::from_named(
//!     AlgorithmKind::ArtificialBeeColony,
//!     vec![("limit", ParameterValue::from(10usize))],
//! )
//! .unwrap();
//!
//! assert_eq!(params.kind(), AlgorithmKind::ArtificialBeeColony);
//! assert!(params.validate(100, 2).is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{OptimizationError, Result};

/// The available metaheuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    /// Grey Wolf Optimizer (`GWO`).
    GreyWolf,
    /// Firefly Algorithm (`FA`).
    Firefly,
    /// Artificial Bee Colony (`ABC`).
    ArtificialBeeColony,
    /// Artificial Fish Swarm Algorithm (`AFSA`).
    FishSwarm,
    /// Shuffled Frog Leaping Algorithm (`SFLA`).
    ShuffledFrogLeaping,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::GreyWolf,
        AlgorithmKind::Firefly,
        AlgorithmKind::ArtificialBeeColony,
        AlgorithmKind::FishSwarm,
        AlgorithmKind::ShuffledFrogLeaping,
    ];

    /// The short name used on the command line and in reports.
    pub fn code(&self) -> &'static str {
        match self {
            AlgorithmKind::GreyWolf => "GWO",
            AlgorithmKind::Firefly => "FA",
            AlgorithmKind::ArtificialBeeColony => "ABC",
            AlgorithmKind::FishSwarm => "AFSA",
            AlgorithmKind::ShuffledFrogLeaping => "SFLA",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AlgorithmKind {
    type Err = OptimizationError;

    /// Parses an algorithm name, ignoring case. `FIREFLY` is accepted for `FA`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GWO" => Ok(AlgorithmKind::GreyWolf),
            "FA" | "FIREFLY" => Ok(AlgorithmKind::Firefly),
            "ABC" => Ok(AlgorithmKind::ArtificialBeeColony),
            "AFSA" => Ok(AlgorithmKind::FishSwarm),
            "SFLA" => Ok(AlgorithmKind::ShuffledFrogLeaping),
            _ => Err(OptimizationError::config(format!(
                "unknown algorithm '{}', expected one of GWO, FA, ABC, AFSA, SFLA",
                s
            ))),
        }
    }
}

/// A raw parameter value as supplied by an external layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParameterValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Scalar(value)
    }
}

impl From<usize> for ParameterValue {
    fn from(value: usize) -> Self {
        ParameterValue::Scalar(value as f64)
    }
}

impl From<Vec<f64>> for ParameterValue {
    fn from(value: Vec<f64>) -> Self {
        ParameterValue::Vector(value)
    }
}

impl ParameterValue {
    fn scalar(&self, name: &str) -> Result<f64> {
        match self {
            ParameterValue::Scalar(value) if value.is_finite() => Ok(*value),
            ParameterValue::Scalar(value) => Err(OptimizationError::config(format!(
                "parameter {} must be finite, got {}",
                name, value
            ))),
            ParameterValue::Vector(_) => Err(OptimizationError::config(format!(
                "parameter {} must be a scalar",
                name
            ))),
        }
    }

    fn count(&self, name: &str) -> Result<usize> {
        let value = self.scalar(name)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(OptimizationError::config(format!(
                "parameter {} must be a non-negative integer, got {}",
                name, value
            )));
        }
        Ok(value as usize)
    }

    fn vector(&self, name: &str) -> Result<Vec<f64>> {
        match self {
            ParameterValue::Vector(values) if values.iter().all(|v| v.is_finite()) => {
                Ok(values.clone())
            }
            ParameterValue::Vector(_) => Err(OptimizationError::config(format!(
                "parameter {} must contain finite values",
                name
            ))),
            ParameterValue::Scalar(value) => Ok(vec![*value]),
        }
    }
}

fn require(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(OptimizationError::InvalidConfiguration(message()))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    require(value.is_finite() && value >= 0.0, || {
        format!("parameter {} must be finite and >= 0, got {}", name, value)
    })
}

/// Grey Wolf Optimizer parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GwoParameters {
    /// Starting value of the exploration coefficient `a`, decayed linearly to 0.
    /// Default: 2.0.
    pub initial_a: f64,
    /// Scale of the random coefficient `C = initial_c * r`. Default: 2.0.
    pub initial_c: f64,
}

impl Default for GwoParameters {
    fn default() -> Self {
        Self {
            initial_a: 2.0,
            initial_c: 2.0,
        }
    }
}

impl GwoParameters {
    pub fn validate(&self) -> Result<()> {
        non_negative("initialA", self.initial_a)?;
        non_negative("initialC", self.initial_c)
    }
}

/// Firefly Algorithm parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireflyParameters {
    /// Attractiveness at zero distance. Default: 1.0.
    pub beta0: f64,
    /// Light absorption coefficient. Default: 0.8.
    pub gamma: f64,
    /// Initial random perturbation scale, relative to each dimension's span. It decays
    /// linearly to zero over the run. Default: 0.1.
    pub alpha: f64,
}

impl Default for FireflyParameters {
    fn default() -> Self {
        Self {
            beta0: 1.0,
            gamma: 0.8,
            alpha: 0.1,
        }
    }
}

impl FireflyParameters {
    pub fn validate(&self) -> Result<()> {
        non_negative("beta0", self.beta0)?;
        non_negative("gamma", self.gamma)?;
        non_negative("alpha", self.alpha)
    }
}

/// Artificial Bee Colony parameters.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbcParameters {
    /// Failed trials after which a food source is abandoned.
    /// Default: `population_size * dimensions / 2`, at least 1.
    pub limit: Option<usize>,
    /// Number of onlooker trials per iteration.
    /// Default: `population_size / 2`, at least 1.
    pub forager_size: Option<usize>,
}

impl AbcParameters {
    pub fn resolved_limit(&self, population_size: usize, dimensions: usize) -> usize {
        self.limit
            .unwrap_or_else(|| (population_size * dimensions / 2).max(1))
    }

    pub fn resolved_forager_size(&self, population_size: usize) -> usize {
        self.forager_size
            .unwrap_or_else(|| (population_size / 2).max(1))
    }

    pub fn validate(&self, population_size: usize) -> Result<()> {
        require(population_size >= 2, || {
            format!(
                "ABC needs population_size >= 2 to pick partners, got {}",
                population_size
            )
        })?;
        require(self.limit != Some(0), || {
            "parameter limit must be positive".to_string()
        })?;
        require(self.forager_size != Some(0), || {
            "parameter foragerSize must be positive".to_string()
        })
    }
}

/// Visual range of the fish swarm, as fractions of the widest bound span.
///
/// The effective range decays linearly from `initial` towards 0 over the run and
/// never drops below `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualRange {
    pub min: f64,
    pub initial: f64,
}

impl VisualRange {
    /// The visual fraction at `progress` (0 at the first iteration, approaching 1).
    pub fn at(&self, progress: f64) -> f64 {
        (self.initial * (1.0 - progress)).max(self.min)
    }
}

impl Default for VisualRange {
    fn default() -> Self {
        Self {
            min: 1.0,
            initial: 8.0,
        }
    }
}

/// Artificial Fish Swarm Algorithm parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfsaParameters {
    /// Step scaling for movements towards a target. Default: 1.0.
    pub eta: f64,
    /// Preying attempts before falling back to a random step. Default: 5.
    pub max_tries: usize,
    /// Visual range. Default: `[1.0, 8.0]`.
    pub visual: VisualRange,
    /// Random step size, relative to the visual distance. Default: 1.0.
    pub teta: f64,
    /// Crowding factor: swarming is skipped when more than this fraction of the
    /// school is in view. Default: 1.0 (never crowded).
    pub crowding: f64,
    /// Iterations without a new best after which one random fish jumps by up to a
    /// random fraction of each bound span. Default: `None` (never jumps).
    pub jump_after: Option<usize>,
}

impl Default for AfsaParameters {
    fn default() -> Self {
        Self {
            eta: 1.0,
            max_tries: 5,
            visual: VisualRange::default(),
            teta: 1.0,
            crowding: 1.0,
            jump_after: None,
        }
    }
}

impl AfsaParameters {
    pub fn validate(&self) -> Result<()> {
        require(self.eta.is_finite() && self.eta > 0.0, || {
            format!("parameter eta must be positive, got {}", self.eta)
        })?;
        require(self.max_tries >= 1, || {
            "parameter maxTries must be at least 1".to_string()
        })?;
        require(self.visual.min.is_finite() && self.visual.min > 0.0, || {
            format!("parameter visual minimum must be positive, got {}", self.visual.min)
        })?;
        require(
            self.visual.initial.is_finite() && self.visual.initial >= self.visual.min,
            || {
                format!(
                    "parameter visual initial value {} must be >= its minimum {}",
                    self.visual.initial, self.visual.min
                )
            },
        )?;
        non_negative("teta", self.teta)?;
        require(self.crowding > 0.0 && self.crowding <= 1.0, || {
            format!("parameter crowding must be in (0, 1], got {}", self.crowding)
        })?;
        require(self.jump_after != Some(0), || {
            "parameter jumpAfter must be at least 1".to_string()
        })
    }
}

/// Shuffled Frog Leaping Algorithm parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SflaParameters {
    /// Number of memeplexes. Default: 1.
    pub subpopulations_count: usize,
    /// Local iterations per memeplex and outer iteration. Default: 10.
    pub i_max: usize,
}

impl Default for SflaParameters {
    fn default() -> Self {
        Self {
            subpopulations_count: 1,
            i_max: 10,
        }
    }
}

impl SflaParameters {
    pub fn validate(&self, population_size: usize) -> Result<()> {
        require(self.subpopulations_count >= 1, || {
            "parameter subpopulationsCount must be at least 1".to_string()
        })?;
        require(self.subpopulations_count <= population_size, || {
            format!(
                "parameter subpopulationsCount ({}) must not exceed population_size ({})",
                self.subpopulations_count, population_size
            )
        })?;
        require(self.i_max >= 1, || "parameter iMax must be at least 1".to_string())
    }
}

/// Parameters of the selected algorithm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmParameters {
    Gwo(GwoParameters),
    Firefly(FireflyParameters),
    Abc(AbcParameters),
    Afsa(AfsaParameters),
    Sfla(SflaParameters),
}

impl AlgorithmParameters {
    /// Default parameters for `kind`.
    pub fn defaults(kind: AlgorithmKind) -> Self {
        match kind {
            AlgorithmKind::GreyWolf => AlgorithmParameters::Gwo(GwoParameters::default()),
            AlgorithmKind::Firefly => AlgorithmParameters::Firefly(FireflyParameters::default()),
            AlgorithmKind::ArtificialBeeColony => {
                AlgorithmParameters::Abc(AbcParameters::default())
            }
            AlgorithmKind::FishSwarm => AlgorithmParameters::Afsa(AfsaParameters::default()),
            AlgorithmKind::ShuffledFrogLeaping => {
                AlgorithmParameters::Sfla(SflaParameters::default())
            }
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmParameters::Gwo(_) => AlgorithmKind::GreyWolf,
            AlgorithmParameters::Firefly(_) => AlgorithmKind::Firefly,
            AlgorithmParameters::Abc(_) => AlgorithmKind::ArtificialBeeColony,
            AlgorithmParameters::Afsa(_) => AlgorithmKind::FishSwarm,
            AlgorithmParameters::Sfla(_) => AlgorithmKind::ShuffledFrogLeaping,
        }
    }

    /// Checks the parameters against the run's population size and dimension count.
    pub fn validate(&self, population_size: usize, dimensions: usize) -> Result<()> {
        require(dimensions >= 1, || "at least one dimension is required".to_string())?;
        match self {
            AlgorithmParameters::Gwo(params) => params.validate(),
            AlgorithmParameters::Firefly(params) => params.validate(),
            AlgorithmParameters::Abc(params) => params.validate(population_size),
            AlgorithmParameters::Afsa(params) => params.validate(),
            AlgorithmParameters::Sfla(params) => params.validate(population_size),
        }
    }

    /// Builds parameters for `kind` from name/value pairs, starting from the defaults.
    ///
    /// Recognized names:
    ///
    /// - GWO: `initialA`, `initialC`
    /// - FA: `beta0`, `gamma`, `alpha`
    /// - ABC: `limit`, `foragerSize`
    /// - AFSA: `eta`, `maxTries`, `visual` (`[min, initial]`, or a single value), `teta`,
    ///   `crowding`, `jumpAfter`
    /// - SFLA: `subpopulationsCount`, `iMax`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the parameter if it is unknown for `kind`,
    /// has the wrong shape, or is not a non-negative integer where a count is expected.
    pub fn from_named<I, K>(kind: AlgorithmKind, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: AsRef<str>,
    {
        let mut params = Self::defaults(kind);
        for (name, value) in pairs {
            params.set(name.as_ref(), &value)?;
        }
        Ok(params)
    }

    fn set(&mut self, name: &str, value: &ParameterValue) -> Result<()> {
        match (self, name) {
            (AlgorithmParameters::Gwo(p), "initialA") => p.initial_a = value.scalar(name)?,
            (AlgorithmParameters::Gwo(p), "initialC") => p.initial_c = value.scalar(name)?,
            (AlgorithmParameters::Firefly(p), "beta0") => p.beta0 = value.scalar(name)?,
            (AlgorithmParameters::Firefly(p), "gamma") => p.gamma = value.scalar(name)?,
            (AlgorithmParameters::Firefly(p), "alpha") => p.alpha = value.scalar(name)?,
            (AlgorithmParameters::Abc(p), "limit") => p.limit = Some(value.count(name)?),
            (AlgorithmParameters::Abc(p), "foragerSize") => {
                p.forager_size = Some(value.count(name)?)
            }
            (AlgorithmParameters::Afsa(p), "eta") => p.eta = value.scalar(name)?,
            (AlgorithmParameters::Afsa(p), "maxTries") => p.max_tries = value.count(name)?,
            (AlgorithmParameters::Afsa(p), "teta") => p.teta = value.scalar(name)?,
            (AlgorithmParameters::Afsa(p), "crowding") => p.crowding = value.scalar(name)?,
            (AlgorithmParameters::Afsa(p), "jumpAfter") => p.jump_after = Some(value.count(name)?),
            (AlgorithmParameters::Afsa(p), "visual") => {
                p.visual = match value.vector(name)?.as_slice() {
                    [fixed] => VisualRange {
                        min: *fixed,
                        initial: *fixed,
                    },
                    [min, initial] => VisualRange {
                        min: *min,
                        initial: *initial,
                    },
                    other => {
                        return Err(OptimizationError::config(format!(
                            "parameter visual expects [min, initial], got {} values",
                            other.len()
                        )))
                    }
                }
            }
            (AlgorithmParameters::Sfla(p), "subpopulationsCount") => {
                p.subpopulations_count = value.count(name)?
            }
            (AlgorithmParameters::Sfla(p), "iMax") => p.i_max = value.count(name)?,
            (params, _) => {
                return Err(OptimizationError::config(format!(
                    "unknown parameter {} for algorithm {}",
                    name,
                    params.kind()
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("gwo".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::GreyWolf);
        assert_eq!("FA".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Firefly);
        assert_eq!("Firefly".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Firefly);
        assert_eq!(
            " sfla ".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::ShuffledFrogLeaping
        );

        match "UNKNOWN".parse::<AlgorithmKind>() {
            Err(OptimizationError::InvalidConfiguration(msg)) => assert!(msg.contains("UNKNOWN")),
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.to_string().parse::<AlgorithmKind>().unwrap(), kind);
            assert_eq!(AlgorithmParameters::defaults(kind).kind(), kind);
        }
    }

    #[test]
    fn test_defaults() {
        let abc = AbcParameters::default();
        assert_eq!(abc.resolved_limit(100, 2), 100);
        assert_eq!(abc.resolved_forager_size(100), 50);
        assert_eq!(abc.resolved_limit(1, 1), 1);

        let afsa = AfsaParameters::default();
        assert_eq!(afsa.max_tries, 5);
        assert_eq!(afsa.visual.at(0.0), 8.0);
        assert_eq!(afsa.visual.at(0.99), 1.0);
        assert_eq!(afsa.jump_after, None);

        assert_eq!(SflaParameters::default().i_max, 10);
        assert_eq!(FireflyParameters::default().gamma, 0.8);
        assert_eq!(GwoParameters::default().initial_a, 2.0);
    }

    #[test]
    fn test_from_named() {
        let params = AlgorithmParameters::from_named(
            AlgorithmKind::FishSwarm,
            vec![
                ("eta", ParameterValue::from(0.5)),
                ("maxTries", ParameterValue::from(50usize)),
                ("visual", ParameterValue::from(vec![0.1, 0.9])),
                ("jumpAfter", ParameterValue::from(4usize)),
            ],
        )
        .unwrap();

        match params {
            AlgorithmParameters::Afsa(p) => {
                assert_eq!(p.eta, 0.5);
                assert_eq!(p.max_tries, 50);
                assert_eq!(p.visual, VisualRange { min: 0.1, initial: 0.9 });
                assert_eq!(p.teta, 1.0);
                assert_eq!(p.jump_after, Some(4));
            }
            other => panic!("Expected AFSA parameters, got {:?}", other),
        }
    }

    #[test]
    fn test_from_named_rejects_bad_input() {
        let unknown = AlgorithmParameters::from_named(
            AlgorithmKind::GreyWolf,
            vec![("limit", ParameterValue::from(3usize))],
        );
        match unknown {
            Err(OptimizationError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("limit"));
                assert!(msg.contains("GWO"));
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }

        let fractional = AlgorithmParameters::from_named(
            AlgorithmKind::ShuffledFrogLeaping,
            vec![("iMax", ParameterValue::from(2.5))],
        );
        assert!(fractional.is_err());

        let vector_for_scalar = AlgorithmParameters::from_named(
            AlgorithmKind::Firefly,
            vec![("alpha", ParameterValue::from(vec![1.0, 2.0]))],
        );
        assert!(vector_for_scalar.is_err());

        let long_visual = AlgorithmParameters::from_named(
            AlgorithmKind::FishSwarm,
            vec![("visual", ParameterValue::from(vec![1.0, 2.0, 3.0]))],
        );
        assert!(long_visual.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(AlgorithmParameters::defaults(AlgorithmKind::ArtificialBeeColony)
            .validate(1, 2)
            .is_err());
        assert!(AlgorithmParameters::Abc(AbcParameters {
            limit: Some(0),
            forager_size: None
        })
        .validate(10, 2)
        .is_err());

        let sfla = AlgorithmParameters::Sfla(SflaParameters {
            subpopulations_count: 11,
            i_max: 10,
        });
        assert!(sfla.validate(10, 2).is_err());
        assert!(sfla.validate(11, 2).is_ok());

        let gwo = AlgorithmParameters::Gwo(GwoParameters {
            initial_a: -1.0,
            initial_c: 2.0,
        });
        match gwo.validate(10, 2) {
            Err(OptimizationError::InvalidConfiguration(msg)) => assert!(msg.contains("initialA")),
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }

        let afsa = AlgorithmParameters::Afsa(AfsaParameters {
            visual: VisualRange { min: 2.0, initial: 1.0 },
            ..AfsaParameters::default()
        });
        assert!(afsa.validate(10, 2).is_err());
        let never_waits = AlgorithmParameters::Afsa(AfsaParameters {
            jump_after: Some(0),
            ..AfsaParameters::default()
        });
        assert!(never_waits.validate(10, 2).is_err());

        for kind in AlgorithmKind::ALL {
            assert!(AlgorithmParameters::defaults(kind).validate(10, 2).is_ok());
            assert!(AlgorithmParameters::defaults(kind).validate(10, 0).is_err());
        }
    }
}
