//! Bat algorithm hyperparameters.

use serde::{Deserialize, Serialize};

use crate::error::{MaintenanceError, Result};

/// Configuration of a bat-algorithm run.
///
/// # Example
/// ```
/// use u_maintenance::bat::BatConfig;
///
/// let config = BatConfig::default()
///     .with_population_size(30)
///     .with_generations(50)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatConfig {
    /// Number of bats.
    pub population_size: usize,
    /// Number of generations (no early stop).
    pub generations: usize,
    /// Loudness decay factor applied on acceptance, in (0, 1].
    pub alpha: f64,
    /// Pulse-rate growth rate, > 0.
    pub lambda: f64,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Evaluate bats of a generation on the rayon pool.
    pub parallel: bool,
}

impl Default for BatConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 100,
            alpha: 0.9,
            lambda: 0.9,
            seed: None,
            parallel: false,
        }
    }
}

impl BatConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the loudness decay factor.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the pulse-rate growth rate.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks parameter domains.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(MaintenanceError::InvalidConfig(
                "population size must be at least 1".into(),
            ));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(MaintenanceError::InvalidConfig(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(self.lambda > 0.0 && self.lambda.is_finite()) {
            return Err(MaintenanceError::InvalidConfig(format!(
                "lambda must be positive, got {}",
                self.lambda
            )));
        }
        Ok(())
    }
}
