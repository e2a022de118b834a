//! Error taxonomy of the maintenance planner.
//!
//! All variants are deterministic input or invariant failures; none is
//! retried and none is downgraded to a best-effort schedule.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MaintenanceError>;

/// Errors raised while preparing or running an optimization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaintenanceError {
    /// No legal start day exists for a unit, even after the threshold fallback.
    #[error("unit {unit} has no feasible maintenance start day")]
    EmptyFeasibleSet { unit: usize },

    /// A unit's maintenance is longer than the planning horizon.
    #[error("unit {unit} needs {duration} maintenance days but the horizon has {horizon}")]
    InvalidHorizon {
        unit: usize,
        duration: usize,
        horizon: usize,
    },

    /// Total inflow is not positive, so daily inflow shares are undefined.
    #[error("total inflow over the horizon is {total}, cannot weight daily spill")]
    DegenerateInflow { total: f64 },

    /// The projector could not land a candidate inside the unit's feasible set.
    #[error("projection of unit {unit} (value {value}) did not reach a feasible start day")]
    ProjectionFailure { unit: usize, value: f64 },

    /// Structural problems in the plant data or baseline.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Hyperparameters out of their domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<Vec<ValidationError>> for MaintenanceError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
