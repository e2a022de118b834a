//! Input validation for maintenance planning.
//!
//! Checks structural integrity of the plant data and the baseline
//! operation before any optimization. Detects:
//! - Matrices whose shape disagrees with the unit count or horizon
//! - Units without a duration for the requested round
//! - Indicator matrices with values other than 0/1
//! - Negative inflow, spill or turbine capacity
//!
//! Conditions that depend on a unit's duration (duration longer than the
//! horizon, empty feasible set) and a degenerate inflow total are reported
//! by the components that need them, as dedicated
//! [`MaintenanceError`](crate::error::MaintenanceError) variants.

use crate::models::{BaselineOperation, PlantData, UnitDayMatrix};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No units or a zero-day horizon.
    EmptyPlant,
    /// A matrix or series does not match `units × horizon`.
    ShapeMismatch,
    /// A unit has no duration for the active round.
    MissingRound,
    /// An indicator matrix holds a value other than 0 or 1.
    NonBinaryIndicator,
    /// A quantity that must be non-negative is negative (or NaN).
    NegativeValue,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates plant data and baseline for one maintenance round.
///
/// Checks:
/// 1. At least one unit and one day
/// 2. Every unit × day matrix has the forced-outage shape
/// 3. Inflow and spill series span the horizon
/// 4. Every unit has a duration for `round`
/// 5. Indicator matrices are binary
/// 6. Inflow, spill and capacity are non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    plant: &PlantData,
    baseline: &BaselineOperation,
    round: usize,
) -> ValidationResult {
    let mut errors = Vec::new();
    let units = plant.unit_count();
    let horizon = plant.horizon();

    if units == 0 || horizon == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPlant,
            format!("Plant has {units} units over {horizon} days"),
        ));
        return Err(errors);
    }

    let mut check_shape = |name: &str, actual: (usize, usize)| {
        if actual != (units, horizon) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ShapeMismatch,
                format!(
                    "{name} is {}×{}, expected {units}×{horizon}",
                    actual.0, actual.1
                ),
            ));
        }
    };
    check_shape(
        "Previous calendar",
        (plant.previous_calendar.units(), plant.previous_calendar.days()),
    );
    check_shape(
        "Turbine capacity",
        (plant.capacity.table().units(), plant.capacity.table().days()),
    );
    check_shape(
        "Baseline operation",
        (baseline.state.units(), baseline.state.days()),
    );

    for (name, len) in [("Inflow", plant.inflow.len()), ("Baseline spill", baseline.spill.len())] {
        if len != horizon {
            errors.push(ValidationError::new(
                ValidationErrorKind::ShapeMismatch,
                format!("{name} has {len} days, expected {horizon}"),
            ));
        }
    }

    if plant.maintenance_duration.len() != units {
        errors.push(ValidationError::new(
            ValidationErrorKind::ShapeMismatch,
            format!(
                "Maintenance durations given for {} units, expected {units}",
                plant.maintenance_duration.len()
            ),
        ));
    }
    for (unit, rounds) in plant.maintenance_duration.iter().enumerate() {
        if rounds.get(round).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRound,
                format!("Unit {unit} has no duration for round {round}"),
            ));
        }
    }

    check_binary("Forced outage", &plant.forced_outage, &mut errors);
    check_binary("Previous calendar", &plant.previous_calendar, &mut errors);

    check_non_negative("Inflow", plant.inflow.iter().copied(), &mut errors);
    check_non_negative("Baseline spill", baseline.spill.iter().copied(), &mut errors);
    let table = plant.capacity.table();
    check_non_negative(
        "Turbine capacity",
        (0..table.units()).flat_map(|u| table.row(u).iter().copied()),
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_binary(name: &str, matrix: &UnitDayMatrix<u8>, errors: &mut Vec<ValidationError>) {
    for unit in 0..matrix.units() {
        if let Some(day) = matrix.row(unit).iter().position(|&v| v > 1) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonBinaryIndicator,
                format!(
                    "{name} has value {} for unit {unit} on day {day}",
                    matrix.get(unit, day)
                ),
            ));
        }
    }
}

fn check_non_negative(
    name: &str,
    values: impl Iterator<Item = f64>,
    errors: &mut Vec<ValidationError>,
) {
    // `!(v >= 0.0)` also catches NaN
    if let Some((idx, v)) = values.enumerate().find(|(_, v)| !(*v >= 0.0)) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeValue,
            format!("{name} has invalid value {v} at position {idx}"),
        ));
    }
}
