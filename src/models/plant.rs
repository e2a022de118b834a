//! Plant input data.
//!
//! Everything the planner reads about the hydro plant: per-unit outage and
//! previous-maintenance indicators, maintenance durations per round, the
//! inflow series, turbine capacities, and the baseline daily operation that
//! maintenance is simulated against.
//!
//! # Time Model
//! Days are zero-based indices into the planning horizon. The horizon
//! length is the column count of the unit × day matrices.

use serde::{Deserialize, Serialize};

use super::UnitDayMatrix;

/// Daily operation state of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationState {
    /// Available but not generating.
    Idle,
    /// Generating.
    Operating,
    /// Out for maintenance.
    Maintenance,
}

impl OperationState {
    /// Decodes the numeric encoding used by operation-planning tools
    /// (`0` idle, `1` operating, `2` maintenance).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Idle),
            1 => Some(Self::Operating),
            2 => Some(Self::Maintenance),
            _ => None,
        }
    }

    /// Numeric encoding of this state.
    pub fn code(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Operating => 1,
            Self::Maintenance => 2,
        }
    }
}

/// Maximum turbined flow per unit and day.
///
/// Most plants have a single rating per unit; [`TurbineCapacity::per_unit`]
/// spreads it over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineCapacity {
    table: UnitDayMatrix<f64>,
}

impl TurbineCapacity {
    /// Wraps a full unit × day capacity table.
    pub fn from_table(table: UnitDayMatrix<f64>) -> Self {
        Self { table }
    }

    /// Repeats one rating per unit over every day of the horizon.
    pub fn per_unit(ratings: &[f64], days: usize) -> Self {
        Self {
            table: UnitDayMatrix::from_fn(ratings.len(), days, |unit, _| ratings[unit]),
        }
    }

    /// Capacity of `unit` on `day`.
    #[inline]
    pub fn get(&self, unit: usize, day: usize) -> f64 {
        *self.table.get(unit, day)
    }

    /// Underlying table.
    pub fn table(&self) -> &UnitDayMatrix<f64> {
        &self.table
    }
}

/// Static plant data for one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantData {
    /// Forced-outage indicator (1 = unit unavailable that day).
    pub forced_outage: UnitDayMatrix<u8>,
    /// Maintenance already planned in the previous period (1 = in maintenance).
    pub previous_calendar: UnitDayMatrix<u8>,
    /// Maintenance duration in days, indexed `[unit][round]`.
    pub maintenance_duration: Vec<Vec<usize>>,
    /// Daily inflow, one value per horizon day.
    pub inflow: Vec<f64>,
    /// Turbine capacity table.
    pub capacity: TurbineCapacity,
}

impl PlantData {
    /// Creates plant data; checked later by [`crate::validation::validate_input`].
    pub fn new(
        forced_outage: UnitDayMatrix<u8>,
        previous_calendar: UnitDayMatrix<u8>,
        maintenance_duration: Vec<Vec<usize>>,
        inflow: Vec<f64>,
        capacity: TurbineCapacity,
    ) -> Self {
        Self {
            forced_outage,
            previous_calendar,
            maintenance_duration,
            inflow,
            capacity,
        }
    }

    /// Number of generating units.
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.forced_outage.units()
    }

    /// Planning horizon in days.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.forced_outage.days()
    }

    /// Per-unit durations for one maintenance round.
    ///
    /// Returns `None` if any unit lacks that round.
    pub fn durations(&self, round: usize) -> Option<Vec<usize>> {
        self.maintenance_duration
            .iter()
            .map(|rounds| rounds.get(round).copied())
            .collect()
    }
}

/// Baseline daily operation before maintenance is placed.
///
/// Treated as an immutable template: the spillage simulator clones it per
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineOperation {
    /// Operation state per unit and day.
    pub state: UnitDayMatrix<OperationState>,
    /// Spill per day without any maintenance.
    pub spill: Vec<f64>,
}

impl BaselineOperation {
    /// Creates a baseline.
    pub fn new(state: UnitDayMatrix<OperationState>, spill: Vec<f64>) -> Self {
        Self { state, spill }
    }

    /// Builds a baseline from the numeric state encoding.
    ///
    /// Returns `None` on ragged rows or unknown codes.
    pub fn from_codes(codes: Vec<Vec<u8>>, spill: Vec<f64>) -> Option<Self> {
        let rows = codes
            .into_iter()
            .map(|row| row.into_iter().map(OperationState::from_code).collect())
            .collect::<Option<Vec<Vec<_>>>>()?;
        Some(Self::new(UnitDayMatrix::from_rows(rows)?, spill))
    }
}
