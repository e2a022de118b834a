//! Maintenance schedule (solution) model.
//!
//! A schedule assigns one maintenance start day to every unit. The derived
//! calendar is the unit × day 0/1 view of the same decision: 1 exactly on
//! `[start, start + duration)`.

use serde::{Deserialize, Serialize};

use super::{Unit, UnitDayMatrix};

/// One start day per unit (indexed by unit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Maintenance start day of each unit.
    pub start_days: Vec<usize>,
}

impl Schedule {
    /// Creates a schedule from start days.
    pub fn new(start_days: Vec<usize>) -> Self {
        Self { start_days }
    }

    /// Number of scheduled units.
    #[inline]
    pub fn len(&self) -> usize {
        self.start_days.len()
    }

    /// Whether the schedule is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_days.is_empty()
    }

    /// Start day of `unit`.
    #[inline]
    pub fn start_of(&self, unit: usize) -> Option<usize> {
        self.start_days.get(unit).copied()
    }

    /// Whether every start day lies in its unit's feasible set and the
    /// window ends inside the horizon.
    pub fn is_feasible(&self, units: &[Unit], horizon: usize) -> bool {
        self.start_days.len() == units.len()
            && units.iter().zip(&self.start_days).all(|(unit, &start)| {
                start + unit.duration <= horizon && unit.is_feasible(start)
            })
    }

    /// Materializes the unit × day maintenance calendar.
    pub fn calendar(&self, durations: &[usize], horizon: usize) -> MaintenanceCalendar {
        let mut grid = UnitDayMatrix::filled(self.start_days.len(), horizon, 0u8);
        for (unit, (&start, &duration)) in self.start_days.iter().zip(durations).enumerate() {
            for day in start..(start + duration).min(horizon) {
                grid.set(unit, day, 1);
            }
        }
        MaintenanceCalendar { grid }
    }
}

/// Unit × day maintenance indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCalendar {
    grid: UnitDayMatrix<u8>,
}

impl MaintenanceCalendar {
    /// Whether `unit` is in maintenance on `day`.
    #[inline]
    pub fn in_maintenance(&self, unit: usize, day: usize) -> bool {
        *self.grid.get(unit, day) == 1
    }

    /// Number of units in maintenance on `day`.
    pub fn units_out(&self, day: usize) -> usize {
        self.grid.column(day).filter(|&(_, &v)| v == 1).count()
    }

    /// Total maintenance unit-days.
    pub fn total_unit_days(&self) -> usize {
        (0..self.grid.units())
            .map(|u| self.grid.row(u).iter().filter(|&&v| v == 1).count())
            .sum()
    }

    /// Underlying 0/1 matrix.
    pub fn as_matrix(&self) -> &UnitDayMatrix<u8> {
        &self.grid
    }
}
