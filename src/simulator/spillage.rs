//! Day-by-day spillage simulation of a maintenance schedule.
//!
//! # Algorithm
//!
//! Units are placed in decreasing order of maintenance duration (ties:
//! higher unit index first). For every day of a unit's window the unit is
//! marked as in maintenance. If it was generating that day, its flow must
//! go somewhere:
//!
//! 1. An idle unit with exactly the same capacity takes over, no spill.
//! 2. Otherwise any idle unit takes over and the capacity shortfall
//!    `max(removed - substitute, 0)` is spilled.
//! 3. With no idle unit at all, the removed unit's whole capacity is spilled.
//!
//! Substitutes are searched in unit index order.
//!
//! # Purity
//! The baseline is a template: every call works on its own copy of the
//! operation state and spill series, so calls may run concurrently.

use serde::{Deserialize, Serialize};

use crate::models::{BaselineOperation, OperationState, TurbineCapacity, UnitDayMatrix};

/// Outcome of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpillReport {
    /// Spill per day (baseline spill plus maintenance-induced spill).
    pub spill: Vec<f64>,
    /// Unit-days covered by an idle unit of equal capacity.
    pub equal_substitutions: usize,
    /// Unit-days covered by an idle unit of different capacity.
    pub unequal_substitutions: usize,
    /// Unit-days with no idle unit available.
    pub uncovered_days: usize,
}

impl SpillReport {
    /// Unweighted spill over the horizon.
    pub fn total_spill(&self) -> f64 {
        self.spill.iter().sum()
    }

    /// Spill caused by maintenance, relative to `baseline`.
    pub fn added_spill(&self, baseline: &BaselineOperation) -> f64 {
        self.total_spill() - baseline.spill.iter().sum::<f64>()
    }
}

/// Deterministic spillage simulator.
#[derive(Debug, Clone)]
pub struct SpillageSimulator {
    baseline: BaselineOperation,
    capacity: TurbineCapacity,
    durations: Vec<usize>,
    order: Vec<usize>,
}

impl SpillageSimulator {
    /// Creates a simulator for one maintenance round.
    pub fn new(
        baseline: BaselineOperation,
        capacity: TurbineCapacity,
        durations: Vec<usize>,
    ) -> Self {
        let mut order: Vec<usize> = (0..durations.len()).collect();
        order.sort_by(|&a, &b| durations[b].cmp(&durations[a]).then(b.cmp(&a)));
        Self {
            baseline,
            capacity,
            durations,
            order,
        }
    }

    /// Order in which units are placed.
    pub fn placement_order(&self) -> &[usize] {
        &self.order
    }

    /// Baseline template.
    pub fn baseline(&self) -> &BaselineOperation {
        &self.baseline
    }

    /// Simulates `start_days` (one per unit) against a copy of the baseline.
    ///
    /// Window days past the horizon are ignored.
    ///
    /// # Panics
    /// If `start_days` has fewer entries than there are units.
    pub fn simulate(&self, start_days: &[usize]) -> SpillReport {
        debug_assert_eq!(start_days.len(), self.durations.len());
        let mut state = self.baseline.state.clone();
        let mut report = SpillReport {
            spill: self.baseline.spill.clone(),
            equal_substitutions: 0,
            unequal_substitutions: 0,
            uncovered_days: 0,
        };
        let horizon = state.days();

        for &unit in &self.order {
            let start = start_days[unit];
            let end = (start + self.durations[unit]).min(horizon);
            for day in start..end {
                let previous = *state.get(unit, day);
                state.set(unit, day, OperationState::Maintenance);
                if previous != OperationState::Operating {
                    continue;
                }

                let removed = self.capacity.get(unit, day);
                if let Some(sub) = self.find_idle(&state, day, |c| c == removed) {
                    state.set(sub, day, OperationState::Operating);
                    report.equal_substitutions += 1;
                } else if let Some(sub) = self.find_idle(&state, day, |_| true) {
                    state.set(sub, day, OperationState::Operating);
                    report.spill[day] += (removed - self.capacity.get(sub, day)).max(0.0);
                    report.unequal_substitutions += 1;
                } else {
                    report.spill[day] += removed;
                    report.uncovered_days += 1;
                }
            }
        }

        report
    }

    /// First idle unit on `day` whose capacity satisfies `accept`.
    fn find_idle(
        &self,
        state: &UnitDayMatrix<OperationState>,
        day: usize,
        accept: impl Fn(f64) -> bool,
    ) -> Option<usize> {
        state
            .column(day)
            .find(|&(u, &s)| s == OperationState::Idle && accept(self.capacity.get(u, day)))
            .map(|(u, _)| u)
    }
}
