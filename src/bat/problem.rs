//! Problem definition for the bat optimizer.
//!
//! [`BatProblem`] is the contract between the generic generational loop in
//! [`BatRunner`](super::BatRunner) and a concrete search space. The loop
//! only moves continuous positions around; the problem knows how to draw a
//! random discrete position, how to repair a continuous one, and how to
//! score a discrete one.
//!
//! [`MaintenanceProblem`] is the hydro maintenance instance: positions are
//! start days, repair is the [`BoundsProjector`], scoring is inflow-weighted
//! spill from the [`SpillageSimulator`].

use rand::Rng;

use super::population::PopulationInitializer;
use super::projection::BoundsProjector;
use crate::error::Result;
use crate::models::{MaintenanceCalendar, Schedule, Unit};
use crate::simulator::{InflowWeights, SpillReport, SpillageSimulator};

/// A minimization problem over integer coordinates.
///
/// Must be `Send + Sync`: the runner may evaluate bats on the rayon pool.
pub trait BatProblem: Send + Sync {
    /// Number of coordinates of a position.
    fn dimension(&self) -> usize;

    /// Draws a random feasible position.
    fn random_position<R: Rng>(&self, rng: &mut R) -> Result<Vec<usize>>;

    /// Repairs a continuous candidate in place so that every coordinate is
    /// a feasible integer value.
    fn project(&self, candidate: &mut [f64]) -> Result<()>;

    /// Fitness of a discrete position (lower is better).
    fn evaluate(&self, position: &[usize]) -> f64;
}

/// Maintenance start-day selection for one round.
#[derive(Debug, Clone)]
pub struct MaintenanceProblem {
    units: Vec<Unit>,
    horizon: usize,
    projector: BoundsProjector,
    simulator: SpillageSimulator,
    weights: InflowWeights,
}

impl MaintenanceProblem {
    /// Assembles a problem from its components.
    pub fn new(
        units: Vec<Unit>,
        horizon: usize,
        projector: BoundsProjector,
        simulator: SpillageSimulator,
        weights: InflowWeights,
    ) -> Self {
        Self {
            units,
            horizon,
            projector,
            simulator,
            weights,
        }
    }

    /// Units with their feasible sets.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Planning horizon in days.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Full simulation report for a set of start days.
    pub fn simulate(&self, start_days: &[usize]) -> SpillReport {
        self.simulator.simulate(start_days)
    }

    /// Unit × day calendar of a schedule.
    pub fn calendar(&self, schedule: &Schedule) -> MaintenanceCalendar {
        PopulationInitializer::new(&self.units, self.horizon).materialize(schedule)
    }
}

impl BatProblem for MaintenanceProblem {
    fn dimension(&self) -> usize {
        self.units.len()
    }

    fn random_position<R: Rng>(&self, rng: &mut R) -> Result<Vec<usize>> {
        PopulationInitializer::new(&self.units, self.horizon)
            .draw_schedule(rng)
            .map(|schedule| schedule.start_days)
    }

    fn project(&self, candidate: &mut [f64]) -> Result<()> {
        self.projector.project(&self.units, candidate)
    }

    fn evaluate(&self, position: &[usize]) -> f64 {
        self.weights.weigh(&self.simulator.simulate(position).spill)
    }
}
