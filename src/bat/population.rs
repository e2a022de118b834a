//! Initial population and per-bat state.
//!
//! [`PopulationInitializer`] draws schedules uniformly from each unit's
//! feasible start days. [`Bat`] carries the optimizer state of one
//! individual across generations.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::problem::BatProblem;
use crate::error::{MaintenanceError, Result};
use crate::models::{MaintenanceCalendar, Schedule, Unit};

/// Draws random feasible schedules.
#[derive(Debug, Clone, Copy)]
pub struct PopulationInitializer<'a> {
    units: &'a [Unit],
    horizon: usize,
}

impl<'a> PopulationInitializer<'a> {
    /// Creates an initializer over the given units.
    pub fn new(units: &'a [Unit], horizon: usize) -> Self {
        Self { units, horizon }
    }

    /// One start day per unit, each uniform over the unit's feasible set.
    ///
    /// # Errors
    /// [`MaintenanceError::EmptyFeasibleSet`] if a unit has no feasible day.
    pub fn draw_schedule<R: Rng>(&self, rng: &mut R) -> Result<Schedule> {
        self.units
            .iter()
            .map(|unit| {
                unit.feasible_days
                    .choose(rng)
                    .copied()
                    .ok_or(MaintenanceError::EmptyFeasibleSet { unit: unit.index })
            })
            .collect::<Result<Vec<_>>>()
            .map(Schedule::new)
    }

    /// Unit × day calendar of `schedule`.
    pub fn materialize(&self, schedule: &Schedule) -> MaintenanceCalendar {
        let durations: Vec<usize> = self.units.iter().map(|u| u.duration).collect();
        schedule.calendar(&durations, self.horizon)
    }
}

/// Optimizer state of one individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bat {
    /// Current (accepted) position, one coordinate per unit.
    pub position: Vec<f64>,
    /// Velocity, one component per unit.
    pub velocity: Vec<f64>,
    /// Acceptance probability; decays on every accepted move.
    pub loudness: f64,
    /// Local-search probability; grows on every accepted move.
    pub pulse_rate: f64,
    /// Fitness of `position`.
    pub fitness: f64,
}

impl Bat {
    /// A bat at rest on `start_days`: zero velocity, loudness 1, pulse rate 0.
    pub fn new(start_days: &[usize], fitness: f64) -> Self {
        Self {
            position: start_days.iter().map(|&d| d as f64).collect(),
            velocity: vec![0.0; start_days.len()],
            loudness: 1.0,
            pulse_rate: 0.0,
            fitness,
        }
    }

    /// Draws and scores a fresh bat.
    pub fn spawn<P: BatProblem, R: Rng>(problem: &P, rng: &mut R) -> Result<Self> {
        let start_days = problem.random_position(rng)?;
        let fitness = problem.evaluate(&start_days);
        Ok(Self::new(&start_days, fitness))
    }

    /// Position rounded up to whole days.
    pub fn start_days(&self) -> Vec<usize> {
        discretize(&self.position)
    }
}

/// Rounds every coordinate up to the next whole day.
///
/// Negative coordinates map to day 0.
pub fn discretize(position: &[f64]) -> Vec<usize> {
    position.iter().map(|&x| x.ceil().max(0.0) as usize).collect()
}
