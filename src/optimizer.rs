//! End-to-end maintenance optimization for one round.
//!
//! # Pipeline
//!
//! 1. Input validation ([`validate_input`]) and config validation
//! 2. Feasible start days per unit ([`FeasibleDaySelector`])
//! 3. Inflow weights and spillage simulator for the round
//! 4. Bat search ([`BatRunner`])
//! 5. Best schedule materialized as a calendar and re-simulated
//!
//! # Example
//!
//! ```
//! use u_maintenance::bat::BatConfig;
//! use u_maintenance::models::{
//!     BaselineOperation, OperationState, PlantData, TurbineCapacity, UnitDayMatrix,
//! };
//! use u_maintenance::optimizer::MaintenanceOptimizer;
//!
//! let days = 12;
//! let plant = PlantData::new(
//!     UnitDayMatrix::filled(2, days, 0),
//!     UnitDayMatrix::filled(2, days, 0),
//!     vec![vec![3], vec![2]],
//!     vec![1.0; days],
//!     TurbineCapacity::per_unit(&[5.0, 5.0], days),
//! );
//! let baseline = BaselineOperation::new(
//!     UnitDayMatrix::filled(2, days, OperationState::Idle),
//!     vec![0.0; days],
//! );
//!
//! let result = MaintenanceOptimizer::new(plant, baseline)
//!     .with_config(BatConfig::default().with_generations(10).with_seed(42))
//!     .run()
//!     .unwrap();
//! assert_eq!(result.schedule.len(), 2);
//! assert_eq!(result.search.evolution.len(), 11);
//! ```

use serde::{Deserialize, Serialize};

use crate::bat::{
    BatConfig, BatResult, BatRunner, BoundsProjector, ExclusionBand, MaintenanceProblem,
};
use crate::error::{MaintenanceError, Result};
use crate::feasibility::{FeasibleDaySelector, SelectorConfig};
use crate::models::{BaselineOperation, MaintenanceCalendar, PlantData, Schedule, Unit};
use crate::simulator::{InflowWeights, SpillReport, SpillageSimulator};
use crate::validation::validate_input;

/// Outcome of [`MaintenanceOptimizer::run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Units with their feasible start days for the round.
    pub units: Vec<Unit>,
    /// Raw search outcome (best fitness, trace, counters).
    pub search: BatResult,
    /// Best schedule found.
    pub schedule: Schedule,
    /// Unit × day calendar of `schedule`.
    pub calendar: MaintenanceCalendar,
    /// Simulation of `schedule` against the baseline.
    pub report: SpillReport,
    /// Spill caused by maintenance (unweighted, over the horizon).
    pub added_spill: f64,
}

/// Plans one maintenance round of a hydro plant.
#[derive(Debug, Clone)]
pub struct MaintenanceOptimizer {
    plant: PlantData,
    baseline: BaselineOperation,
    round: usize,
    config: BatConfig,
    selector: SelectorConfig,
    band: ExclusionBand,
}

impl MaintenanceOptimizer {
    /// Creates an optimizer for round 0 with default settings.
    pub fn new(plant: PlantData, baseline: BaselineOperation) -> Self {
        Self {
            plant,
            baseline,
            round: 0,
            config: BatConfig::default(),
            selector: SelectorConfig::default(),
            band: ExclusionBand::default(),
        }
    }

    /// Sets the active maintenance round.
    pub fn with_round(mut self, round: usize) -> Self {
        self.round = round;
        self
    }

    /// Sets the bat hyperparameters.
    pub fn with_config(mut self, config: BatConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the start-day restriction policy.
    pub fn with_selector(mut self, selector: SelectorConfig) -> Self {
        self.selector = selector;
        self
    }

    /// Sets the projector's exclusion band.
    pub fn with_band(mut self, band: ExclusionBand) -> Self {
        self.band = band;
        self
    }

    /// Builds the search problem without running it.
    ///
    /// # Errors
    /// Input, configuration, horizon, feasibility and inflow errors.
    pub fn problem(&self) -> Result<MaintenanceProblem> {
        validate_input(&self.plant, &self.baseline, self.round)?;
        self.config.validate()?;

        let durations = self.plant.durations(self.round).ok_or_else(|| {
            MaintenanceError::InvalidConfig(format!(
                "round {} is not defined for every unit",
                self.round
            ))
        })?;
        let units = FeasibleDaySelector::new(self.selector.clone()).select(
            &self.plant.forced_outage,
            &self.plant.previous_calendar,
            &durations,
        )?;
        let weights = InflowWeights::new(&self.plant.inflow)?;
        let simulator = SpillageSimulator::new(
            self.baseline.clone(),
            self.plant.capacity.clone(),
            durations,
        );

        Ok(MaintenanceProblem::new(
            units,
            self.plant.horizon(),
            BoundsProjector::new(self.band),
            simulator,
            weights,
        ))
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    /// Everything [`problem`](Self::problem) raises, plus
    /// [`MaintenanceError::ProjectionFailure`] from the search.
    pub fn run(&self) -> Result<OptimizationResult> {
        tracing::info!(
            units = self.plant.unit_count(),
            horizon = self.plant.horizon(),
            round = self.round,
            population = self.config.population_size,
            generations = self.config.generations,
            "maintenance optimization started"
        );

        let problem = self.problem()?;
        let search = BatRunner::run(&problem, &self.config)?;

        let schedule = Schedule::new(search.best_position.clone());
        let calendar = problem.calendar(&schedule);
        let report = problem.simulate(&schedule.start_days);
        let added_spill = report.added_spill(&self.baseline);

        tracing::info!(
            best = search.best_fitness,
            added_spill,
            accepted_moves = search.accepted_moves,
            "maintenance optimization finished"
        );

        Ok(OptimizationResult {
            units: problem.units().to_vec(),
            search,
            schedule,
            calendar,
            report,
            added_spill,
        })
    }
}
