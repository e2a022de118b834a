//! Bat-algorithm optimization of maintenance start days.
//!
//! A bat is a continuous position (one coordinate per unit) with a
//! velocity, a loudness and a pulse rate. Each generation moves every bat
//! toward the global best, sometimes replaces the move by a local walk
//! around the best, projects the result back onto feasible start days and
//! keeps it when the bat's acceptance test passes.
//!
//! # Submodules
//!
//! - [`config`]: run hyperparameters
//! - [`problem`]: the [`BatProblem`] seam and the maintenance instance
//! - [`population`]: initial schedules and per-bat state
//! - [`projection`]: bounds and feasibility repair
//! - [`runner`]: the generational loop
//!
//! # Reference
//! Yang (2010), "A New Metaheuristic Bat-Inspired Algorithm", in
//! Nature Inspired Cooperative Strategies for Optimization, pp. 65-74.

pub mod config;
pub mod population;
pub mod problem;
pub mod projection;
pub mod runner;

pub use config::BatConfig;
pub use population::{discretize, Bat, PopulationInitializer};
pub use problem::{BatProblem, MaintenanceProblem};
pub use projection::{BoundsProjector, ExclusionBand};
pub use runner::{BatResult, BatRunner, GlobalBest};
