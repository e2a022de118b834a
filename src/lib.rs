//! Maintenance scheduling for hydroelectric generating units.
//!
//! Chooses one maintenance start day per unit over a planning horizon so
//! that the water spilled because of missing turbine capacity is as small
//! as possible. The search is a bat-algorithm metaheuristic whose fitness
//! is a day-by-day spillage simulation weighted by daily inflow.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `UnitDayMatrix`, `PlantData`,
//!   `BaselineOperation`, `Unit`, `Schedule`, `MaintenanceCalendar`
//! - **`validation`**: Input integrity checks (shapes, rounds, value domains)
//! - **`feasibility`**: Legal start days per unit
//! - **`simulator`**: Spillage simulation and inflow weighting
//! - **`bat`**: Bat-algorithm search (config, problem, projection, loop)
//! - **`optimizer`**: End-to-end facade for one maintenance round
//! - **`error`**: Error taxonomy
//!
//! # Logging
//!
//! The crate emits `tracing` events and spans but installs no subscriber.
//!
//! # References
//!
//! - Yang (2010), "A New Metaheuristic Bat-Inspired Algorithm"
//! - Yang & Gandomi (2012), "Bat algorithm: a novel approach for global
//!   engineering optimization"

pub mod bat;
pub mod error;
pub mod feasibility;
pub mod models;
pub mod optimizer;
pub mod simulator;
pub mod validation;

pub use error::{MaintenanceError, Result};
pub use optimizer::{MaintenanceOptimizer, OptimizationResult};
