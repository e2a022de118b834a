//! Maintenance planning domain models.
//!
//! Provides the data types shared by feasibility analysis, spillage
//! simulation and the optimizer.
//!
//! # Domain Mappings
//!
//! | u-maintenance | Hydro plant | Optimizer |
//! |---------------|-------------|-----------|
//! | Unit | Generating unit (UG) | One decision variable |
//! | Schedule | Maintenance start days | Individual / bat position |
//! | MaintenanceCalendar | Unit × day outage plan | Decoded individual |
//! | BaselineOperation | Dispatch before maintenance | Fitness template |

mod matrix;
mod plant;
mod schedule;
mod unit;

pub use matrix::UnitDayMatrix;
pub use plant::{BaselineOperation, OperationState, PlantData, TurbineCapacity};
pub use schedule::{MaintenanceCalendar, Schedule};
pub use unit::Unit;
