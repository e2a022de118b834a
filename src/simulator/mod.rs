//! Spillage simulation (fitness of a maintenance schedule).
//!
//! [`SpillageSimulator`] replays a schedule day by day against the baseline
//! operation and reports the resulting spill; [`InflowWeights`] turns the
//! daily spill into the scalar objective.

mod spillage;
mod weights;

pub use spillage::{SpillReport, SpillageSimulator};
pub use weights::InflowWeights;
