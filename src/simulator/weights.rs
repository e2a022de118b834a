//! Inflow weighting of daily spill.
//!
//! A day's spill counts in proportion to that day's share of the total
//! inflow: spilling on a wet day costs more than on a dry one.

use crate::error::{MaintenanceError, Result};

/// Per-day inflow shares (sum to 1).
#[derive(Debug, Clone, PartialEq)]
pub struct InflowWeights {
    shares: Vec<f64>,
}

impl InflowWeights {
    /// Builds shares from a daily inflow series.
    ///
    /// # Errors
    /// [`MaintenanceError::DegenerateInflow`] if the total is not positive
    /// and finite.
    pub fn new(inflow: &[f64]) -> Result<Self> {
        let total: f64 = inflow.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(MaintenanceError::DegenerateInflow { total });
        }
        Ok(Self {
            shares: inflow.iter().map(|q| q / total).collect(),
        })
    }

    /// Share of `day`.
    #[inline]
    pub fn share(&self, day: usize) -> f64 {
        self.shares[day]
    }

    /// Inflow-weighted total of a daily series.
    pub fn weigh(&self, daily: &[f64]) -> f64 {
        daily.iter().zip(&self.shares).map(|(v, w)| v * w).sum()
    }
}
