//! Bounds and feasibility projection.
//!
//! Bat moves are continuous and may leave the admissible region. The
//! projector repairs each coordinate:
//!
//! 1. Clamp to `[lower_bound, upper_bound]` (`upper_bound = horizon - duration`).
//! 2. A value strictly inside the exclusion band `(low, high)` jumps to the
//!    closer edge; an exact tie goes to `low`. A value that already is a
//!    feasible day stays put, which keeps projection idempotent for units
//!    whose feasible set reaches into the band.
//! 3. Snap to the nearest feasible start day; ties go to the earlier day.
//!
//! The default band `(30, 150)` spans roughly February to May of a
//! January-based horizon.

use serde::{Deserialize, Serialize};

use crate::error::{MaintenanceError, Result};
use crate::models::Unit;

/// Middle band of the horizon that start positions are pushed out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionBand {
    /// Lower edge (day).
    pub low: usize,
    /// Upper edge (day).
    pub high: usize,
}

impl Default for ExclusionBand {
    fn default() -> Self {
        Self { low: 30, high: 150 }
    }
}

impl ExclusionBand {
    /// Creates a band.
    pub fn new(low: usize, high: usize) -> Self {
        Self { low, high }
    }

    /// Moves `value` to the nearer edge if it lies strictly inside the band.
    pub fn push_out(&self, value: f64) -> f64 {
        let (low, high) = (self.low as f64, self.high as f64);
        if low < value && value < high {
            if value - low <= high - value {
                low
            } else {
                high
            }
        } else {
            value
        }
    }
}

/// Repairs continuous candidates into feasible start days.
#[derive(Debug, Clone, Default)]
pub struct BoundsProjector {
    band: ExclusionBand,
}

impl BoundsProjector {
    /// Creates a projector with the given exclusion band.
    pub fn new(band: ExclusionBand) -> Self {
        Self { band }
    }

    /// Projects a single coordinate for `unit`.
    ///
    /// # Errors
    /// [`MaintenanceError::ProjectionFailure`] if the unit has no feasible day.
    pub fn project_value(&self, unit: &Unit, value: f64) -> Result<f64> {
        let clamped = if value.is_nan() {
            unit.lower_bound as f64
        } else {
            value.clamp(unit.lower_bound as f64, unit.upper_bound as f64)
        };
        let banded = if clamped.fract() == 0.0 && unit.is_feasible(clamped as usize) {
            clamped
        } else {
            self.band.push_out(clamped)
        };
        unit.nearest_feasible(banded)
            .filter(|&day| unit.is_feasible(day))
            .map(|day| day as f64)
            .ok_or(MaintenanceError::ProjectionFailure {
                unit: unit.index,
                value,
            })
    }

    /// Projects every coordinate of `candidate` in place.
    pub fn project(&self, units: &[Unit], candidate: &mut [f64]) -> Result<()> {
        for (unit, value) in units.iter().zip(candidate.iter_mut()) {
            *value = self.project_value(unit, *value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(feasible_days: Vec<usize>, upper_bound: usize) -> Unit {
        Unit {
            index: 0,
            duration: 10,
            lower_bound: 0,
            upper_bound,
            feasible_days,
        }
    }

    #[test]
    fn test_band_push_out() {
        let band = ExclusionBand::default();
        assert_eq!(band.push_out(31.0), 30.0);
        assert_eq!(band.push_out(89.9), 30.0);
        assert_eq!(band.push_out(90.0), 30.0); // tie → lower edge
        assert_eq!(band.push_out(90.1), 150.0);
        assert_eq!(band.push_out(149.5), 150.0);
        assert_eq!(band.push_out(30.0), 30.0); // edges are outside
        assert_eq!(band.push_out(150.0), 150.0);
        assert_eq!(band.push_out(12.0), 12.0);
    }

    #[test]
    fn test_clamps_then_snaps() {
        let u = unit((0..=200).collect(), 200);
        let p = BoundsProjector::default();
        assert_eq!(p.project_value(&u, -17.3).unwrap(), 0.0);
        assert_eq!(p.project_value(&u, 512.0).unwrap(), 200.0);
        assert_eq!(p.project_value(&u, 120.5).unwrap(), 150.0);
        assert_eq!(p.project_value(&u, 120.0).unwrap(), 120.0);
        assert_eq!(p.project_value(&u, 160.4).unwrap(), 160.0);
        assert_eq!(p.project_value(&u, f64::NAN).unwrap(), 0.0);
    }

    #[test]
    fn test_band_then_nearest_feasible() {
        // 150 itself is infeasible: the band edge snaps to 155.
        let u = unit(vec![10, 155, 170], 200);
        let p = BoundsProjector::default();
        assert_eq!(p.project_value(&u, 140.0).unwrap(), 155.0);
        assert_eq!(p.project_value(&u, 40.0).unwrap(), 10.0);
    }

    #[test]
    fn test_projection_idempotent_on_feasible_days() {
        let u = unit(vec![3, 8, 21, 150, 151, 199], 200);
        let p = BoundsProjector::default();
        for &day in &u.feasible_days {
            let once = p.project_value(&u, day as f64).unwrap();
            assert_eq!(once, day as f64);
            assert_eq!(p.project_value(&u, once).unwrap(), once);
        }
    }

    #[test]
    fn test_feasible_day_inside_band_is_kept() {
        // Fallback units may have feasible days inside the band.
        let u = unit((0..=149).collect(), 149);
        let p = BoundsProjector::default();
        assert_eq!(p.project_value(&u, 100.0).unwrap(), 100.0);
        assert_eq!(p.project_value(&u, 100.5).unwrap(), 30.0);
        assert_eq!(p.project_value(&u, 120.2).unwrap(), 149.0);
    }

    #[test]
    fn test_result_always_feasible() {
        let u = unit(vec![0, 33, 152, 180], 190);
        let p = BoundsProjector::default();
        let mut v = -50.0;
        while v < 300.0 {
            let day = p.project_value(&u, v).unwrap();
            assert!(u.is_feasible(day as usize), "{v} projected to {day}");
            v += 0.7;
        }
    }

    #[test]
    fn test_empty_set_fails_loudly() {
        let u = unit(vec![], 20);
        let err = BoundsProjector::default().project_value(&u, 4.0).unwrap_err();
        assert!(matches!(err, MaintenanceError::ProjectionFailure { unit: 0, .. }));
    }

    #[test]
    fn test_project_vector() {
        let units = vec![unit(vec![2, 4], 6), unit(vec![160], 170)];
        let mut candidate = vec![3.6, 12.0];
        BoundsProjector::default().project(&units, &mut candidate).unwrap();
        assert_eq!(candidate, vec![4.0, 160.0]);
    }
}
