//! Generating unit descriptor for one maintenance round.

use serde::{Deserialize, Serialize};

/// A generating unit as seen by the optimizer.
///
/// Built by [`crate::feasibility::FeasibleDaySelector`]; the feasible set
/// is sorted ascending and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Row index in the plant matrices.
    pub index: usize,
    /// Maintenance duration for the active round (days).
    pub duration: usize,
    /// Earliest admissible start day.
    pub lower_bound: usize,
    /// Latest admissible start day (`horizon - duration`).
    pub upper_bound: usize,
    /// Days on which maintenance may start.
    pub feasible_days: Vec<usize>,
}

impl Unit {
    /// Whether `day` is a legal start day.
    #[inline]
    pub fn is_feasible(&self, day: usize) -> bool {
        self.feasible_days.binary_search(&day).is_ok()
    }

    /// Feasible day nearest to `value`; ties go to the earlier day.
    ///
    /// Returns `None` only for an empty feasible set.
    pub fn nearest_feasible(&self, value: f64) -> Option<usize> {
        let idx = self.feasible_days.partition_point(|&d| (d as f64) < value);
        let after = self.feasible_days.get(idx).copied();
        let before = idx
            .checked_sub(1)
            .and_then(|i| self.feasible_days.get(i))
            .copied();
        match (before, after) {
            (Some(b), Some(a)) => {
                if value - b as f64 <= a as f64 - value {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, a) => a,
        }
    }

    /// Days covered when maintenance starts on `start`.
    #[inline]
    pub fn window(&self, start: usize) -> std::ops::Range<usize> {
        start..start + self.duration
    }
}
