//! Feasible maintenance start days.
//!
//! A start day `s` is illegal for a unit when `[s, s + duration)` touches a
//! forced-outage day or a day already reserved by the previous maintenance
//! calendar, and when it falls in the last `duration` days of the horizon.
//!
//! The legal days are then restricted to the later part of the horizon
//! (`s >= early_horizon_threshold`, default day 150). When that restriction
//! leaves nothing, the unit falls back to every legal day.
//!
//! # Example
//! ```
//! use u_maintenance::feasibility::{FeasibleDaySelector, SelectorConfig};
//! use u_maintenance::models::UnitDayMatrix;
//!
//! let outage = UnitDayMatrix::filled(1, 10, 0u8);
//! let previous = UnitDayMatrix::filled(1, 10, 0u8);
//! let selector = FeasibleDaySelector::new(SelectorConfig::default());
//! let units = selector.select(&outage, &previous, &[3]).unwrap();
//! // Horizon is shorter than the threshold: fallback keeps days 0..7.
//! assert_eq!(units[0].feasible_days, vec![0, 1, 2, 3, 4, 5, 6]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MaintenanceError, Result};
use crate::models::{Unit, UnitDayMatrix};

/// Day from which maintenance starts are preferred.
pub const DEFAULT_EARLY_HORIZON_THRESHOLD: usize = 150;

/// Start-day restriction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Only days `>=` this are kept, unless none remain.
    pub early_horizon_threshold: usize,
    /// When set, days `<=` this value are kept alongside the threshold days.
    /// Disabled by default.
    pub early_window: Option<usize>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            early_horizon_threshold: DEFAULT_EARLY_HORIZON_THRESHOLD,
            early_window: None,
        }
    }
}

impl SelectorConfig {
    /// Sets the early-horizon threshold.
    pub fn with_threshold(mut self, day: usize) -> Self {
        self.early_horizon_threshold = day;
        self
    }

    /// Also keeps start days up to and including `day`.
    pub fn with_early_window(mut self, day: usize) -> Self {
        self.early_window = Some(day);
        self
    }
}

/// Computes the feasible start-day set of every unit.
#[derive(Debug, Clone, Default)]
pub struct FeasibleDaySelector {
    config: SelectorConfig,
}

impl FeasibleDaySelector {
    /// Creates a selector.
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Builds one [`Unit`] per row of `forced_outage`.
    ///
    /// # Errors
    /// - [`MaintenanceError::InvalidHorizon`] if a duration exceeds the horizon.
    /// - [`MaintenanceError::EmptyFeasibleSet`] if a unit has no legal day at all.
    pub fn select(
        &self,
        forced_outage: &UnitDayMatrix<u8>,
        previous_calendar: &UnitDayMatrix<u8>,
        durations: &[usize],
    ) -> Result<Vec<Unit>> {
        let horizon = forced_outage.days();
        durations
            .iter()
            .enumerate()
            .map(|(unit, &duration)| {
                if duration > horizon {
                    return Err(MaintenanceError::InvalidHorizon {
                        unit,
                        duration,
                        horizon,
                    });
                }
                let legal = legal_start_days(
                    forced_outage.row(unit),
                    previous_calendar.row(unit),
                    duration,
                );
                let feasible_days = self.restrict(unit, legal)?;
                Ok(Unit {
                    index: unit,
                    duration,
                    lower_bound: 0,
                    upper_bound: horizon - duration,
                    feasible_days,
                })
            })
            .collect()
    }

    fn restrict(&self, unit: usize, legal: Vec<usize>) -> Result<Vec<usize>> {
        if legal.is_empty() {
            return Err(MaintenanceError::EmptyFeasibleSet { unit });
        }
        let threshold = self.config.early_horizon_threshold;
        let restricted: Vec<usize> = legal
            .iter()
            .copied()
            .filter(|&d| {
                d >= threshold || self.config.early_window.is_some_and(|w| d <= w)
            })
            .collect();

        if restricted.is_empty() {
            tracing::warn!(
                unit,
                threshold,
                legal_days = legal.len(),
                "no start day past threshold, using all legal days"
            );
            Ok(legal)
        } else {
            Ok(restricted)
        }
    }
}

/// Legal start days for one unit, ascending.
fn legal_start_days(outage: &[u8], previous: &[u8], duration: usize) -> Vec<usize> {
    let horizon = outage.len();
    let mut blocked = vec![false; horizon];

    for (day, _) in outage
        .iter()
        .zip(previous)
        .enumerate()
        .filter(|&(_, (&o, &p))| o == 1 || p == 1)
    {
        // Any window [s, s + duration) containing `day`
        let first = (day + 1).saturating_sub(duration);
        blocked[first..=day].iter_mut().for_each(|b| *b = true);
    }
    // Maintenance must end inside the horizon.
    blocked[horizon - duration..].iter_mut().for_each(|b| *b = true);

    blocked
        .iter()
        .enumerate()
        .filter(|&(_, &b)| !b)
        .map(|(d, _)| d)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(units: usize, days: usize) -> UnitDayMatrix<u8> {
        UnitDayMatrix::filled(units, days, 0)
    }

    #[test]
    fn test_tail_days_are_infeasible() {
        let selector = FeasibleDaySelector::default();
        let units = selector.select(&empty(1, 10), &empty(1, 10), &[4]).unwrap();
        assert_eq!(units[0].feasible_days, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(units[0].upper_bound, 6);
        assert_eq!(units[0].duration, 4);
    }

    #[test]
    fn test_forced_outage_blocks_overlapping_starts() {
        let mut outage = empty(1, 12);
        outage.set(0, 6, 1);
        let selector = FeasibleDaySelector::default();
        let units = selector.select(&outage, &empty(1, 12), &[3]).unwrap();
        // Windows starting on 4, 5 or 6 would cover day 6.
        assert_eq!(units[0].feasible_days, vec![0, 1, 2, 3, 7, 8]);
    }

    #[test]
    fn test_previous_calendar_blocks_starts() {
        let mut previous = empty(2, 10);
        previous.set(1, 0, 1);
        previous.set(1, 1, 1);
        let selector = FeasibleDaySelector::default();
        let units = selector.select(&empty(2, 10), &previous, &[2, 2]).unwrap();
        assert_eq!(units[0].feasible_days, (0..=7).collect::<Vec<_>>());
        assert_eq!(units[1].feasible_days, (2..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_blocked_day_inside_any_window() {
        let mut outage = empty(1, 40);
        let mut previous = empty(1, 40);
        for d in [3, 17, 18, 31] {
            outage.set(0, d, 1);
        }
        previous.set(0, 25, 1);
        let selector = FeasibleDaySelector::default();
        let unit = &selector.select(&outage, &previous, &[5]).unwrap()[0];

        for &start in &unit.feasible_days {
            assert!(start + unit.duration <= 40);
            for day in unit.window(start) {
                assert_eq!(*outage.get(0, day), 0, "start {start} covers outage day {day}");
                assert_eq!(*previous.get(0, day), 0, "start {start} covers previous day {day}");
            }
        }
    }

    #[test]
    fn test_threshold_restriction() {
        let selector = FeasibleDaySelector::default();
        let unit = &selector.select(&empty(1, 160), &empty(1, 160), &[5]).unwrap()[0];
        // Legal days 0..=154, threshold keeps 150..=154.
        assert_eq!(unit.feasible_days, vec![150, 151, 152, 153, 154]);
    }

    #[test]
    fn test_threshold_fallback_boundary() {
        // Horizon 160, duration 10: the last legal start is 149, one day
        // short of the threshold, so every legal day is kept.
        let selector = FeasibleDaySelector::default();
        let unit = &selector.select(&empty(1, 160), &empty(1, 160), &[10]).unwrap()[0];
        assert_eq!(unit.feasible_days.len(), 150);
        assert_eq!(unit.feasible_days.first(), Some(&0));
        assert_eq!(unit.feasible_days.last(), Some(&149));

        // Duration 9 makes day 150 legal: only it survives the restriction.
        let unit = &selector.select(&empty(1, 160), &empty(1, 160), &[9]).unwrap()[0];
        assert_eq!(unit.feasible_days, vec![150]);
    }

    #[test]
    fn test_early_window_opt_in() {
        let selector =
            FeasibleDaySelector::new(SelectorConfig::default().with_early_window(30));
        let unit = &selector.select(&empty(1, 160), &empty(1, 160), &[5]).unwrap()[0];
        assert_eq!(unit.feasible_days.len(), 31 + 5);
        assert!(unit.is_feasible(30));
        assert!(!unit.is_feasible(31));
        assert!(unit.is_feasible(150));
    }

    #[test]
    fn test_invalid_horizon() {
        let selector = FeasibleDaySelector::default();
        let err = selector.select(&empty(1, 5), &empty(1, 5), &[6]).unwrap_err();
        assert_eq!(
            err,
            MaintenanceError::InvalidHorizon {
                unit: 0,
                duration: 6,
                horizon: 5
            }
        );
    }

    #[test]
    fn test_empty_feasible_set() {
        let mut outage = empty(2, 6);
        for d in 0..6 {
            outage.set(1, d, 1);
        }
        let selector = FeasibleDaySelector::default();
        let err = selector.select(&outage, &empty(2, 6), &[2, 2]).unwrap_err();
        assert_eq!(err, MaintenanceError::EmptyFeasibleSet { unit: 1 });
    }

    #[test]
    fn test_duration_equal_to_horizon_has_no_start() {
        let selector = FeasibleDaySelector::default();
        let err = selector.select(&empty(1, 5), &empty(1, 5), &[5]).unwrap_err();
        assert_eq!(err, MaintenanceError::EmptyFeasibleSet { unit: 0 });
    }

    #[test]
    fn test_zero_duration() {
        let selector = FeasibleDaySelector::new(SelectorConfig::default().with_threshold(3));
        let unit = &selector.select(&empty(1, 5), &empty(1, 5), &[0]).unwrap()[0];
        assert_eq!(unit.feasible_days, vec![3, 4]);
        assert_eq!(unit.upper_bound, 5);
    }
}
