//! Dense unit × day matrix.
//!
//! Every per-unit, per-day input of the planner (forced outages, previous
//! maintenance calendar, operation state, turbine capacity) shares this
//! layout: one row per generating unit, one column per horizon day.
//!
//! # Layout
//! Row-major `Vec<T>`, so a unit's whole horizon is a contiguous slice.

use serde::{Deserialize, Serialize};

/// A rectangular unit × day matrix.
///
/// Deserialization rejects a `data` length other than `units * days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawMatrix<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct UnitDayMatrix<T> {
    units: usize,
    days: usize,
    data: Vec<T>,
}

/// Wire form of [`UnitDayMatrix`] before the length check.
#[derive(Deserialize)]
struct RawMatrix<T> {
    units: usize,
    days: usize,
    data: Vec<T>,
}

impl<T> TryFrom<RawMatrix<T>> for UnitDayMatrix<T> {
    type Error = String;

    fn try_from(raw: RawMatrix<T>) -> Result<Self, Self::Error> {
        if raw.units.checked_mul(raw.days) != Some(raw.data.len()) {
            return Err(format!(
                "matrix of {}×{} needs {} values, got {}",
                raw.units,
                raw.days,
                raw.units.saturating_mul(raw.days),
                raw.data.len()
            ));
        }
        Ok(Self {
            units: raw.units,
            days: raw.days,
            data: raw.data,
        })
    }
}

impl<T: Clone> UnitDayMatrix<T> {
    /// Creates a matrix filled with `value`.
    pub fn filled(units: usize, days: usize, value: T) -> Self {
        Self {
            units,
            days,
            data: vec![value; units * days],
        }
    }

    /// Builds a matrix by evaluating `f(unit, day)` for every cell.
    pub fn from_fn(units: usize, days: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(units * days);
        for unit in 0..units {
            for day in 0..days {
                data.push(f(unit, day));
            }
        }
        Self { units, days, data }
    }

    /// Builds a matrix from one row per unit.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let units = rows.len();
        let days = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != days) {
            return None;
        }
        Some(Self {
            units,
            days,
            data: rows.into_iter().flatten().collect(),
        })
    }
}

impl<T> UnitDayMatrix<T> {
    /// Number of units (rows).
    #[inline]
    pub fn units(&self) -> usize {
        self.units
    }

    /// Number of days (columns).
    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    /// Value for `unit` on `day`.
    ///
    /// # Panics
    /// If either index is out of range.
    #[inline]
    pub fn get(&self, unit: usize, day: usize) -> &T {
        assert!(day < self.days, "day {day} out of range (horizon {})", self.days);
        &self.data[unit * self.days + day]
    }

    /// Sets the value for `unit` on `day`.
    #[inline]
    pub fn set(&mut self, unit: usize, day: usize, value: T) {
        assert!(day < self.days, "day {day} out of range (horizon {})", self.days);
        self.data[unit * self.days + day] = value;
    }

    /// The whole horizon of one unit.
    #[inline]
    pub fn row(&self, unit: usize) -> &[T] {
        &self.data[unit * self.days..(unit + 1) * self.days]
    }

    /// Iterates over `(unit, value)` for one day.
    pub fn column(&self, day: usize) -> impl Iterator<Item = (usize, &T)> + '_ {
        (0..self.units).map(move |u| (u, self.get(u, day)))
    }

    /// Whether the matrix has the expected shape.
    pub fn has_shape(&self, units: usize, days: usize) -> bool {
        self.units == units && self.days == days
    }
}
