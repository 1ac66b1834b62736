use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::Weekday;
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};

use crate::days::Day;
use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::periods::Period;
use crate::windows::sliding_windows;

/// Contract length of a regular shift, in hours.
pub const REGULAR_SHIFT_DURATION: u32 = 8;

/// An atomic work assignment slot: one period on one day.
///
/// Ordering is `(day, period)`. Equality and hash ignore the duration, so a
/// shift keys the same variable-table entry regardless of how long it runs.
#[derive(Debug, Clone, Copy, Derivative, Serialize, Deserialize)]
#[derivative(PartialEq, Eq, Hash)]
pub struct Shift {
    pub period: Period,
    pub day: Day,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub duration: u32,
}

impl Shift {
    pub fn new(period: Period, day: Day) -> Self {
        Self {
            period,
            day,
            duration: REGULAR_SHIFT_DURATION,
        }
    }

    pub fn with_duration(period: Period, day: Day, duration: u32) -> Self {
        Self {
            period,
            day,
            duration,
        }
    }
}

impl Ord for Shift {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then_with(|| self.period.cmp(&other.period))
    }
}

impl PartialOrd for Shift {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shift on {}", self.period, self.day)
    }
}

/// A demanded shift: how many employees must staff it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub shift: Shift,
    pub n_employees: u32,
}

impl Slot {
    pub fn new(shift: Shift, n_employees: u32) -> Self {
        Self { shift, n_employees }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}, for {} employee(s)", self.shift, self.n_employees)
    }
}

/// A shift with the employees planned onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planned {
    pub shift: Shift,
    pub employee_ids: BTreeSet<EmployeeId>,
}

impl Planned {
    pub fn new(shift: Shift) -> Self {
        Self {
            shift,
            employee_ids: BTreeSet::new(),
        }
    }

    pub fn assign(&mut self, employee_id: EmployeeId) {
        self.employee_ids.insert(employee_id);
    }

    /// Whether at least `target` employees are planned on.
    pub fn is_complete(&self, target: u32) -> bool {
        self.employee_ids.len() >= target as usize
    }
}

impl fmt::Display for Planned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "planned {}", self.shift)?;
        if !self.employee_ids.is_empty() {
            write!(f, ", for ids: {}", self.employee_ids.iter().join(", "))?;
        }
        Ok(())
    }
}

/// Shifts from `start` to `end` over `periods`, ascending by `(day, period)`.
///
/// Boundary days only contribute the periods inside the range; `inclusive`
/// controls whether `end` itself is yielded. Fails when `end < start`.
pub fn shift_range(
    start: Shift,
    end: Shift,
    periods: &[Period],
    inclusive: bool,
) -> Result<ShiftRange, RosterError> {
    if end < start {
        return Err(RosterError::ReversedShiftRange { start, end });
    }
    Ok(ShiftRange::new_unchecked(start, end, periods, inclusive))
}

/// Lazy, restartable shift enumeration; see [`shift_range`].
#[derive(Debug, Clone)]
pub struct ShiftRange {
    start: Shift,
    end: Shift,
    periods: Vec<Period>,
    inclusive: bool,
    day: Option<Day>,
    index: usize,
}

impl ShiftRange {
    pub(crate) fn new_unchecked(
        start: Shift,
        end: Shift,
        periods: &[Period],
        inclusive: bool,
    ) -> Self {
        let mut periods = periods.to_vec();
        periods.sort_unstable();
        periods.dedup();
        Self {
            start,
            end,
            periods,
            inclusive,
            day: Some(start.day),
            index: 0,
        }
    }
}

impl Iterator for ShiftRange {
    type Item = Shift;

    fn next(&mut self) -> Option<Shift> {
        loop {
            let day = self.day?;
            if day > self.end.day {
                self.day = None;
                return None;
            }
            if self.index >= self.periods.len() {
                self.index = 0;
                self.day = day.next();
                continue;
            }
            let shift = Shift::new(self.periods[self.index], day);
            self.index += 1;
            if shift < self.start {
                continue;
            }
            let beyond = if self.inclusive {
                shift > self.end
            } else {
                shift >= self.end
            };
            if beyond {
                self.day = None;
                return None;
            }
            return Some(shift);
        }
    }
}

/// Sliding windows of `n` consecutive shifts whose days all fall on
/// `week_days`.
pub fn consecutive_shifts<'a, I>(
    shifts: I,
    week_days: &'a [Weekday],
    n: usize,
) -> impl Iterator<Item = Vec<Shift>> + 'a
where
    I: IntoIterator<Item = Shift>,
    I::IntoIter: 'a,
{
    sliding_windows(shifts, n).filter(move |window| {
        window
            .iter()
            .all(|shift| week_days.contains(&shift.day.week_day()))
    })
}
