use std::collections::{BTreeMap, BTreeSet};

use chrono::Weekday;
use serde_derive::{Deserialize, Serialize};

use crate::constraints::SpecificShifts;
use crate::days::Day;
use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::periods::{Period, PeriodFamily};
use crate::shifts::{shift_range, Shift, ShiftRange};

/// Disposition of an employee toward a shift; lower is a stronger refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum SpecType {
    /// Unavailable for a contractual reason (holiday); outranks everything.
    UnavailableCor = -9,
    Unavailable = -2,
    NotPreferred = -1,
    Preferred = 1,
    Mandatory = 2,
}

impl SpecType {
    pub const fn value(self) -> i8 {
        self as i8
    }
}

/// Preference or refusal for one specific shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificShift {
    pub spec_type: SpecType,
    pub shift: Shift,
}

impl SpecificShift {
    pub fn new(spec_type: SpecType, shift: Shift) -> Self {
        Self { spec_type, shift }
    }

    pub fn spec_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        (self.shift == *shift).then_some(self.spec_type)
    }
}

/// Preference or refusal for every shift on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificDay {
    pub spec_type: SpecType,
    pub day: Day,
}

impl SpecificDay {
    pub fn new(spec_type: SpecType, day: Day) -> Self {
        Self { spec_type, day }
    }

    pub fn spec_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        (self.day == shift.day).then_some(self.spec_type)
    }
}

/// Preference or refusal for every shift in one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificPeriod {
    pub spec_type: SpecType,
    pub period: Period,
}

impl SpecificPeriod {
    pub fn new(spec_type: SpecType, period: Period) -> Self {
        Self { spec_type, period }
    }

    pub fn spec_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        (self.period == shift.period).then_some(self.spec_type)
    }
}

/// Preference or refusal for every shift on one week day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificWeekDay {
    pub spec_type: SpecType,
    pub week_day: Weekday,
}

impl SpecificWeekDay {
    pub fn new(spec_type: SpecType, week_day: Weekday) -> Self {
        Self { spec_type, week_day }
    }

    pub fn spec_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        (self.week_day == shift.day.week_day()).then_some(self.spec_type)
    }
}

/// A contiguous absence between two shifts, blocking every shift in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    first_shift: Shift,
    last_shift: Shift,
}

impl Holiday {
    pub const SPEC_TYPE: SpecType = SpecType::UnavailableCor;

    /// Fails when the boundary shifts are reversed or use periods from
    /// different families.
    pub fn new(first_shift: Shift, last_shift: Shift) -> Result<Self, RosterError> {
        if first_shift.period.family() != last_shift.period.family() {
            return Err(RosterError::MixedPeriodFamilies);
        }
        if last_shift < first_shift {
            return Err(RosterError::ReversedShiftRange {
                start: first_shift,
                end: last_shift,
            });
        }
        Ok(Self {
            first_shift,
            last_shift,
        })
    }

    pub fn first_shift(&self) -> Shift {
        self.first_shift
    }

    pub fn last_shift(&self) -> Shift {
        self.last_shift
    }

    pub fn family(&self) -> PeriodFamily {
        self.first_shift.period.family()
    }

    /// Every shift of the family's periods between the boundaries, inclusive.
    pub fn shifts(&self) -> ShiftRange {
        ShiftRange::new_unchecked(
            self.first_shift,
            self.last_shift,
            self.family().periods(),
            true,
        )
    }

    /// Distinct days touched by the holiday, ascending.
    pub fn days(&self) -> Vec<Day> {
        let days: BTreeSet<Day> = self.shifts().map(|shift| shift.day).collect();
        days.into_iter().collect()
    }

    pub fn n_shifts(&self) -> usize {
        self.shifts().count()
    }

    pub fn n_days(&self) -> usize {
        self.days().len()
    }

    pub fn spec_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        let contained = shift.period.family() == self.family()
            && self.first_shift <= *shift
            && *shift <= self.last_shift;
        contained.then_some(Self::SPEC_TYPE)
    }
}

/// Per-employee preference record, dispatched by kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Specification {
    Shift(SpecificShift),
    Day(SpecificDay),
    Period(SpecificPeriod),
    WeekDay(SpecificWeekDay),
    Holiday(Holiday),
}

impl Specification {
    /// The disposition this record reports for `shift`, if its key matches.
    pub fn spec_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        match self {
            Specification::Shift(spec) => spec.spec_for_shift(shift),
            Specification::Day(spec) => spec.spec_for_shift(shift),
            Specification::Period(spec) => spec.spec_for_shift(shift),
            Specification::WeekDay(spec) => spec.spec_for_shift(shift),
            Specification::Holiday(spec) => spec.spec_for_shift(shift),
        }
    }
}

impl From<SpecificShift> for Specification {
    fn from(spec: SpecificShift) -> Self {
        Specification::Shift(spec)
    }
}

impl From<SpecificDay> for Specification {
    fn from(spec: SpecificDay) -> Self {
        Specification::Day(spec)
    }
}

impl From<SpecificPeriod> for Specification {
    fn from(spec: SpecificPeriod) -> Self {
        Specification::Period(spec)
    }
}

impl From<SpecificWeekDay> for Specification {
    fn from(spec: SpecificWeekDay) -> Self {
        Specification::WeekDay(spec)
    }
}

impl From<Holiday> for Specification {
    fn from(holiday: Holiday) -> Self {
        Specification::Holiday(holiday)
    }
}

/// All specifications of one employee, grouped by kind.
///
/// Iteration yields the groups in a fixed order (shifts, days, periods,
/// week days, holidays) so aggregate queries are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specifications {
    pub employee_id: EmployeeId,
    shifts: Vec<SpecificShift>,
    days: Vec<SpecificDay>,
    periods: Vec<SpecificPeriod>,
    week_days: Vec<SpecificWeekDay>,
    holidays: Vec<Holiday>,
}

impl Specifications {
    pub fn new(employee_id: impl Into<EmployeeId>) -> Self {
        Self {
            employee_id: employee_id.into(),
            shifts: Vec::new(),
            days: Vec::new(),
            periods: Vec::new(),
            week_days: Vec::new(),
            holidays: Vec::new(),
        }
    }

    pub fn add(&mut self, specification: impl Into<Specification>) {
        match specification.into() {
            Specification::Shift(spec) => self.shifts.push(spec),
            Specification::Day(spec) => self.days.push(spec),
            Specification::Period(spec) => self.periods.push(spec),
            Specification::WeekDay(spec) => self.week_days.push(spec),
            Specification::Holiday(holiday) => self.holidays.push(holiday),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Specification> + '_ {
        self.shifts
            .iter()
            .copied()
            .map(Specification::Shift)
            .chain(self.days.iter().copied().map(Specification::Day))
            .chain(self.periods.iter().copied().map(Specification::Period))
            .chain(self.week_days.iter().copied().map(Specification::WeekDay))
            .chain(self.holidays.iter().copied().map(Specification::Holiday))
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
            + self.days.len()
            + self.periods.len()
            + self.week_days.len()
            + self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strongest disposition any record reports for `shift`.
    pub fn min_for_shift(&self, shift: &Shift) -> Option<SpecType> {
        self.iter()
            .filter_map(|specification| specification.spec_for_shift(shift))
            .min()
    }

    /// Shifts in the range whose strongest disposition is a contractual
    /// block. The range expands over the boundary shifts' period family.
    pub fn blocked_shifts(
        &self,
        from_shift: Shift,
        to_shift: Shift,
    ) -> Result<Vec<Shift>, RosterError> {
        if from_shift.period.family() != to_shift.period.family() {
            return Err(RosterError::MixedPeriodFamilies);
        }
        let periods = from_shift.period.family().periods();
        let range = shift_range(from_shift, to_shift, periods, true)?;
        Ok(range
            .filter(|shift| self.min_for_shift(shift) == Some(SpecType::UnavailableCor))
            .collect())
    }

    /// Turns the blocked shifts in the range into a ready-to-add
    /// [`SpecificShifts`] constraint for this employee.
    pub fn blocked_constraint(
        &self,
        from_shift: Shift,
        to_shift: Shift,
    ) -> Result<SpecificShifts, RosterError> {
        let blocked = self.blocked_shifts(from_shift, to_shift)?;
        let mut constraint =
            SpecificShifts::new(blocked.into_iter().map(|shift| (shift, true)).collect());
        constraint.employee_ids = vec![self.employee_id];
        Ok(constraint)
    }

    /// Days in the range on which every period of `family` is blocked.
    pub fn blocked_days(
        &self,
        from_day: Day,
        to_day: Day,
        family: PeriodFamily,
    ) -> Result<Vec<Day>, RosterError> {
        let blocked = self.blocked_shifts(
            Shift::new(family.first(), from_day),
            Shift::new(family.last(), to_day),
        )?;
        let mut blocked_periods_per_day: BTreeMap<Day, usize> = BTreeMap::new();
        for shift in blocked {
            *blocked_periods_per_day.entry(shift.day).or_insert(0) += 1;
        }
        Ok(blocked_periods_per_day
            .into_iter()
            .filter(|(_, blocked_periods)| *blocked_periods == family.periods().len())
            .map(|(day, _)| day)
            .collect())
    }
}
