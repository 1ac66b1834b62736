//! Employee shift-roster constraint-model building.
//!
//! The crate turns a declarative [`Planning`](planning::Planning) — a day
//! range, ordered periods, employees with contract hours, and catalogs of
//! rules — into a boolean constraint program: one decision variable per
//! employee × shift, linear relations for the workplace rules, pro-rated
//! distribution brackets, and an objective that concentrates each employee's
//! work on a recurring set of week days. The emitted
//! [`CpModel`](cp_model::CpModel) is a plain value handed to a CP-SAT style
//! backend behind the [`Solve`](cp_model::Solve) interface.

#[macro_use]
extern crate derivative;

pub mod constraints;
pub mod days;
pub mod distributions;
pub mod employee;
pub mod error;
pub mod optimizers;
pub mod periods;
pub mod planning;
pub mod shifts;
pub mod solver;
pub mod specifications;
pub mod windows;

pub use constraints::{
    Constraints, MaxConsecutiveShifts, MaxRecurrentShifts, PlanningConstraint, ShiftsPerDay,
    SpecificShifts, WorkersPerShift,
};
pub use days::{Day, FixedHolidays, HolidayCalendar, NoHolidays, WEEKEND, WEEK_DAYS};
pub use distributions::{
    Distributions, EmployeeHours, NShifts, NShiftsMonthly, PlanningDistribution,
};
pub use employee::{Employee, EmployeeId};
pub use error::RosterError;
pub use optimizers::PlanningOptimization;
pub use periods::{Period, PeriodFamily};
pub use planning::Planning;
pub use shifts::{
    consecutive_shifts, shift_range, Planned, Shift, ShiftRange, Slot, REGULAR_SHIFT_DURATION,
};
pub use solver::{EmployeeSlot, SlotVars, Solver};
pub use specifications::{
    Holiday, Specification, Specifications, SpecificDay, SpecificPeriod, SpecificShift,
    SpecificWeekDay, SpecType,
};
