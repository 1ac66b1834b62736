use chrono::NaiveDate;
use thiserror::Error;

use crate::employee::EmployeeId;
use crate::shifts::Shift;

/// Failures while assembling a planning into a constraint program.
///
/// These abort construction; feasibility of an emitted program is only ever
/// reported by the solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("shift range ends before it starts: {end} < {start}")]
    ReversedShiftRange { start: Shift, end: Shift },

    #[error("first and last shift must use periods of the same family")]
    MixedPeriodFamilies,

    #[error("planning horizon ends before it starts: {last} < {first}")]
    ReversedHorizon { first: NaiveDate, last: NaiveDate },

    #[error("a planning needs at least one period")]
    NoPeriods,

    #[error("a planning needs at least one employee per shift")]
    NoCoverage,

    #[error("specific shifts apply to exactly one employee, got {0} ids")]
    NotOneEmployee(usize),

    #[error("plannings support exactly one shift per employee per day, got {0}")]
    UnsupportedShiftsPerDay(u32),

    #[error("no decision variable for employee {employee_id} on {shift}")]
    MissingVariable { employee_id: EmployeeId, shift: Shift },

    #[error("cannot distribute shifts over zero total contract hours")]
    NoContractHours,
}
