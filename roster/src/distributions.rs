use std::collections::BTreeMap;

use itertools::Itertools;

use cp_model::{CpModel, LinExpr};

use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::shifts::Slot;
use crate::solver::{slot_var, SlotVars};

/// Contract hours per employee: the pro-rating weights.
pub type EmployeeHours = BTreeMap<EmployeeId, u32>;

/// Bounds each employee's shift count proportional to contract hours over
/// the whole horizon.
#[derive(Debug, Clone, Default)]
pub struct NShifts {
    pub employee_hours: EmployeeHours,
    pub offset: u32,
}

impl NShifts {
    pub fn new(offset: u32) -> Self {
        Self {
            employee_hours: EmployeeHours::new(),
            offset,
        }
    }

    pub fn total_hours(&self) -> u32 {
        self.employee_hours.values().sum()
    }

    pub fn add_distribution(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        distribute_slots(slots, program, variables, &self.employee_hours, self.offset)
    }
}

/// Like [`NShifts`], but applied to each calendar month separately.
///
/// Slots are expected sorted by day; out-of-order input splits a month into
/// several groups.
#[derive(Debug, Clone, Default)]
pub struct NShiftsMonthly {
    pub employee_hours: EmployeeHours,
    pub offset: u32,
}

impl NShiftsMonthly {
    pub fn new(offset: u32) -> Self {
        Self {
            employee_hours: EmployeeHours::new(),
            offset,
        }
    }

    pub fn total_hours(&self) -> u32 {
        self.employee_hours.values().sum()
    }

    pub fn add_distribution(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        for (_, month_slots) in &slots.iter().group_by(|slot| slot.shift.day.month()) {
            let month_slots: Vec<Slot> = month_slots.copied().collect();
            distribute_slots(
                &month_slots,
                program,
                variables,
                &self.employee_hours,
                self.offset,
            )?;
        }
        Ok(())
    }
}

/// Emits `lo ≤ Σ x ≤ hi` per employee, the bounds centred on the employee's
/// hour share of the demanded shifts.
fn distribute_slots(
    slots: &[Slot],
    program: &mut CpModel,
    variables: &SlotVars,
    employee_hours: &EmployeeHours,
    offset: u32,
) -> Result<(), RosterError> {
    let total_hours: u32 = employee_hours.values().sum();
    if total_hours == 0 {
        return Err(RosterError::NoContractHours);
    }
    let total_shifts: i64 = slots.iter().map(|slot| i64::from(slot.n_employees)).sum();

    for (&employee_id, &hours) in employee_hours {
        let expected = f64::from(hours) / f64::from(total_hours) * total_shifts as f64;
        let (lo, hi) = bounds_around(expected, i64::from(offset));
        let vars = slots
            .iter()
            .map(|slot| slot_var(variables, employee_id, slot.shift))
            .collect::<Result<Vec<_>, _>>()?;
        program.add_linear(LinExpr::sum_of(vars), lo, hi);
    }
    Ok(())
}

/// `[⌊v⌋ − offset, ⌈v⌉ + offset]`, collapsing to the exact value for
/// integral `v`.
fn bounds_around(value: f64, offset: i64) -> (i64, i64) {
    if value.fract() == 0.0 {
        (value as i64 - offset, value as i64 + offset)
    } else {
        (value.floor() as i64 - offset, value.ceil() as i64 + offset)
    }
}

/// Tagged union over the distribution catalog.
#[derive(Debug, Clone)]
pub enum PlanningDistribution {
    NShifts(NShifts),
    NShiftsMonthly(NShiftsMonthly),
}

impl PlanningDistribution {
    pub fn add_distribution(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        match self {
            PlanningDistribution::NShifts(distribution) => {
                distribution.add_distribution(slots, program, variables)
            }
            PlanningDistribution::NShiftsMonthly(distribution) => {
                distribution.add_distribution(slots, program, variables)
            }
        }
    }

    pub fn employee_hours(&self) -> &EmployeeHours {
        match self {
            PlanningDistribution::NShifts(distribution) => &distribution.employee_hours,
            PlanningDistribution::NShiftsMonthly(distribution) => &distribution.employee_hours,
        }
    }

    fn set_employee_hours(&mut self, employee_hours: &EmployeeHours) {
        let hours = match self {
            PlanningDistribution::NShifts(distribution) => &mut distribution.employee_hours,
            PlanningDistribution::NShiftsMonthly(distribution) => &mut distribution.employee_hours,
        };
        *hours = employee_hours.clone();
    }
}

impl From<NShifts> for PlanningDistribution {
    fn from(distribution: NShifts) -> Self {
        PlanningDistribution::NShifts(distribution)
    }
}

impl From<NShiftsMonthly> for PlanningDistribution {
    fn from(distribution: NShiftsMonthly) -> Self {
        PlanningDistribution::NShiftsMonthly(distribution)
    }
}

/// Borrowed view of one distribution during installation.
#[derive(Debug, Clone, Copy)]
pub enum DistributionRef<'a> {
    NShifts(&'a NShifts),
    NShiftsMonthly(&'a NShiftsMonthly),
}

impl DistributionRef<'_> {
    pub fn add_distribution(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        match self {
            DistributionRef::NShifts(distribution) => {
                distribution.add_distribution(slots, program, variables)
            }
            DistributionRef::NShiftsMonthly(distribution) => {
                distribution.add_distribution(slots, program, variables)
            }
        }
    }
}

/// The distributions of one planning, applied in insertion order within each
/// group: all whole-horizon distributions first, then the monthly ones.
#[derive(Debug, Clone, Default)]
pub struct Distributions {
    pub id: u32,
    employee_hours: EmployeeHours,
    n_shifts: Vec<NShifts>,
    n_shifts_monthly: Vec<NShiftsMonthly>,
}

impl Distributions {
    pub fn new(id: u32, employee_hours: EmployeeHours) -> Self {
        Self {
            id,
            employee_hours,
            ..Default::default()
        }
    }

    /// Default contract hours handed to distributions added without any.
    pub fn employee_hours(&self) -> &EmployeeHours {
        &self.employee_hours
    }

    pub fn add(
        &mut self,
        distribution: impl Into<PlanningDistribution>,
        employee_hours: Option<&EmployeeHours>,
    ) {
        let mut distribution = distribution.into();
        if let Some(hours) = employee_hours {
            distribution.set_employee_hours(hours);
        } else if distribution.employee_hours().is_empty() {
            let default_hours = self.employee_hours.clone();
            distribution.set_employee_hours(&default_hours);
        }

        match distribution {
            PlanningDistribution::NShifts(distribution) => self.n_shifts.push(distribution),
            PlanningDistribution::NShiftsMonthly(distribution) => {
                self.n_shifts_monthly.push(distribution)
            }
        }
    }

    /// Distributions in installation order.
    pub fn iter(&self) -> impl Iterator<Item = DistributionRef<'_>> {
        self.n_shifts
            .iter()
            .map(DistributionRef::NShifts)
            .chain(
                self.n_shifts_monthly
                    .iter()
                    .map(DistributionRef::NShiftsMonthly),
            )
    }

    pub fn len(&self) -> usize {
        self.n_shifts.len() + self.n_shifts_monthly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
