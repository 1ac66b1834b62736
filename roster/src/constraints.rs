use chrono::Weekday;
use itertools::Itertools;
use tracing::warn;

use cp_model::{CpModel, LinExpr};

use crate::days::{WEEKEND, WEEK_DAYS};
use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::periods::{Period, PeriodFamily};
use crate::shifts::{consecutive_shifts, Shift, Slot};
use crate::solver::{slot_var, SlotVars};

/// Requires every slot to be staffed by exactly its demanded head count.
#[derive(Debug, Clone, Default)]
pub struct WorkersPerShift {
    pub employee_ids: Vec<EmployeeId>,
}

impl WorkersPerShift {
    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        for slot in slots {
            if slot.n_employees as usize > self.employee_ids.len() {
                warn!(
                    slot = %slot,
                    available = self.employee_ids.len(),
                    "slot demands more employees than the constraint covers"
                );
            }
            let vars = self
                .employee_ids
                .iter()
                .map(|&employee_id| slot_var(variables, employee_id, slot.shift))
                .collect::<Result<Vec<_>, _>>()?;
            program.add_equal(LinExpr::sum_of(vars), i64::from(slot.n_employees));
        }
        Ok(())
    }
}

/// Caps how many shifts an employee may work per day.
///
/// Only a cap of one is supported: each day group becomes an at-most-one
/// relation over the employee's variables.
#[derive(Debug, Clone)]
pub struct ShiftsPerDay {
    pub employee_ids: Vec<EmployeeId>,
    n: u32,
}

impl ShiftsPerDay {
    pub fn new(n: u32) -> Result<Self, RosterError> {
        if n != 1 {
            return Err(RosterError::UnsupportedShiftsPerDay(n));
        }
        Ok(Self {
            employee_ids: Vec::new(),
            n,
        })
    }

    /// Maximum number of shifts per employee per day.
    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        for (_, day_slots) in &slots.iter().group_by(|slot| slot.shift.day) {
            let day_slots: Vec<&Slot> = day_slots.collect();
            for &employee_id in &self.employee_ids {
                let vars = day_slots
                    .iter()
                    .map(|slot| slot_var(variables, employee_id, slot.shift))
                    .collect::<Result<Vec<_>, _>>()?;
                program.add_at_most_one(vars);
            }
        }
        Ok(())
    }
}

impl Default for ShiftsPerDay {
    fn default() -> Self {
        Self {
            employee_ids: Vec::new(),
            n: 1,
        }
    }
}

/// Forces or forbids specific shifts for a single employee.
#[derive(Debug, Clone, Default)]
pub struct SpecificShifts {
    pub employee_ids: Vec<EmployeeId>,
    /// `(shift, blocked)`: blocked shifts are pinned to 0, the others are
    /// forced assignments.
    pub shifts: Vec<(Shift, bool)>,
}

impl SpecificShifts {
    pub fn new(shifts: Vec<(Shift, bool)>) -> Self {
        Self {
            employee_ids: Vec::new(),
            shifts,
        }
    }

    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        if self.employee_ids.len() != 1 {
            return Err(RosterError::NotOneEmployee(self.employee_ids.len()));
        }
        let employee_id = self.employee_ids[0];

        let known = |shift: &Shift| slots.iter().any(|slot| slot.shift == *shift);
        for &(shift, blocked) in self.shifts.iter().filter(|(shift, _)| known(shift)) {
            let var = slot_var(variables, employee_id, shift)?;
            if blocked {
                program.add_equal(LinExpr::from(var), 0);
            } else {
                program.add_exactly_one([var]);
            }
        }
        Ok(())
    }
}

/// Caps an employee's assignments within every window of consecutive shifts.
///
/// The default forbids working two shifts in a row, which also rules out the
/// evening-into-next-morning transition.
#[derive(Debug, Clone)]
pub struct MaxConsecutiveShifts {
    pub employee_ids: Vec<EmployeeId>,
    pub week_days: Vec<Weekday>,
    pub periods: Vec<Period>,
    pub max: u32,
    pub window: usize,
}

impl Default for MaxConsecutiveShifts {
    fn default() -> Self {
        Self {
            employee_ids: Vec::new(),
            week_days: WEEK_DAYS.to_vec(),
            periods: PeriodFamily::DayAndEvening.periods().to_vec(),
            max: 1,
            window: 2,
        }
    }
}

impl MaxConsecutiveShifts {
    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        let filtered: Vec<Shift> = slots
            .iter()
            .filter(|slot| self.periods.contains(&slot.shift.period))
            .map(|slot| slot.shift)
            .collect();

        for window in consecutive_shifts(filtered, &self.week_days, self.window) {
            for &employee_id in &self.employee_ids {
                let vars = window
                    .iter()
                    .map(|&shift| slot_var(variables, employee_id, shift))
                    .collect::<Result<Vec<_>, _>>()?;
                program.add_le(LinExpr::sum_of(vars), i64::from(self.max));
            }
        }
        Ok(())
    }
}

/// Caps an employee's assignments on selected week days within every pair of
/// consecutive ISO weeks. The default keeps weekend duty from recurring.
#[derive(Debug, Clone)]
pub struct MaxRecurrentShifts {
    pub employee_ids: Vec<EmployeeId>,
    pub week_days: Vec<Weekday>,
    pub periods: Vec<Period>,
    pub max: u32,
}

impl Default for MaxRecurrentShifts {
    fn default() -> Self {
        Self {
            employee_ids: Vec::new(),
            week_days: WEEKEND.to_vec(),
            periods: PeriodFamily::DayAndEvening.periods().to_vec(),
            max: 1,
        }
    }
}

impl MaxRecurrentShifts {
    /// Width of the rolling window, in weeks.
    pub fn window(&self) -> usize {
        2
    }

    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        let mut sorted: Vec<Slot> = slots
            .iter()
            .filter(|slot| self.periods.contains(&slot.shift.period))
            .copied()
            .collect();
        sorted.sort();

        // Weeks are keyed by (ISO year, week number) so a horizon crossing
        // new year still rolls week by week.
        let grouped = sorted
            .iter()
            .group_by(|slot| (slot.shift.day.iso_year(), slot.shift.day.week_number()));
        let weeks: Vec<Vec<Slot>> = (&grouped)
            .into_iter()
            .map(|(_, week)| week.copied().collect())
            .collect();

        for pair in weeks.windows(2) {
            for &employee_id in &self.employee_ids {
                let vars = pair
                    .iter()
                    .flatten()
                    .filter(|slot| self.week_days.contains(&slot.shift.day.week_day()))
                    .map(|slot| slot_var(variables, employee_id, slot.shift))
                    .collect::<Result<Vec<_>, _>>()?;
                program.add_le(LinExpr::sum_of(vars), i64::from(self.max));
            }
        }
        Ok(())
    }
}

/// Tagged union over the planning-constraint catalog.
#[derive(Debug, Clone)]
pub enum PlanningConstraint {
    WorkersPerShift(WorkersPerShift),
    ShiftsPerDay(ShiftsPerDay),
    SpecificShifts(SpecificShifts),
    MaxConsecutiveShifts(MaxConsecutiveShifts),
    MaxRecurrentShifts(MaxRecurrentShifts),
}

impl PlanningConstraint {
    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        match self {
            PlanningConstraint::WorkersPerShift(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            PlanningConstraint::ShiftsPerDay(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            PlanningConstraint::SpecificShifts(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            PlanningConstraint::MaxConsecutiveShifts(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            PlanningConstraint::MaxRecurrentShifts(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
        }
    }

    pub fn employee_ids(&self) -> &[EmployeeId] {
        match self {
            PlanningConstraint::WorkersPerShift(constraint) => &constraint.employee_ids,
            PlanningConstraint::ShiftsPerDay(constraint) => &constraint.employee_ids,
            PlanningConstraint::SpecificShifts(constraint) => &constraint.employee_ids,
            PlanningConstraint::MaxConsecutiveShifts(constraint) => &constraint.employee_ids,
            PlanningConstraint::MaxRecurrentShifts(constraint) => &constraint.employee_ids,
        }
    }

    fn set_employee_ids(&mut self, employee_ids: &[EmployeeId]) {
        let ids = match self {
            PlanningConstraint::WorkersPerShift(constraint) => &mut constraint.employee_ids,
            PlanningConstraint::ShiftsPerDay(constraint) => &mut constraint.employee_ids,
            PlanningConstraint::SpecificShifts(constraint) => &mut constraint.employee_ids,
            PlanningConstraint::MaxConsecutiveShifts(constraint) => &mut constraint.employee_ids,
            PlanningConstraint::MaxRecurrentShifts(constraint) => &mut constraint.employee_ids,
        };
        *ids = employee_ids.to_vec();
    }
}

impl From<WorkersPerShift> for PlanningConstraint {
    fn from(constraint: WorkersPerShift) -> Self {
        PlanningConstraint::WorkersPerShift(constraint)
    }
}

impl From<ShiftsPerDay> for PlanningConstraint {
    fn from(constraint: ShiftsPerDay) -> Self {
        PlanningConstraint::ShiftsPerDay(constraint)
    }
}

impl From<SpecificShifts> for PlanningConstraint {
    fn from(constraint: SpecificShifts) -> Self {
        PlanningConstraint::SpecificShifts(constraint)
    }
}

impl From<MaxConsecutiveShifts> for PlanningConstraint {
    fn from(constraint: MaxConsecutiveShifts) -> Self {
        PlanningConstraint::MaxConsecutiveShifts(constraint)
    }
}

impl From<MaxRecurrentShifts> for PlanningConstraint {
    fn from(constraint: MaxRecurrentShifts) -> Self {
        PlanningConstraint::MaxRecurrentShifts(constraint)
    }
}

/// Borrowed view of one constraint during installation.
#[derive(Debug, Clone, Copy)]
pub enum ConstraintRef<'a> {
    WorkersPerShift(&'a WorkersPerShift),
    ShiftsPerDay(&'a ShiftsPerDay),
    SpecificShifts(&'a SpecificShifts),
    MaxConsecutiveShifts(&'a MaxConsecutiveShifts),
    MaxRecurrentShifts(&'a MaxRecurrentShifts),
}

impl ConstraintRef<'_> {
    pub fn add_constraint(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        match self {
            ConstraintRef::WorkersPerShift(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            ConstraintRef::ShiftsPerDay(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            ConstraintRef::SpecificShifts(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            ConstraintRef::MaxConsecutiveShifts(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
            ConstraintRef::MaxRecurrentShifts(constraint) => {
                constraint.add_constraint(slots, program, variables)
            }
        }
    }
}

/// The constraints of one planning: two singletons plus three lists.
///
/// Iteration order is stable: workers per shift, shifts per day, specific
/// shifts, max consecutive, max recurrent.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub id: u32,
    employee_ids: Vec<EmployeeId>,
    workers_per_shift: Option<WorkersPerShift>,
    shifts_per_day: Option<ShiftsPerDay>,
    specific_shifts: Vec<SpecificShifts>,
    max_consecutive_shifts: Vec<MaxConsecutiveShifts>,
    max_recurrent_shifts: Vec<MaxRecurrentShifts>,
}

impl Constraints {
    pub fn new(id: u32, employee_ids: Vec<EmployeeId>) -> Self {
        Self {
            id,
            employee_ids,
            ..Default::default()
        }
    }

    /// Default employee ids handed to constraints added without their own.
    pub fn employee_ids(&self) -> &[EmployeeId] {
        &self.employee_ids
    }

    /// Adds `constraint` with `employee_ids` when provided; a constraint that
    /// arrives without any ids gets the aggregator's default. Singletons
    /// replace their predecessor, the lists accumulate.
    pub fn add(
        &mut self,
        constraint: impl Into<PlanningConstraint>,
        employee_ids: Option<&[EmployeeId]>,
    ) {
        let mut constraint = constraint.into();
        if let Some(ids) = employee_ids {
            constraint.set_employee_ids(ids);
        } else if constraint.employee_ids().is_empty() {
            let default_ids = self.employee_ids.clone();
            constraint.set_employee_ids(&default_ids);
        }

        match constraint {
            PlanningConstraint::WorkersPerShift(constraint) => {
                if self.workers_per_shift.is_some() {
                    warn!("replacing existing workers per shift constraint");
                }
                self.workers_per_shift = Some(constraint);
            }
            PlanningConstraint::ShiftsPerDay(constraint) => {
                if self.shifts_per_day.is_some() {
                    warn!("replacing existing shifts per day constraint");
                }
                self.shifts_per_day = Some(constraint);
            }
            PlanningConstraint::SpecificShifts(constraint) => {
                self.specific_shifts.push(constraint);
            }
            PlanningConstraint::MaxConsecutiveShifts(constraint) => {
                self.max_consecutive_shifts.push(constraint);
            }
            PlanningConstraint::MaxRecurrentShifts(constraint) => {
                self.max_recurrent_shifts.push(constraint);
            }
        }
    }

    /// Constraints in installation order.
    pub fn iter(&self) -> impl Iterator<Item = ConstraintRef<'_>> {
        self.workers_per_shift
            .iter()
            .map(ConstraintRef::WorkersPerShift)
            .chain(self.shifts_per_day.iter().map(ConstraintRef::ShiftsPerDay))
            .chain(
                self.specific_shifts
                    .iter()
                    .map(ConstraintRef::SpecificShifts),
            )
            .chain(
                self.max_consecutive_shifts
                    .iter()
                    .map(ConstraintRef::MaxConsecutiveShifts),
            )
            .chain(
                self.max_recurrent_shifts
                    .iter()
                    .map(ConstraintRef::MaxRecurrentShifts),
            )
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use cp_model::{Constraint, CpModel, LinExpr};

    use super::{
        ConstraintRef, Constraints, MaxConsecutiveShifts, MaxRecurrentShifts, ShiftsPerDay,
        SpecificShifts, WorkersPerShift,
    };
    use crate::days::Day;
    use crate::employee::EmployeeId;
    use crate::error::RosterError;
    use crate::periods::{Period, PeriodFamily};
    use crate::shifts::{shift_range, Shift, Slot};
    use crate::solver::Solver;

    fn week_slots(n_employees: u32) -> Vec<Slot> {
        let start = Shift::new(
            Period::Day,
            Day::new(NaiveDate::from_ymd_opt(2002, 2, 4).unwrap()),
        );
        let end = Shift::new(
            Period::Evening,
            Day::new(NaiveDate::from_ymd_opt(2002, 2, 10).unwrap()),
        );
        shift_range(start, end, PeriodFamily::DayAndEvening.periods(), true)
            .unwrap()
            .map(|shift| Slot::new(shift, n_employees))
            .collect()
    }

    fn ids(n: i64) -> Vec<EmployeeId> {
        (0..n).map(EmployeeId).collect()
    }

    fn solver_for(employee_ids: &[EmployeeId], slots: &[Slot]) -> Solver {
        let shifts: Vec<Shift> = slots.iter().map(|slot| slot.shift).collect();
        Solver::new(0, employee_ids, &shifts)
    }

    fn linear_parts(constraint: &Constraint) -> (&LinExpr, i64, i64) {
        match constraint {
            Constraint::Linear { expr, lo, hi } => (expr, *lo, *hi),
            other => panic!("expected a linear relation, got {other:?}"),
        }
    }

    #[test]
    fn workers_per_shift_pins_every_slot_to_its_demand() {
        let employee_ids = ids(10);
        let slots = week_slots(2);
        let mut solver = solver_for(&employee_ids, &slots);

        let constraint = WorkersPerShift {
            employee_ids: employee_ids.clone(),
        };
        constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();

        assert_eq!(solver.program.num_constraints(), slots.len());
        for constraint in solver.program.constraints() {
            let (expr, lo, hi) = linear_parts(constraint);
            assert_eq!(expr.terms().len(), employee_ids.len());
            assert_eq!((lo, hi), (2, 2));
        }
    }

    #[test]
    fn shifts_per_day_caps_each_employee_per_day_group() {
        let employee_ids = ids(10);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let constraint = ShiftsPerDay {
            employee_ids: employee_ids.clone(),
            ..ShiftsPerDay::default()
        };
        constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();

        // 7 day groups × 10 employees.
        assert_eq!(solver.program.num_constraints(), 70);
        for constraint in solver.program.constraints() {
            match constraint {
                Constraint::AtMostOne { literals } => assert_eq!(literals.len(), 2),
                other => panic!("expected at-most-one, got {other:?}"),
            }
        }
    }

    #[test]
    fn shifts_per_day_supports_only_one() {
        assert!(ShiftsPerDay::new(1).is_ok());
        assert_eq!(
            ShiftsPerDay::new(2).unwrap_err(),
            RosterError::UnsupportedShiftsPerDay(2)
        );
        assert_eq!(ShiftsPerDay::default().n(), 1);
    }

    #[test]
    fn specific_shifts_block_and_force() {
        let employee_ids = ids(10);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let first_shift = slots[0].shift;
        let last_shift = slots[slots.len() - 1].shift;

        let mut block_first = SpecificShifts::new(vec![(first_shift, true)]);
        block_first.employee_ids = vec![employee_ids[0]];
        let mut force_last = SpecificShifts::new(vec![(last_shift, false)]);
        force_last.employee_ids = vec![employee_ids[9]];

        block_first
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();
        force_last
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();

        assert_eq!(solver.program.num_constraints(), 2);
        let (expr, lo, hi) = linear_parts(&solver.program.constraints()[0]);
        assert_eq!(expr.terms()[0].0.index(), 0);
        assert_eq!((lo, hi), (0, 0));
        match &solver.program.constraints()[1] {
            Constraint::ExactlyOne { literals } => {
                assert_eq!(literals[0].index(), solver.program.num_variables() - 1);
            }
            other => panic!("expected exactly-one, got {other:?}"),
        }
    }

    #[test]
    fn specific_shifts_need_exactly_one_employee() {
        let employee_ids = ids(3);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let mut constraint = SpecificShifts::new(vec![(slots[0].shift, true)]);
        constraint.employee_ids = employee_ids;
        assert_eq!(
            constraint
                .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
                .unwrap_err(),
            RosterError::NotOneEmployee(3)
        );
    }

    #[test]
    fn specific_shifts_ignore_shifts_outside_the_slots() {
        let employee_ids = ids(1);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let foreign = Shift::new(
            Period::Day,
            Day::new(NaiveDate::from_ymd_opt(2003, 6, 1).unwrap()),
        );
        let mut constraint = SpecificShifts::new(vec![(foreign, true)]);
        constraint.employee_ids = employee_ids;
        constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();
        assert_eq!(solver.program.num_constraints(), 0);
    }

    #[test]
    fn max_consecutive_shifts_cap_every_window() {
        let employee_ids = ids(1);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let constraint = MaxConsecutiveShifts {
            employee_ids: employee_ids.clone(),
            max: 1,
            window: 3,
            ..MaxConsecutiveShifts::default()
        };
        constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();

        // 14 shifts give 12 windows of width 3.
        assert_eq!(solver.program.num_constraints(), 12);
        for constraint in solver.program.constraints() {
            let (expr, _, hi) = linear_parts(constraint);
            assert_eq!(expr.terms().len(), 3);
            assert_eq!(hi, 1);
        }
    }

    #[test]
    fn max_consecutive_shifts_with_window_of_all_slots() {
        let employee_ids = ids(2);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let constraint = MaxConsecutiveShifts {
            employee_ids: employee_ids.clone(),
            max: 5,
            window: slots.len(),
            ..MaxConsecutiveShifts::default()
        };
        constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();

        // One aggregate window per employee.
        assert_eq!(solver.program.num_constraints(), 2);
    }

    #[test]
    fn max_recurrent_shifts_roll_over_week_pairs() {
        let employee_ids = ids(2);
        // Monday the 4th through Monday the 11th spans ISO weeks 6 and 7.
        let start = Shift::new(
            Period::Day,
            Day::new(NaiveDate::from_ymd_opt(2002, 2, 4).unwrap()),
        );
        let end = Shift::new(
            Period::Evening,
            Day::new(NaiveDate::from_ymd_opt(2002, 2, 11).unwrap()),
        );
        let slots: Vec<Slot> = shift_range(start, end, PeriodFamily::DayAndEvening.periods(), true)
            .unwrap()
            .map(|shift| Slot::new(shift, 1))
            .collect();
        let mut solver = solver_for(&employee_ids, &slots);

        let constraint = MaxRecurrentShifts {
            employee_ids: employee_ids.clone(),
            ..MaxRecurrentShifts::default()
        };
        assert_eq!(constraint.window(), 2);
        constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap();

        // One week pair × 2 employees.
        assert_eq!(solver.program.num_constraints(), 2);
        for constraint in solver.program.constraints() {
            let (expr, _, hi) = linear_parts(constraint);
            // Saturday and Sunday, two periods each.
            assert_eq!(expr.terms().len(), 4);
            assert_eq!(hi, 1);
            for (var, _) in expr.terms() {
                let name = &solver.program.variable(*var).name;
                assert!(
                    name.contains("Saturday") || name.contains("Sunday"),
                    "weekend sum references {name}"
                );
            }
        }
    }

    #[test]
    fn aggregator_iterates_in_declaration_order() {
        let employee_ids = ids(3);
        let mut constraints = Constraints::new(1, employee_ids.clone());

        constraints.add(MaxRecurrentShifts::default(), None);
        constraints.add(SpecificShifts::new(Vec::new()), Some(&employee_ids[..1]));
        constraints.add(ShiftsPerDay::default(), None);
        constraints.add(WorkersPerShift::default(), None);
        constraints.add(MaxConsecutiveShifts::default(), None);

        let order: Vec<&'static str> = constraints
            .iter()
            .map(|constraint| match constraint {
                ConstraintRef::WorkersPerShift(_) => "workers_per_shift",
                ConstraintRef::ShiftsPerDay(_) => "shifts_per_day",
                ConstraintRef::SpecificShifts(_) => "specific_shifts",
                ConstraintRef::MaxConsecutiveShifts(_) => "max_consecutive_shifts",
                ConstraintRef::MaxRecurrentShifts(_) => "max_recurrent_shifts",
            })
            .collect();
        assert_eq!(
            order,
            vec![
                "workers_per_shift",
                "shifts_per_day",
                "specific_shifts",
                "max_consecutive_shifts",
                "max_recurrent_shifts",
            ]
        );
        assert_eq!(constraints.len(), 5);
    }

    #[test]
    fn aggregator_assigns_default_employee_ids() {
        let employee_ids = ids(3);
        let mut constraints = Constraints::new(1, employee_ids.clone());

        constraints.add(WorkersPerShift::default(), None);
        constraints.add(ShiftsPerDay::default(), Some(&employee_ids[..2]));

        let per_constraint: Vec<usize> = constraints
            .iter()
            .map(|constraint| match constraint {
                ConstraintRef::WorkersPerShift(c) => c.employee_ids.len(),
                ConstraintRef::ShiftsPerDay(c) => c.employee_ids.len(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(per_constraint, vec![3, 2]);
    }

    #[test]
    fn singletons_are_replaced_last_writer_wins() {
        let employee_ids = ids(2);
        let mut constraints = Constraints::new(1, employee_ids.clone());

        constraints.add(WorkersPerShift::default(), None);
        constraints.add(WorkersPerShift::default(), Some(&employee_ids[..1]));

        assert_eq!(constraints.len(), 1);
        let first = constraints.iter().next().unwrap();
        match first {
            ConstraintRef::WorkersPerShift(constraint) => {
                assert_eq!(constraint.employee_ids.len(), 1);
            }
            other => panic!("expected workers per shift, got {other:?}"),
        }
    }

    #[test]
    fn missing_variables_surface_as_errors() {
        let employee_ids = ids(2);
        let slots = week_slots(1);
        let mut solver = solver_for(&employee_ids, &slots);

        let outsider = EmployeeId(99);
        let constraint = WorkersPerShift {
            employee_ids: vec![outsider],
        };
        let err = constraint
            .add_constraint(&slots, &mut solver.program, &solver.employee_slots)
            .unwrap_err();
        assert!(matches!(
            err,
            RosterError::MissingVariable { employee_id, .. } if employee_id == outsider
        ));
    }
}
