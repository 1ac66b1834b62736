use hashlink::LinkedHashMap;
use tracing::warn;

use cp_model::{CpModel, VarId};

use crate::constraints::Constraints;
use crate::distributions::Distributions;
use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::optimizers::PlanningOptimization;
use crate::planning::Planning;
use crate::shifts::{Shift, Slot};

/// Key of one decision variable: employee × shift.
pub type EmployeeSlot = (EmployeeId, Shift);

/// Decision-variable table in employee × shift product order. Insertion
/// order is iteration order, which keeps emitted programs reproducible.
pub type SlotVars = LinkedHashMap<EmployeeSlot, VarId>;

/// Looks up the variable for an employee/shift pair.
pub(crate) fn slot_var(
    variables: &SlotVars,
    employee_id: EmployeeId,
    shift: Shift,
) -> Result<VarId, RosterError> {
    variables
        .get(&(employee_id, shift))
        .copied()
        .ok_or(RosterError::MissingVariable { employee_id, shift })
}

/// Owns the constraint program and the decision-variable table for one
/// planning, and installs constraint/distribution sets into it.
///
/// Each aggregate is installed at most once per id; re-adding the same id is
/// skipped with a warning.
#[derive(Debug)]
pub struct Solver {
    pub planning_id: u32,
    pub program: CpModel,
    pub employee_slots: SlotVars,
    added_constraints: Vec<u32>,
    added_distributions: Vec<u32>,
}

impl Solver {
    /// Allocates one boolean decision variable per employee × shift.
    pub fn new(planning_id: u32, employee_ids: &[EmployeeId], shifts: &[Shift]) -> Self {
        let mut program = CpModel::new();
        let mut employee_slots = SlotVars::new();
        for &employee_id in employee_ids {
            for &shift in shifts {
                let var =
                    program.new_bool_var(format!("Slot <Employee: {employee_id}; Shift: {shift}>"));
                employee_slots.insert((employee_id, shift), var);
            }
        }
        Self {
            planning_id,
            program,
            employee_slots,
            added_constraints: Vec::new(),
            added_distributions: Vec::new(),
        }
    }

    /// Builds the full program for `planning`: variables, then constraints,
    /// then distributions.
    pub fn from_planning(planning: &Planning) -> Result<Self, RosterError> {
        let shifts: Vec<Shift> = planning.shifts().collect();
        let mut solver = Self::new(planning.id, &planning.employee_ids(), &shifts);
        let slots = planning.slots();
        solver.add_constraints(&planning.constraints, &slots)?;
        solver.add_distributions(&planning.distributions, &slots)?;
        Ok(solver)
    }

    /// Installs every constraint of the set, in the set's iteration order.
    pub fn add_constraints(
        &mut self,
        constraints: &Constraints,
        slots: &[Slot],
    ) -> Result<(), RosterError> {
        if self.added_constraints.contains(&constraints.id) {
            warn!(id = constraints.id, "constraint set already added, skipping");
            return Ok(());
        }
        for constraint in constraints.iter() {
            constraint.add_constraint(slots, &mut self.program, &self.employee_slots)?;
        }
        self.added_constraints.push(constraints.id);
        Ok(())
    }

    /// Installs every distribution of the set, in insertion order.
    pub fn add_distributions(
        &mut self,
        distributions: &Distributions,
        slots: &[Slot],
    ) -> Result<(), RosterError> {
        if self.added_distributions.contains(&distributions.id) {
            warn!(
                id = distributions.id,
                "distribution set already added, skipping"
            );
            return Ok(());
        }
        for distribution in distributions.iter() {
            distribution.add_distribution(slots, &mut self.program, &self.employee_slots)?;
        }
        self.added_distributions.push(distributions.id);
        Ok(())
    }

    /// Builds the optimization objective on top of the installed relations.
    pub fn add_optimization(
        &mut self,
        optimization: &PlanningOptimization,
        slots: &[Slot],
    ) -> Result<(), RosterError> {
        optimization.add_optimization(slots, &mut self.program, &self.employee_slots)
    }

    /// Hands the finished program to the caller.
    pub fn into_program(self) -> CpModel {
        self.program
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Solver;
    use crate::constraints::WorkersPerShift;
    use crate::days::Day;
    use crate::distributions::EmployeeHours;
    use crate::employee::EmployeeId;
    use crate::periods::Period;
    use crate::planning::Planning;

    fn week_planning() -> Planning {
        let employee_hours: EmployeeHours = (0..10).map(|id| (EmployeeId(id), 1)).collect();
        Planning::new(
            1,
            Day::new(NaiveDate::from_ymd_opt(2002, 2, 4).unwrap()),
            Day::new(NaiveDate::from_ymd_opt(2002, 2, 10).unwrap()),
            vec![Period::Day, Period::Evening],
            8,
            1,
            employee_hours,
        )
        .unwrap()
    }

    #[test]
    fn allocates_the_full_product_of_variables() {
        let planning = week_planning();
        let shifts: Vec<_> = planning.shifts().collect();
        let solver = Solver::new(planning.id, &planning.employee_ids(), &shifts);

        // 10 employees × 7 days × 2 periods.
        assert_eq!(solver.program.num_variables(), 140);
        assert_eq!(solver.employee_slots.len(), 140);
        assert!(solver
            .program
            .variables()
            .iter()
            .all(|variable| variable.is_bool()));
    }

    #[test]
    fn labels_carry_employee_and_shift_diagnostics() {
        let planning = week_planning();
        let shifts: Vec<_> = planning.shifts().collect();
        let solver = Solver::new(planning.id, &planning.employee_ids(), &shifts);

        let names: Vec<&str> = solver
            .program
            .variables()
            .iter()
            .map(|variable| variable.name.as_str())
            .collect();
        assert_eq!(
            names.iter().filter(|name| name.contains("Wednesday")).count(),
            20
        );
        assert_eq!(
            names
                .iter()
                .filter(|name| name.contains("Employee: 0;"))
                .count(),
            14
        );
        assert_eq!(
            names.iter().filter(|name| name.contains("day shift")).count(),
            70
        );
    }

    #[test]
    fn variable_order_follows_the_employee_shift_product() {
        let planning = week_planning();
        let shifts: Vec<_> = planning.shifts().collect();
        let solver = Solver::new(planning.id, &planning.employee_ids(), &shifts);

        let first_key = solver.employee_slots.iter().next().unwrap();
        assert_eq!(*first_key.0, (EmployeeId(0), shifts[0]));
        assert_eq!(first_key.1.index(), 0);

        let indices: Vec<usize> = solver
            .employee_slots
            .values()
            .map(|var| var.index())
            .collect();
        assert!(indices.windows(2).all(|pair| pair[0] + 1 == pair[1]));
    }

    #[test]
    fn from_planning_installs_constraints_and_distributions() {
        let mut planning = week_planning();
        planning.constraints.add(WorkersPerShift::default(), None);
        planning
            .distributions
            .add(crate::distributions::NShifts::new(0), None);

        let solver = Solver::from_planning(&planning).unwrap();
        // 14 coverage relations plus 10 distribution brackets.
        assert_eq!(solver.program.num_constraints(), 24);
    }

    #[test]
    fn readding_the_same_aggregate_id_is_skipped() {
        let mut planning = week_planning();
        planning.constraints.add(WorkersPerShift::default(), None);
        let slots = planning.slots();
        let shifts: Vec<_> = planning.shifts().collect();

        let mut solver = Solver::new(planning.id, &planning.employee_ids(), &shifts);
        solver.add_constraints(&planning.constraints, &slots).unwrap();
        let installed = solver.program.num_constraints();
        solver.add_constraints(&planning.constraints, &slots).unwrap();
        assert_eq!(solver.program.num_constraints(), installed);
    }
}
