use chrono::Weekday;

use cp_model::{CpModel, LinExpr};

use crate::days::WEEK_DAYS;
use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::shifts::Slot;
use crate::solver::{slot_var, SlotVars};

/// Builds the objective that concentrates every employee's work on a small
/// recurring set of week days.
///
/// Per employee and week day, a boolean `any` records whether the employee
/// works that week day at all; per employee, an integer `peak` records the
/// largest number of same-week-day assignments. Minimizing `Σ any − Σ peak`
/// trades fewer distinct week days against taller recurring stacks.
#[derive(Debug, Clone)]
pub struct PlanningOptimization {
    pub employee_ids: Vec<EmployeeId>,
    pub week_days: Vec<Weekday>,
}

impl PlanningOptimization {
    pub fn new(employee_ids: Vec<EmployeeId>) -> Self {
        Self {
            employee_ids,
            week_days: WEEK_DAYS.to_vec(),
        }
    }

    pub fn with_week_days(mut self, week_days: Vec<Weekday>) -> Self {
        self.week_days = week_days;
        self
    }

    pub fn add_optimization(
        &self,
        slots: &[Slot],
        program: &mut CpModel,
        variables: &SlotVars,
    ) -> Result<(), RosterError> {
        let mut objective = LinExpr::new();

        for &employee_id in &self.employee_ids {
            let peak = program.new_int_var(
                0,
                slots.len() as i64,
                format!("max planned on week day <employee: {employee_id}>"),
            );
            let mut week_day_totals: Vec<LinExpr> = Vec::new();

            for &week_day in &self.week_days {
                let day_vars: Vec<_> = slots
                    .iter()
                    .filter(|slot| slot.shift.day.week_day() == week_day)
                    .map(|slot| slot_var(variables, employee_id, slot.shift))
                    .collect::<Result<_, _>>()?;
                if day_vars.is_empty() {
                    continue;
                }
                let any = program.new_bool_var(format!(
                    "any planned <employee: {employee_id}; week day: {}>",
                    week_day.number_from_monday()
                ));
                program.add_max_equality(
                    any,
                    day_vars.iter().map(|&var| LinExpr::from(var)).collect(),
                );
                week_day_totals.push(LinExpr::sum_of(day_vars));
                objective += LinExpr::from(any);
            }

            if week_day_totals.is_empty() {
                // No slot falls on any chosen week day.
                program.add_equal(LinExpr::from(peak), 0);
            } else {
                program.add_max_equality(peak, week_day_totals);
            }
            objective -= LinExpr::from(peak);
        }

        program.minimize(objective);
        Ok(())
    }
}
