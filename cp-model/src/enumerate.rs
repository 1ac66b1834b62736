//! Exhaustive reference solver.
//!
//! Enumerates every assignment of the free boolean decision variables, so it
//! proves optimality and infeasibility for the programs it accepts. Variables
//! targeted by a `MaxEquality` relation are derived from the free assignment
//! instead of enumerated; any other non-boolean variable, or a search space
//! beyond `max_search_vars` free booleans, is refused with `UNKNOWN`.

use std::time::Instant;

use tracing::warn;

use crate::expr::{LinExpr, VarId};
use crate::model::{Constraint, CpModel};
use crate::solve::{Solve, SolveOutcome, SolveStats, SolveStatus};

pub struct ExhaustiveSolver {
    pub max_search_vars: u32,
}

impl ExhaustiveSolver {
    pub fn new(max_search_vars: u32) -> Self {
        Self { max_search_vars }
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new(24)
    }
}

impl Solve for ExhaustiveSolver {
    fn solve(&self, model: &CpModel) -> SolveOutcome {
        let started = Instant::now();

        let mut derived = vec![false; model.num_variables()];
        for constraint in model.constraints() {
            if let Constraint::MaxEquality { target, .. } = constraint {
                derived[target.index()] = true;
            }
        }

        let mut free = Vec::new();
        for (index, variable) in model.variables().iter().enumerate() {
            if derived[index] {
                continue;
            }
            if !variable.is_bool() {
                warn!(variable = %variable.name, "cannot enumerate a free non-boolean variable");
                return SolveOutcome::unknown(stats_since(started, 0, 0));
            }
            free.push(index);
        }
        if free.len() > self.max_search_vars.min(62) as usize {
            warn!(
                free = free.len(),
                limit = self.max_search_vars,
                "search space too large for exhaustive enumeration"
            );
            return SolveOutcome::unknown(stats_since(started, 0, 0));
        }

        let mut best: Option<(i64, Vec<i64>)> = None;
        let mut first_feasible: Option<Vec<i64>> = None;
        let mut num_conflicts = 0u64;
        let mut num_branches = 0u64;

        for mask in 0u64..(1u64 << free.len()) {
            num_branches += 1;
            let mut values: Vec<Option<i64>> = vec![None; model.num_variables()];
            for (bit, &index) in free.iter().enumerate() {
                values[index] = Some(((mask >> bit) & 1) as i64);
            }
            if !derive_and_check(model, &mut values) {
                num_conflicts += 1;
                continue;
            }
            let values: Vec<i64> = values
                .into_iter()
                .map(|value| value.unwrap_or_default())
                .collect();
            match model.objective() {
                Some(objective) => {
                    let score = eval(objective, &values);
                    let improves = best
                        .as_ref()
                        .map_or(true, |(incumbent, _)| score < *incumbent);
                    if improves {
                        best = Some((score, values));
                    }
                }
                None => {
                    if first_feasible.is_none() {
                        first_feasible = Some(values);
                    }
                }
            }
        }

        let stats = stats_since(started, num_conflicts, num_branches);
        match (model.objective().is_some(), best, first_feasible) {
            (true, Some((score, values)), _) => {
                SolveOutcome::new(SolveStatus::Optimal, stats, Some(score), Some(values))
            }
            (false, _, Some(values)) => {
                SolveOutcome::new(SolveStatus::Feasible, stats, None, Some(values))
            }
            _ => SolveOutcome::infeasible(stats),
        }
    }
}

/// Computes `MaxEquality` targets in emission order, then checks every other
/// relation. Returns false as soon as the assignment is ruled out.
fn derive_and_check(model: &CpModel, values: &mut [Option<i64>]) -> bool {
    for constraint in model.constraints() {
        if let Constraint::MaxEquality { target, exprs } = constraint {
            let mut max_value: Option<i64> = None;
            for expr in exprs {
                match eval_partial(expr, values) {
                    Some(value) => {
                        max_value = Some(max_value.map_or(value, |current| current.max(value)));
                    }
                    None => return false,
                }
            }
            let value = max_value.unwrap_or_default();
            let variable = model.variable(*target);
            if value < variable.lo || value > variable.hi {
                return false;
            }
            values[target.index()] = Some(value);
        }
    }

    for constraint in model.constraints() {
        let holds = match constraint {
            Constraint::Linear { expr, lo, hi } => match eval_partial(expr, values) {
                Some(value) => *lo <= value && value <= *hi,
                None => false,
            },
            Constraint::AtMostOne { literals } => count_ones(literals, values) <= 1,
            Constraint::ExactlyOne { literals } => count_ones(literals, values) == 1,
            // Established while deriving.
            Constraint::MaxEquality { .. } => true,
        };
        if !holds {
            return false;
        }
    }
    true
}

fn count_ones(literals: &[VarId], values: &[Option<i64>]) -> usize {
    literals
        .iter()
        .filter(|var| values[var.index()] == Some(1))
        .count()
}

fn eval_partial(expr: &LinExpr, values: &[Option<i64>]) -> Option<i64> {
    let mut total = expr.constant();
    for (var, coefficient) in expr.terms() {
        total += coefficient * values[var.index()]?;
    }
    Some(total)
}

fn eval(expr: &LinExpr, values: &[i64]) -> i64 {
    expr.constant()
        + expr
            .terms()
            .iter()
            .map(|(var, coefficient)| coefficient * values[var.index()])
            .sum::<i64>()
}

fn stats_since(started: Instant, num_conflicts: u64, num_branches: u64) -> SolveStats {
    SolveStats {
        num_conflicts,
        num_branches,
        wall_time: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::ExhaustiveSolver;
    use crate::expr::LinExpr;
    use crate::model::CpModel;
    use crate::solve::{Solve, SolveStatus};

    #[test]
    fn minimizes_over_exactly_one() {
        let mut model = CpModel::new();
        let x = model.new_bool_var("x");
        let y = model.new_bool_var("y");
        model.add_exactly_one([x, y]);
        model.minimize(LinExpr::from(x));

        let outcome = ExhaustiveSolver::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.objective_value, Some(0));
        assert_eq!(outcome.value(x), Some(0));
        assert_eq!(outcome.value(y), Some(1));
        assert_eq!(outcome.stats.num_branches, 4);
    }

    #[test]
    fn reports_infeasible_when_no_assignment_fits() {
        let mut model = CpModel::new();
        let x = model.new_bool_var("x");
        let y = model.new_bool_var("y");
        model.add_equal(LinExpr::sum_of([x, y]), 3);

        let outcome = ExhaustiveSolver::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert_eq!(outcome.stats.num_conflicts, 4);
        assert_eq!(outcome.value(x), None);
    }

    #[test]
    fn derives_max_equality_targets() {
        let mut model = CpModel::new();
        let x = model.new_bool_var("x");
        let y = model.new_bool_var("y");
        let peak = model.new_int_var(0, 2, "peak");
        model.add_equal(LinExpr::sum_of([x, y]), 1);
        model.add_max_equality(peak, vec![LinExpr::from(x), LinExpr::from(y)]);
        model.minimize(LinExpr::from(peak));

        let outcome = ExhaustiveSolver::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Optimal);
        // One of the two booleans is always set, so the peak cannot drop below 1.
        assert_eq!(outcome.objective_value, Some(1));
        assert_eq!(outcome.value(peak), Some(1));
    }

    #[test]
    fn feasible_without_objective() {
        let mut model = CpModel::new();
        let x = model.new_bool_var("x");
        model.add_equal(LinExpr::from(x), 1);

        let outcome = ExhaustiveSolver::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Feasible);
        assert_eq!(outcome.objective_value, None);
        assert_eq!(outcome.value(x), Some(1));
    }

    #[test]
    fn refuses_oversized_search_spaces() {
        let mut model = CpModel::new();
        for index in 0..3 {
            model.new_bool_var(format!("x{index}"));
        }

        let outcome = ExhaustiveSolver::new(2).solve(&model);
        assert_eq!(outcome.status, SolveStatus::Unknown);
    }

    #[test]
    fn refuses_free_integer_variables() {
        let mut model = CpModel::new();
        model.new_int_var(0, 10, "free integer");

        let outcome = ExhaustiveSolver::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Unknown);
    }
}
