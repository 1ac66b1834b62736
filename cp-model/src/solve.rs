use std::fmt;
use std::time::Duration;

use crate::expr::{LinExpr, VarId};
use crate::model::CpModel;

/// Reported solver status, mirroring the CP-SAT vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

impl SolveStatus {
    pub fn is_feasible(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Search statistics reported alongside a status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub num_conflicts: u64,
    pub num_branches: u64,
    pub wall_time: Duration,
}

/// Result of handing a [`CpModel`] to a solver.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub stats: SolveStats,
    pub objective_value: Option<i64>,
    assignment: Option<Vec<i64>>,
}

impl SolveOutcome {
    pub fn new(
        status: SolveStatus,
        stats: SolveStats,
        objective_value: Option<i64>,
        assignment: Option<Vec<i64>>,
    ) -> Self {
        Self {
            status,
            stats,
            objective_value,
            assignment,
        }
    }

    pub fn infeasible(stats: SolveStats) -> Self {
        Self::new(SolveStatus::Infeasible, stats, None, None)
    }

    pub fn unknown(stats: SolveStats) -> Self {
        Self::new(SolveStatus::Unknown, stats, None, None)
    }

    /// Value of `var` in the found assignment, if any.
    pub fn value(&self, var: VarId) -> Option<i64> {
        self.assignment
            .as_ref()
            .and_then(|values| values.get(var.index()).copied())
    }

    /// Evaluates `expr` against the found assignment.
    pub fn eval(&self, expr: &LinExpr) -> Option<i64> {
        let values = self.assignment.as_ref()?;
        let mut total = expr.constant();
        for (var, coefficient) in expr.terms() {
            total += coefficient * values.get(var.index()).copied()?;
        }
        Some(total)
    }
}

/// Narrow interface a CP-SAT style backend has to satisfy.
pub trait Solve {
    fn solve(&self, model: &CpModel) -> SolveOutcome;
}
