use serde_derive::{Deserialize, Serialize};

use crate::expr::{LinExpr, VarId};

/// A decision variable: an inclusive integer domain plus a diagnostic label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub lo: i64,
    pub hi: i64,
}

impl Variable {
    pub fn is_bool(&self) -> bool {
        self.lo == 0 && self.hi == 1
    }
}

/// A single relation emitted into the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// `lo ≤ expr ≤ hi`.
    Linear { expr: LinExpr, lo: i64, hi: i64 },
    /// At most one of `literals` is 1.
    AtMostOne { literals: Vec<VarId> },
    /// Exactly one of `literals` is 1.
    ExactlyOne { literals: Vec<VarId> },
    /// `target == max(exprs)`.
    MaxEquality { target: VarId, exprs: Vec<LinExpr> },
}

/// In-memory constraint program.
///
/// Variables, constraints and the objective are stored in emission order, so
/// two builds from identical inputs produce structurally equal models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpModel {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Option<LinExpr>,
}

impl CpModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.new_int_var(0, 1, name)
    }

    pub fn new_int_var(&mut self, lo: i64, hi: i64, name: impl Into<String>) -> VarId {
        assert!(lo <= hi, "empty domain [{lo}, {hi}] for a new variable");
        let id = VarId(self.variables.len() as u32);
        self.variables.push(Variable {
            name: name.into(),
            lo,
            hi,
        });
        id
    }

    /// `lo ≤ expr ≤ hi`.
    pub fn add_linear(&mut self, expr: LinExpr, lo: i64, hi: i64) {
        self.check_expr(&expr);
        self.constraints.push(Constraint::Linear { expr, lo, hi });
    }

    /// `expr == value`.
    pub fn add_equal(&mut self, expr: LinExpr, value: i64) {
        self.add_linear(expr, value, value);
    }

    /// `expr ≤ max`.
    pub fn add_le(&mut self, expr: LinExpr, max: i64) {
        self.add_linear(expr, i64::MIN, max);
    }

    pub fn add_at_most_one(&mut self, literals: impl IntoIterator<Item = VarId>) {
        let literals: Vec<VarId> = literals.into_iter().collect();
        self.check_vars(&literals);
        self.constraints.push(Constraint::AtMostOne { literals });
    }

    pub fn add_exactly_one(&mut self, literals: impl IntoIterator<Item = VarId>) {
        let literals: Vec<VarId> = literals.into_iter().collect();
        self.check_vars(&literals);
        self.constraints.push(Constraint::ExactlyOne { literals });
    }

    /// `target == max(exprs)`.
    pub fn add_max_equality(&mut self, target: VarId, exprs: Vec<LinExpr>) {
        self.check_vars(&[target]);
        for expr in &exprs {
            self.check_expr(expr);
        }
        self.constraints.push(Constraint::MaxEquality { target, exprs });
    }

    /// Sets the objective to `minimize objective`, replacing any previous one.
    pub fn minimize(&mut self, objective: LinExpr) {
        self.check_expr(&objective);
        self.objective = Some(objective);
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&LinExpr> {
        self.objective.as_ref()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    fn check_expr(&self, expr: &LinExpr) {
        for var in expr.vars() {
            self.check_vars(&[var]);
        }
    }

    // A variable id can only be out of range when it came from another model;
    // that is a programmer error, not a solver-reportable condition.
    fn check_vars(&self, vars: &[VarId]) {
        for var in vars {
            assert!(
                var.index() < self.variables.len(),
                "variable #{} does not belong to this model",
                var.index()
            );
        }
    }
}
