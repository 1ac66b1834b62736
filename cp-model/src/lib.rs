//! In-memory constraint programs.
//!
//! A [`CpModel`] is a plain value holding boolean/integer decision variables,
//! linear and boolean relations over them, and an optional minimization
//! objective. Builders emit into it; backends consume it through the narrow
//! [`Solve`] interface and report a [`SolveStatus`] plus statistics. The
//! model itself never decides feasibility.
//!
//! [`ExhaustiveSolver`] is a reference backend that proves
//! optimality/infeasibility for small programs, so tests and demos do not
//! need an external CP-SAT library.

pub mod enumerate;
pub mod expr;
pub mod model;
pub mod solve;

pub use enumerate::ExhaustiveSolver;
pub use expr::{LinExpr, VarId};
pub use model::{Constraint, CpModel, Variable};
pub use solve::{Solve, SolveOutcome, SolveStats, SolveStatus};
