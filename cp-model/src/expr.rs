use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde_derive::{Deserialize, Serialize};

/// Handle to a decision variable in a [`CpModel`](crate::CpModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub(crate) u32);

impl VarId {
    /// Position of the variable in the owning model's variable list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Linear expression `Σ coefficient · variable + constant`.
///
/// Terms keep their insertion order so emitted programs are reproducible for
/// identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single term `coefficient · var`.
    pub fn term(var: VarId, coefficient: i64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: 0,
        }
    }

    /// Unweighted sum of `vars`.
    pub fn sum_of<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        Self {
            terms: vars.into_iter().map(|var| (var, 1)).collect(),
            constant: 0,
        }
    }

    pub fn push(&mut self, var: VarId, coefficient: i64) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.constant == 0
    }

    /// Variables referenced by this expression, in term order.
    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.terms.iter().map(|(var, _)| *var)
    }
}

impl From<VarId> for LinExpr {
    fn from(var: VarId) -> Self {
        Self::term(var, 1)
    }
}

impl Add for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: LinExpr) -> LinExpr {
        self += rhs;
        self
    }
}

impl AddAssign for LinExpr {
    fn add_assign(&mut self, rhs: LinExpr) {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
    }
}

impl Sub for LinExpr {
    type Output = LinExpr;

    fn sub(mut self, rhs: LinExpr) -> LinExpr {
        self -= rhs;
        self
    }
}

impl SubAssign for LinExpr {
    fn sub_assign(&mut self, rhs: LinExpr) {
        self.terms
            .extend(rhs.terms.into_iter().map(|(var, coefficient)| (var, -coefficient)));
        self.constant -= rhs.constant;
    }
}

impl Neg for LinExpr {
    type Output = LinExpr;

    fn neg(mut self) -> LinExpr {
        for (_, coefficient) in &mut self.terms {
            *coefficient = -*coefficient;
        }
        self.constant = -self.constant;
        self
    }
}

impl Sum for LinExpr {
    fn sum<I: Iterator<Item = LinExpr>>(iter: I) -> LinExpr {
        iter.fold(LinExpr::new(), Add::add)
    }
}
