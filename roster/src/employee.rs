use std::fmt;

use serde_derive::{Deserialize, Serialize};

/// Identifier an employee is referenced by throughout a planning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// An employee under contract. Equality is by id.
#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(PartialEq, Eq, Hash)]
pub struct Employee {
    pub id: EmployeeId,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub name: String,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub contract_hours: u32,
    /// Link to the employee's [`Specifications`](crate::specifications::Specifications),
    /// when any were recorded.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub specification_id: Option<u32>,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>, contract_hours: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contract_hours,
            specification_id: None,
        }
    }

    pub fn with_specification(mut self, specification_id: u32) -> Self {
        self.specification_id = Some(specification_id);
        self
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Employee;

    #[test]
    fn equality_is_by_id() {
        let henk = Employee::new(1, "henk", 36);
        let renamed = Employee::new(1, "hendrik", 24).with_specification(7);
        let ingrid = Employee::new(2, "ingrid", 36);

        assert_eq!(henk, renamed);
        assert_ne!(henk, ingrid);
    }

    #[test]
    fn displays_as_the_name() {
        assert_eq!(Employee::new(1, "henk", 36).to_string(), "henk");
        assert_eq!(Employee::new(1, "henk", 36).id.to_string(), "1");
    }
}
