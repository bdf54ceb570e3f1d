use serde::Serialize;
use std::collections::HashMap;

use crate::entity::{Employee, EmployeeStatus, Reference};

/// Employees of the current snapshot, indexed by id
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
    by_id: HashMap<i64, usize>,
}

/// Resolved employee shown beside a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeCard {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub photo_url: String,
    /// `false` when the name came from the embedded lookup or the placeholder
    pub matched: bool,
}

impl EmployeeDirectory {
    pub fn new(employees: Vec<Employee>) -> Self {
        let by_id = employees
            .iter()
            .enumerate()
            .map(|(index, employee)| (employee.id, index))
            .collect();
        Self { employees, by_id }
    }

    pub fn get(&self, id: i64) -> Option<&Employee> {
        self.by_id.get(&id).map(|&index| &self.employees[index])
    }

    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Members of a department, matched by department name
    pub fn in_department<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees.iter().filter(move |e| e.department == department)
    }

    pub fn count_with_status(&self, department: &str, status: EmployeeStatus) -> usize {
        self.in_department(department)
            .filter(|e| e.status == Some(status))
            .count()
    }

    /// Match by id, then the backend's embedded name, then `unknown`
    pub fn resolve(&self, reference: &Reference, unknown: &str) -> EmployeeCard {
        if let Some(employee) = reference.id.and_then(|id| self.get(id)) {
            return EmployeeCard {
                id: Some(employee.id),
                name: employee.full_name(),
                photo_url: employee.photo_url.clone(),
                matched: true,
            };
        }
        EmployeeCard {
            id: reference.id,
            name: reference.embedded_name().unwrap_or(unknown).to_string(),
            photo_url: String::new(),
            matched: false,
        }
    }

    /// Display name for a reference
    pub fn name_of(&self, reference: &Reference, unknown: &str) -> String {
        self.resolve(reference, unknown).name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directory() -> EmployeeDirectory {
        let jane: Employee = serde_json::from_value(json!({
            "Id": 3, "Name": "Jane Doe", "first_name_c": "Jane", "last_name_c": "Doe",
            "department_c": "Sales", "status_c": "Active"
        }))
        .unwrap();
        EmployeeDirectory::new(vec![jane])
    }

    #[test]
    fn resolves_both_reference_shapes() {
        let dir = directory();
        assert_eq!(dir.name_of(&Reference::to(3), "Unknown Employee"), "Jane Doe");
        assert!(dir.resolve(&Reference::named(3, "J. Doe"), "Unknown Employee").matched);
    }

    #[test]
    fn falls_back_to_embedded_then_placeholder() {
        let dir = directory();
        let embedded = dir.resolve(&Reference::named(9, "Former Staff"), "Unknown Employee");
        assert_eq!(embedded.name, "Former Staff");
        assert!(!embedded.matched);
        assert_eq!(dir.name_of(&Reference::to(9), "Unknown Employee"), "Unknown Employee");
        assert_eq!(dir.name_of(&Reference::default(), "Unknown Manager"), "Unknown Manager");
    }

    #[test]
    fn department_membership_by_name() {
        let dir = directory();
        assert_eq!(dir.in_department("Sales").count(), 1);
        assert_eq!(dir.in_department("sales").count(), 0);
        assert_eq!(dir.count_with_status("Sales", EmployeeStatus::Active), 1);
    }
}
