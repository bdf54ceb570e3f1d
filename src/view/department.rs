use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{contains_text, EmployeeDirectory, Listing};
use crate::entity::{Department, EmployeeStatus, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentFilter {
    pub query: String,
}

/// Members of one department, derived from employee department names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headcount {
    pub id: i64,
    pub name: String,
    pub total: usize,
    pub active: usize,
    pub on_leave: usize,
}

impl Headcount {
    fn of(department: &Department, directory: &EmployeeDirectory) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
            total: directory.in_department(&department.name).count(),
            active: directory.count_with_status(&department.name, EmployeeStatus::Active),
            on_leave: directory.count_with_status(&department.name, EmployeeStatus::OnLeave),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepartmentStats {
    pub departments: usize,
    pub employees: usize,
    /// Rounded employees per department; 0 without departments
    pub average_size: usize,
    pub headcounts: Vec<Headcount>,
}

impl Listing for Department {
    type Filter = DepartmentFilter;
    type Stats = DepartmentStats;

    const UNKNOWN: &'static str = "Unknown Manager";

    fn matches(&self, filter: &DepartmentFilter, _: &EmployeeDirectory) -> bool {
        let query = filter.query.trim();
        contains_text(&self.name, query) || contains_text(&self.description, query)
    }

    fn stats(rows: &[Self], directory: &EmployeeDirectory) -> DepartmentStats {
        let average_size = if rows.is_empty() {
            0
        } else {
            (directory.len() as f64 / rows.len() as f64).round() as usize
        };
        DepartmentStats {
            departments: rows.len(),
            employees: directory.len(),
            average_size,
            headcounts: rows.iter().map(|d| Headcount::of(d, directory)).collect(),
        }
    }

    fn employee(&self) -> Option<&Reference> {
        Some(&self.manager)
    }

    fn details(&self, directory: &EmployeeDirectory) -> Option<serde_json::Value> {
        let members: Vec<_> = directory
            .in_department(&self.name)
            .map(|e| json!({"id": e.id, "name": e.full_name(), "role": e.role}))
            .collect();
        Some(json!({ "headcount": Headcount::of(self, directory), "members": members }))
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.name)
    }
}
