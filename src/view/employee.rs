use serde::{Deserialize, Serialize};

use super::{contains_text, optional_label, optional_text, EmployeeDirectory, Listing};
use crate::entity::{Employee, EmployeeStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeFilter {
    pub query: String,
    #[serde(deserialize_with = "optional_label")]
    pub status: Option<EmployeeStatus>,
    #[serde(deserialize_with = "optional_text")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub on_leave: usize,
    pub terminated: usize,
}

impl Listing for Employee {
    type Filter = EmployeeFilter;
    type Stats = EmployeeStats;

    const USES_DIRECTORY: bool = false;

    fn matches(&self, filter: &EmployeeFilter, _: &EmployeeDirectory) -> bool {
        let query = filter.query.trim();
        let text = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.department,
            &self.role,
        ]
        .iter()
        .any(|field| contains_text(field, query));

        text && filter.status.map_or(true, |s| self.status == Some(s))
            && filter
                .department
                .as_deref()
                .map_or(true, |d| self.department == d)
    }

    fn stats(rows: &[Self], _: &EmployeeDirectory) -> EmployeeStats {
        let count = |status| rows.iter().filter(|e| e.status == Some(status)).count();
        EmployeeStats {
            total: rows.len(),
            active: count(EmployeeStatus::Active),
            inactive: count(EmployeeStatus::Inactive),
            on_leave: count(EmployeeStatus::OnLeave),
            terminated: count(EmployeeStatus::Terminated),
        }
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.full_name())
    }

    fn directory(rows: &[Self], _: Vec<Employee>) -> EmployeeDirectory {
        EmployeeDirectory::new(rows.to_vec())
    }
}
