use serde::{Deserialize, Serialize};

use super::{contains_text, optional_label, EmployeeDirectory, Listing};
use crate::entity::{Payment, PaymentStatus, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentFilter {
    pub query: String,
    #[serde(deserialize_with = "optional_label")]
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
}

impl Listing for Payment {
    type Filter = PaymentFilter;
    type Stats = PaymentStats;

    fn matches(&self, filter: &PaymentFilter, directory: &EmployeeDirectory) -> bool {
        let query = filter.query.trim();
        let employee = directory.name_of(&self.employee, "");
        let text = contains_text(&self.name, query)
            || (!employee.is_empty() && contains_text(&employee, query))
            || contains_text(&self.reason, query)
            || contains_text(&self.tags, query);

        text && filter.status.map_or(true, |s| self.status == Some(s))
    }

    fn stats(rows: &[Self], _: &EmployeeDirectory) -> PaymentStats {
        let count = |status| rows.iter().filter(|p| p.status == Some(status)).count();
        PaymentStats {
            total: rows.len(),
            pending: count(PaymentStatus::Pending),
            completed: count(PaymentStatus::Completed),
            failed: count(PaymentStatus::Failed),
        }
    }

    fn employee(&self) -> Option<&Reference> {
        Some(&self.employee)
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete payment \"{}\"?", self.name)
    }
}
