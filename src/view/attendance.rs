use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{newest_first, optional_id, optional_text, EmployeeDirectory, Listing};
use crate::entity::{dates, Attendance, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceFilter {
    #[serde(deserialize_with = "optional_id")]
    pub employee: Option<i64>,
    /// Calendar day, any parseable date form
    #[serde(deserialize_with = "optional_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

impl Listing for Attendance {
    type Filter = AttendanceFilter;
    type Stats = AttendanceStats;

    fn matches(&self, filter: &AttendanceFilter, _: &EmployeeDirectory) -> bool {
        filter.employee.map_or(true, |id| self.employee.id == Some(id))
            && filter
                .date
                .as_deref()
                .map_or(true, |d| dates::to_date_input(d) == dates::to_date_input(&self.date))
            && filter.status.as_deref().map_or(true, |s| self.status == s)
    }

    fn sort(rows: &mut [&Self]) {
        newest_first(rows, |a| a.date.as_str());
    }

    fn stats(rows: &[Self], _: &EmployeeDirectory) -> AttendanceStats {
        let mut by_status = BTreeMap::new();
        for row in rows.iter().filter(|r| !r.status.is_empty()) {
            *by_status.entry(row.status.clone()).or_default() += 1;
        }
        AttendanceStats {
            total: rows.len(),
            by_status,
        }
    }

    fn employee(&self) -> Option<&Reference> {
        Some(&self.employee)
    }
}
