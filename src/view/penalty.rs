use serde::{Deserialize, Serialize};

use super::{newest_first, optional_label, EmployeeDirectory, Listing};
use crate::entity::{Penalty, PenaltyStatus, PenaltyType, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyFilter {
    #[serde(deserialize_with = "optional_label")]
    pub status: Option<PenaltyStatus>,
    #[serde(rename = "type", deserialize_with = "optional_label")]
    pub kind: Option<PenaltyType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PenaltyTypeCounts {
    pub verbal: usize,
    pub written: usize,
    pub suspension: usize,
    pub termination: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PenaltyStats {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    pub by_type: PenaltyTypeCounts,
}

impl Listing for Penalty {
    type Filter = PenaltyFilter;
    type Stats = PenaltyStats;

    fn matches(&self, filter: &PenaltyFilter, _: &EmployeeDirectory) -> bool {
        filter.status.map_or(true, |s| self.status == Some(s))
            && filter.kind.map_or(true, |k| self.kind == Some(k))
    }

    fn sort(rows: &mut [&Self]) {
        newest_first(rows, |p| p.date.as_str());
    }

    fn stats(rows: &[Self], _: &EmployeeDirectory) -> PenaltyStats {
        let status = |s| rows.iter().filter(|p| p.status == Some(s)).count();
        let kind = |k| rows.iter().filter(|p| p.kind == Some(k)).count();
        PenaltyStats {
            total: rows.len(),
            active: status(PenaltyStatus::Active),
            resolved: status(PenaltyStatus::Resolved),
            by_type: PenaltyTypeCounts {
                verbal: kind(PenaltyType::VerbalWarning),
                written: kind(PenaltyType::WrittenWarning),
                suspension: kind(PenaltyType::Suspension),
                termination: kind(PenaltyType::Termination),
            },
        }
    }

    fn employee(&self) -> Option<&Reference> {
        Some(&self.employee)
    }

    fn delete_prompt(&self) -> String {
        "Are you sure you want to delete this penalty record?".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RecordGateway;
    use crate::view::tests::staffed_store;
    use crate::view::ListView;
    use serde_json::json;

    #[tokio::test]
    async fn status_and_type_filters() {
        let store = staffed_store();
        store.insert("penalty_c", json!({"Name": "Late", "employee_id_c": 1, "date_c": "2024-05-01",
            "type_c": "Verbal Warning", "status_c": "Resolved"}));
        store.insert("penalty_c", json!({"Name": "No show", "employee_id_c": 2, "date_c": "2024-06-01",
            "type_c": "Written Warning", "status_c": "Active"}));
        store.insert("penalty_c", json!({"Name": "Misconduct", "employee_id_c": 7, "date_c": "2024-05-15",
            "type_c": "Suspension", "status_c": "Active"}));
        let mut view: ListView<Penalty> = ListView::new(RecordGateway::new(store));
        view.load().await;

        view.set_filter(PenaltyFilter { status: Some(PenaltyStatus::Active), kind: None });
        let names: Vec<_> = view.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["No show", "Misconduct"]);

        view.set_filter(PenaltyFilter {
            status: Some(PenaltyStatus::Active),
            kind: Some(PenaltyType::Suspension),
        });
        assert_eq!(view.visible().len(), 1);
        assert_eq!(
            view.page().rows[0].employee.as_ref().unwrap().name,
            "Unknown Employee"
        );

        let stats = view.stats();
        assert_eq!((stats.active, stats.resolved, stats.total), (2, 1, 3));
        assert_eq!(stats.by_type.written, 1);
    }
}
