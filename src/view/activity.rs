use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{contains_text, newest_first, optional_id, optional_label, EmployeeDirectory, Listing};
use crate::entity::{Activity, ActivityType, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFilter {
    pub query: String,
    #[serde(rename = "type", deserialize_with = "optional_label")]
    pub kind: Option<ActivityType>,
    #[serde(deserialize_with = "optional_id")]
    pub employee: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityStats {
    pub total: usize,
    pub by_type: BTreeMap<&'static str, usize>,
}

impl Listing for Activity {
    type Filter = ActivityFilter;
    type Stats = ActivityStats;

    fn matches(&self, filter: &ActivityFilter, _: &EmployeeDirectory) -> bool {
        let query = filter.query.trim();
        let kind = self.kind.map(|k| k.as_str()).unwrap_or_default();
        let text = contains_text(&self.name, query)
            || contains_text(kind, query)
            || contains_text(&self.description, query);

        text && filter.kind.map_or(true, |k| self.kind == Some(k))
            && filter.employee.map_or(true, |id| self.employee.id == Some(id))
    }

    fn sort(rows: &mut [&Self]) {
        newest_first(rows, |a| a.activity_date.as_str());
    }

    fn stats(rows: &[Self], _: &EmployeeDirectory) -> ActivityStats {
        let mut by_type: BTreeMap<&'static str, usize> =
            ActivityType::ALL.iter().map(|k| (k.as_str(), 0)).collect();
        for kind in rows.iter().filter_map(|a| a.kind) {
            *by_type.entry(kind.as_str()).or_default() += 1;
        }
        ActivityStats {
            total: rows.len(),
            by_type,
        }
    }

    fn employee(&self) -> Option<&Reference> {
        Some(&self.employee)
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.name)
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
    async fn filters_compose_with_and() {
        let store = staffed_store();
        store.insert("activity_c", json!({"Name_c": "Kickoff", "type_c": "Meeting",
            "activity_date_c": "2024-06-01T09:00:00.000Z", "employee_id_c": 1}));
        store.insert("activity_c", json!({"Name_c": "Vendor call", "type_c": "Call",
            "activity_date_c": "2024-06-03T09:00:00.000Z", "employee_id_c": 1}));
        store.insert("activity_c", json!({"Name_c": "Planning meeting", "type_c": "Meeting",
            "activity_date_c": "2024-06-02T09:00:00.000Z", "employee_id_c": 2}));
        let mut view: ListView<Activity> = ListView::new(RecordGateway::new(store));
        view.load().await;

        let order: Vec<_> = view.visible().iter().map(|a| a.name.clone()).collect();
        assert_eq!(order, vec!["Vendor call", "Planning meeting", "Kickoff"]);

        view.set_filter(ActivityFilter {
            query: "MEETING".to_string(),
            ..Default::default()
        });
        assert_eq!(view.visible().len(), 2);

        view.set_filter(ActivityFilter {
            query: "meeting".to_string(),
            kind: Some(ActivityType::Meeting),
            employee: Some(1),
        });
        let only: Vec<_> = view.visible().iter().map(|a| a.id).collect();
        assert_eq!(only, vec![1]);

        assert_eq!(view.stats().by_type["Meeting"], 2);
        assert_eq!(view.stats().by_type["Email"], 0);
        assert_eq!(view.page().rows[0].employee.as_ref().unwrap().name, "John Smith");
    }
}
