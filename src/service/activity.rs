use super::EntityService;
use crate::entity::{Activity, ActivityType};

impl EntityService<Activity> {
    pub async fn filter_by_type(&self, kind: ActivityType) -> Vec<Activity> {
        self.filter_by("type_c", kind.as_str()).await
    }

    pub async fn filter_by_employee(&self, employee_id: i64) -> Vec<Activity> {
        self.filter_by("employee_id_c", employee_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::ActivityType;
    use crate::gateway::memory::MemoryTransport;
    use crate::gateway::RecordGateway;
    use crate::service::ActivityService;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn type_and_employee_filters_are_exact() {
        let store = Arc::new(MemoryTransport::new());
        store.insert("activity_c", json!({"Name_c": "Sync", "type_c": "Meeting", "employee_id_c": 1}));
        store.insert("activity_c", json!({"Name_c": "Ping", "type_c": "Call", "employee_id_c": 2}));
        store.insert("activity_c", json!({"Name_c": "Retro", "type_c": "Meeting", "employee_id_c": 2}));
        let service = ActivityService::new(RecordGateway::new(store));

        let meetings = service.filter_by_type(ActivityType::Meeting).await;
        assert_eq!(meetings.len(), 2);
        assert!(meetings.iter().all(|a| a.kind == Some(ActivityType::Meeting)));

        let for_two = service.filter_by_employee(2).await;
        assert_eq!(for_two.len(), 2);

        let found = service.search("retro").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Retro");
    }
}
