use super::{EntityService, ServiceResult};
use crate::entity::leave_request::decision_record;
use crate::entity::{LeaveRequest, LeaveStatus};

impl EntityService<LeaveRequest> {
    pub async fn get_by_employee(&self, employee_id: i64) -> Vec<LeaveRequest> {
        self.filter_by("employee_id_c", employee_id).await
    }

    /// Requests with the given status; `None` lists every request
    pub async fn get_by_status(&self, status: Option<LeaveStatus>) -> Vec<LeaveRequest> {
        match status {
            Some(status) => self.filter_by("status_c", status.as_str()).await,
            None => self.get_all().await,
        }
    }

    /// Set status and approver in a single partial update
    pub async fn approve(&self, id: i64, approver: &str) -> ServiceResult<LeaveRequest> {
        self.patch(decision_record(id, LeaveStatus::Approved, approver)).await
    }

    pub async fn reject(&self, id: i64, approver: &str) -> ServiceResult<LeaveRequest> {
        self.patch(decision_record(id, LeaveStatus::Rejected, approver)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::LeaveStatus;
    use crate::gateway::memory::MemoryTransport;
    use crate::gateway::RecordGateway;
    use crate::service::LeaveRequestService;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> LeaveRequestService {
        let store = Arc::new(MemoryTransport::new());
        store.insert(
            "leave_request_c",
            json!({"employee_id_c": 1, "status_c": "Pending", "request_date_c": "2024-06-01T00:00:00.000Z"}),
        );
        store.insert(
            "leave_request_c",
            json!({"employee_id_c": 2, "status_c": "Approved", "request_date_c": "2024-06-02T00:00:00.000Z"}),
        );
        LeaveRequestService::new(RecordGateway::new(store))
    }

    #[tokio::test]
    async fn approve_records_status_and_approver() {
        let service = service();
        let approved = service.approve(1, "HR Admin").await.unwrap();
        assert_eq!(approved.status, Some(LeaveStatus::Approved));
        assert_eq!(approved.approved_by, "HR Admin");
        assert_eq!(approved.employee.id, Some(1));
    }

    #[tokio::test]
    async fn status_filter_and_newest_first() {
        let service = service();
        assert_eq!(service.get_by_status(Some(LeaveStatus::Pending)).await.len(), 1);
        let all = service.get_by_status(None).await;
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);

        service.reject(1, "HR Admin").await.unwrap();
        assert!(service.get_by_status(Some(LeaveStatus::Pending)).await.is_empty());
        assert_eq!(service.get_by_employee(1).await[0].status, Some(LeaveStatus::Rejected));
    }
}
