use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{
    newest_first, optional_label, Confirmation, EmployeeDirectory, ListView, Listing,
    PendingAction, ViewError,
};
use crate::entity::{LeaveRequest, LeaveStatus, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveFilter {
    #[serde(deserialize_with = "optional_label")]
    pub status: Option<LeaveStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaveStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl Listing for LeaveRequest {
    type Filter = LeaveFilter;
    type Stats = LeaveStats;

    fn matches(&self, filter: &LeaveFilter, _: &EmployeeDirectory) -> bool {
        filter.status.map_or(true, |s| self.status == Some(s))
    }

    fn sort(rows: &mut [&Self]) {
        newest_first(rows, |r| r.request_date.as_str());
    }

    fn stats(rows: &[Self], _: &EmployeeDirectory) -> LeaveStats {
        let count = |status| rows.iter().filter(|r| r.status == Some(status)).count();
        LeaveStats {
            total: rows.len(),
            pending: count(LeaveStatus::Pending),
            approved: count(LeaveStatus::Approved),
            rejected: count(LeaveStatus::Rejected),
        }
    }

    fn employee(&self) -> Option<&Reference> {
        Some(&self.employee)
    }

    fn details(&self, _: &EmployeeDirectory) -> Option<serde_json::Value> {
        Some(json!({
            "duration_days": self.duration_days(),
            "period": self.period_label(),
            "requested": self.request_date_label(),
        }))
    }
}

impl ListView<LeaveRequest> {
    /// A pending request of the current snapshot
    fn pending_request(&self, id: i64) -> Result<&LeaveRequest, ViewError> {
        let request = self.find(id).ok_or(ViewError::NotListed(id))?;
        if !request.is_pending() {
            let status = request.status.map(|s| s.as_str()).unwrap_or("decided");
            return Err(ViewError::AlreadyDecided(format!(
                "Leave request {} is already {}",
                id, status
            )));
        }
        Ok(request)
    }

    /// Approve a request that is still pending in the snapshot, then reload
    pub async fn approve(&mut self, id: i64, approver: &str) -> Result<LeaveRequest, ViewError> {
        self.pending_request(id)?;
        let approved = self.service().approve(id, approver).await?;
        self.load().await;
        Ok(approved)
    }

    pub fn request_reject(&mut self, id: i64) -> Result<&Confirmation, ViewError> {
        self.pending_request(id)?;
        self.pending = Some(Confirmation {
            action: PendingAction::Reject,
            id,
            prompt: "Are you sure you want to reject this leave request?".to_string(),
        });
        self.pending().ok_or(ViewError::NothingToConfirm)
    }

    pub async fn confirm_reject(&mut self, approver: &str) -> Result<LeaveRequest, ViewError> {
        let confirmation = self.take_pending(PendingAction::Reject)?;
        let rejected = self.service().reject(confirmation.id, approver).await?;
        self.load().await;
        Ok(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RecordGateway;
    use crate::view::tests::staffed_store;
    use serde_json::json;

    async fn view() -> ListView<LeaveRequest> {
        let store = staffed_store();
        store.insert("leave_request_c", json!({"employee_id_c": 1, "type_c": "Vacation",
            "start_date_c": "2024-06-10T00:00:00.000Z", "end_date_c": "2024-06-12T00:00:00.000Z",
            "status_c": "Pending", "request_date_c": "2024-06-01T00:00:00.000Z"}));
        store.insert("leave_request_c", json!({"employee_id_c": 2, "type_c": "Sick",
            "status_c": "Rejected", "request_date_c": "2024-06-03T00:00:00.000Z"}));
        let mut view = ListView::new(RecordGateway::new(store));
        view.load().await;
        view
    }

    #[tokio::test]
    async fn approve_once_per_snapshot() {
        let mut view = view().await;
        let approved = view.approve(1, "HR Admin").await.unwrap();
        assert_eq!(approved.status, Some(LeaveStatus::Approved));
        assert_eq!(approved.approved_by, "HR Admin");

        let again = view.approve(1, "HR Admin").await;
        assert!(matches!(again, Err(ViewError::AlreadyDecided(ref m)) if m.contains("Approved")));
        assert_eq!(view.stats().approved, 1);
    }

    #[tokio::test]
    async fn reject_requires_confirmation() {
        let mut view = view().await;
        assert!(matches!(view.confirm_reject("HR Admin").await, Err(ViewError::NothingToConfirm)));
        assert!(matches!(view.request_reject(2), Err(ViewError::AlreadyDecided(_))));

        view.request_reject(1).unwrap();
        let rejected = view.confirm_reject("HR Admin").await.unwrap();
        assert_eq!(rejected.status, Some(LeaveStatus::Rejected));
        assert_eq!(view.stats().rejected, 2);
    }

    #[tokio::test]
    async fn rows_carry_duration_and_newest_first() {
        let view = view().await;
        let page = view.page();
        assert_eq!(page.rows[0].record.id, 2);
        let details = page.rows[1].details.clone().unwrap();
        assert_eq!(details["duration_days"], 3);
        assert_eq!(details["period"], "Jun 10 - Jun 12, 2024");
        assert_eq!(page.rows[1].employee.as_ref().unwrap().name, "John Smith");
    }
}
