//! Leave request entity
//!
//! Table: leave_request_c. A request starts `Pending` and is decided once by
//! an approver; `approve`/`reject` write status and approver together.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{lenient_enum, lenient_string, reference_or_null};
use super::{dates, Entity, Reference};
use crate::gateway::{OrderBy, Record};

pub const TABLE: &str = "leave_request_c";

labelled_enum!(LeaveType {
    Vacation => "Vacation",
    Sick => "Sick",
    Personal => "Personal",
    Emergency => "Emergency",
    Maternity => "Maternity",
    Paternity => "Paternity",
});

labelled_enum!(
    /// Decision state of a request
    LeaveStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "employee_id_c", default)]
    pub employee: Reference,

    #[serde(rename = "start_date_c", default, deserialize_with = "lenient_string")]
    pub start_date: String,

    #[serde(rename = "end_date_c", default, deserialize_with = "lenient_string")]
    pub end_date: String,

    #[serde(rename = "type_c", default, deserialize_with = "lenient_enum")]
    pub kind: Option<LeaveType>,

    #[serde(rename = "reason_c", default, deserialize_with = "lenient_string")]
    pub reason: String,

    #[serde(rename = "status_c", default, deserialize_with = "lenient_enum")]
    pub status: Option<LeaveStatus>,

    #[serde(rename = "approved_by_c", default, deserialize_with = "lenient_string")]
    pub approved_by: String,

    #[serde(rename = "request_date_c", default, deserialize_with = "lenient_string")]
    pub request_date: String,
}

impl LeaveRequest {
    pub fn is_pending(&self) -> bool {
        self.status == Some(LeaveStatus::Pending)
    }

    /// Days covered, counting both the first and the last day
    pub fn duration_days(&self) -> Option<i64> {
        dates::inclusive_days(&self.start_date, &self.end_date)
    }

    /// `Jun 10 - Jun 12, 2024`
    pub fn period_label(&self) -> Option<String> {
        dates::period_label(&self.start_date, &self.end_date)
    }

    pub fn request_date_label(&self) -> Option<String> {
        dates::date_label(&self.request_date)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveRequestDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end_date: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub approved_by: String,
    #[serde(deserialize_with = "lenient_string")]
    pub request_date: String,
}

impl LeaveRequestDraft {
    fn fields(&self) -> Record {
        let mut record = Record::new();
        record.insert("employee_id_c".to_string(), reference_or_null(&self.employee_id));
        record.insert("start_date_c".to_string(), json!(self.start_date));
        record.insert("end_date_c".to_string(), json!(self.end_date));
        record.insert("type_c".to_string(), json!(self.kind));
        record.insert("reason_c".to_string(), json!(self.reason));
        record.insert("status_c".to_string(), json!(self.status));
        record.insert("approved_by_c".to_string(), json!(self.approved_by));
        record.insert("request_date_c".to_string(), json!(self.request_date));
        record
    }
}

/// Partial update recording a decision
pub fn decision_record(id: i64, status: LeaveStatus, approver: &str) -> Record {
    let mut record = Record::new();
    record.insert("Id".to_string(), json!(id));
    record.insert("status_c".to_string(), json!(status.as_str()));
    record.insert("approved_by_c".to_string(), json!(approver));
    record
}

impl Entity for LeaveRequest {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "leave request";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "employee_id_c",
        "start_date_c",
        "end_date_c",
        "type_c",
        "reason_c",
        "status_c",
        "approved_by_c",
        "request_date_c",
    ];

    type Draft = LeaveRequestDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("request_date_c"))
    }

    fn create_record(draft: &LeaveRequestDraft) -> Record {
        let mut record = draft.fields();
        let name = if draft.name.trim().is_empty() {
            format!("Leave Request {}", dates::now_millis())
        } else {
            draft.name.clone()
        };
        record.insert("Name".to_string(), json!(name));
        if draft.status.trim().is_empty() {
            record.insert("status_c".to_string(), json!(LeaveStatus::Pending.as_str()));
        }
        if draft.request_date.trim().is_empty() {
            record.insert("request_date_c".to_string(), json!(dates::now_iso()));
        }
        record
    }

    fn update_record(id: i64, draft: &LeaveRequestDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LeaveRequest {
        serde_json::from_value(json!({
            "Id": 1,
            "employee_id_c": 3,
            "start_date_c": "2024-06-10T00:00:00.000Z",
            "end_date_c": "2024-06-12T00:00:00.000Z",
            "type_c": "Vacation",
            "status_c": "Pending",
            "request_date_c": "2024-06-01T10:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn duration_is_inclusive() {
        let leave = sample();
        assert_eq!(leave.duration_days(), Some(3));
        assert_eq!(leave.period_label().as_deref(), Some("Jun 10 - Jun 12, 2024"));
        assert_eq!(leave.request_date_label().as_deref(), Some("Jun 01, 2024"));
        assert!(leave.is_pending());
    }

    #[test]
    fn create_applies_defaults() {
        let record = LeaveRequest::create_record(&LeaveRequestDraft {
            employee_id: "3".to_string(),
            kind: "Sick".to_string(),
            ..Default::default()
        });
        assert_eq!(record["status_c"], "Pending");
        assert_eq!(record["approved_by_c"], "");
        assert!(record["Name"].as_str().unwrap().starts_with("Leave Request "));
        assert!(dates::parse_timestamp(record["request_date_c"].as_str().unwrap()).is_some());
    }

    #[test]
    fn decision_is_one_partial_record() {
        let record = decision_record(5, LeaveStatus::Approved, "HR Admin");
        assert_eq!(record.len(), 3);
        assert_eq!(record["status_c"], "Approved");
        assert_eq!(record["approved_by_c"], "HR Admin");
    }
}
