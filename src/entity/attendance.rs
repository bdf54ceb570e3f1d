//! Attendance entity (table attendance_c)

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{lenient_string, reference_or_null};
use super::{dates, Entity, Reference};
use crate::gateway::{OrderBy, Record};

pub const TABLE: &str = "attendance_c";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "employee_id_c", default)]
    pub employee: Reference,

    #[serde(rename = "date_c", default, deserialize_with = "lenient_string")]
    pub date: String,

    #[serde(rename = "check_in_c", default, deserialize_with = "lenient_string")]
    pub check_in: String,

    #[serde(rename = "check_out_c", default, deserialize_with = "lenient_string")]
    pub check_out: String,

    /// Free-form status label
    #[serde(rename = "status_c", default, deserialize_with = "lenient_string")]
    pub status: String,

    #[serde(rename = "notes_c", default, deserialize_with = "lenient_string")]
    pub notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub check_in: String,
    #[serde(deserialize_with = "lenient_string")]
    pub check_out: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: String,
}

impl AttendanceDraft {
    fn fields(&self) -> Record {
        let mut record = Record::new();
        record.insert("employee_id_c".to_string(), reference_or_null(&self.employee_id));
        record.insert("date_c".to_string(), json!(self.date));
        record.insert("check_in_c".to_string(), json!(self.check_in));
        record.insert("check_out_c".to_string(), json!(self.check_out));
        record.insert("status_c".to_string(), json!(self.status));
        record.insert("notes_c".to_string(), json!(self.notes));
        record
    }
}

impl Entity for Attendance {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "attendance";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "employee_id_c",
        "date_c",
        "check_in_c",
        "check_out_c",
        "status_c",
        "notes_c",
    ];

    type Draft = AttendanceDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("date_c"))
    }

    fn create_record(draft: &AttendanceDraft) -> Record {
        let mut record = draft.fields();
        let name = if draft.name.trim().is_empty() {
            format!("Attendance {}", dates::now_millis())
        } else {
            draft.name.clone()
        };
        record.insert("Name".to_string(), json!(name));
        record
    }

    fn update_record(id: i64, draft: &AttendanceDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}
