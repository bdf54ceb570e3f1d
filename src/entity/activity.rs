//! Activity entity (table activity_c)

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{lenient_enum, lenient_string, reference_or_null, text_or_null};
use super::{dates, Entity, Reference};
use crate::gateway::{OrderBy, Record};

pub const TABLE: &str = "activity_c";

labelled_enum!(ActivityType {
    Meeting => "Meeting",
    Call => "Call",
    Email => "Email",
    Task => "Task",
    Other => "Other",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name_c", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "type_c", default, deserialize_with = "lenient_enum")]
    pub kind: Option<ActivityType>,

    #[serde(rename = "description_c", default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(rename = "activity_date_c", default, deserialize_with = "lenient_string")]
    pub activity_date: String,

    #[serde(rename = "employee_id_c", default)]
    pub employee: Reference,

    #[serde(rename = "Tags", default, deserialize_with = "lenient_string")]
    pub tags: String,

    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_string")]
    pub created_on: String,

    #[serde(rename = "ModifiedOn", default, deserialize_with = "lenient_string")]
    pub modified_on: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    /// `YYYY-MM-DDTHH:MM` while editing
    #[serde(deserialize_with = "lenient_string")]
    pub activity_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employee_id: String,
}

impl ActivityDraft {
    fn fields(&self) -> Record {
        let date = dates::to_iso(&self.activity_date)
            .map(serde_json::Value::from)
            .unwrap_or_else(|| text_or_null(&self.activity_date));

        let mut record = Record::new();
        record.insert("Name_c".to_string(), json!(self.name));
        record.insert("type_c".to_string(), json!(self.kind));
        record.insert("description_c".to_string(), json!(self.description));
        record.insert("activity_date_c".to_string(), date);
        record.insert("employee_id_c".to_string(), reference_or_null(&self.employee_id));
        record
    }
}

impl Entity for Activity {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "activity";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "Name_c",
        "type_c",
        "description_c",
        "activity_date_c",
        "employee_id_c",
        "Owner",
        "CreatedOn",
        "CreatedBy",
        "ModifiedOn",
        "ModifiedBy",
        "Tags",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["Name_c", "type_c", "description_c"];

    type Draft = ActivityDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("activity_date_c"))
    }

    fn create_record(draft: &ActivityDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Name".to_string(), json!(draft.name));
        record
    }

    fn update_record(id: i64, draft: &ActivityDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}
