//! Department entity
//!
//! Table: department_c. Employees belong to a department by name match on
//! `employee.department_c`, there is no stored relation.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{count_or_zero, lenient_i64, lenient_string, reference_or_null};
use super::{Entity, Reference};
use crate::gateway::{OrderBy, Record};

pub const TABLE: &str = "department_c";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub record_name: String,

    #[serde(rename = "name_c", default, deserialize_with = "lenient_string")]
    pub name: String,

    /// Managing employee
    #[serde(rename = "manager_id_c", default)]
    pub manager: Reference,

    /// Headcount entered at creation; live counts are derived from employees
    #[serde(rename = "employee_count_c", default, deserialize_with = "lenient_i64")]
    pub employee_count: Option<i64>,

    #[serde(rename = "description_c", default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub manager_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employee_count: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

impl DepartmentDraft {
    fn fields(&self) -> Record {
        let mut record = Record::new();
        record.insert("name_c".to_string(), json!(self.name));
        record.insert("manager_id_c".to_string(), reference_or_null(&self.manager_id));
        record.insert(
            "employee_count_c".to_string(),
            json!(count_or_zero(&self.employee_count)),
        );
        record.insert("description_c".to_string(), json!(self.description));
        record
    }
}

impl Entity for Department {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "department";
    const FIELDS: &'static [&'static str] =
        &["Name", "name_c", "manager_id_c", "employee_count_c", "description_c"];

    type Draft = DepartmentDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("name_c"))
    }

    fn create_record(draft: &DepartmentDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Name".to_string(), json!(draft.name));
        record
    }

    fn update_record(id: i64, draft: &DepartmentDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}
