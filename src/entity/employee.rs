//! Employee entity
//!
//! Table: employee_c

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{amount_or_zero, lenient_enum, lenient_f64, lenient_string};
use super::Entity;
use crate::gateway::{OrderBy, Record};

pub const TABLE: &str = "employee_c";

labelled_enum!(
    /// Employment status
    EmployeeStatus {
        Active => "Active",
        Inactive => "Inactive",
        OnLeave => "On Leave",
        Terminated => "Terminated",
    }
);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "Id")]
    pub id: i64,

    /// Display name, "first last"
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "first_name_c", default, deserialize_with = "lenient_string")]
    pub first_name: String,

    #[serde(rename = "last_name_c", default, deserialize_with = "lenient_string")]
    pub last_name: String,

    #[serde(rename = "email_c", default, deserialize_with = "lenient_string")]
    pub email: String,

    #[serde(rename = "phone_c", default, deserialize_with = "lenient_string")]
    pub phone: String,

    #[serde(rename = "photo_url_c", default, deserialize_with = "lenient_string")]
    pub photo_url: String,

    /// Department name; membership is matched by name, not by id
    #[serde(rename = "department_c", default, deserialize_with = "lenient_string")]
    pub department: String,

    #[serde(rename = "role_c", default, deserialize_with = "lenient_string")]
    pub role: String,

    #[serde(rename = "hire_date_c", default, deserialize_with = "lenient_string")]
    pub hire_date: String,

    #[serde(rename = "salary_c", default, deserialize_with = "lenient_f64")]
    pub salary: Option<f64>,

    #[serde(rename = "status_c", default, deserialize_with = "lenient_enum")]
    pub status: Option<EmployeeStatus>,

    #[serde(rename = "address_street_c", default, deserialize_with = "lenient_string")]
    pub address_street: String,

    #[serde(rename = "address_city_c", default, deserialize_with = "lenient_string")]
    pub address_city: String,

    #[serde(rename = "address_state_c", default, deserialize_with = "lenient_string")]
    pub address_state: String,

    #[serde(rename = "address_zip_code_c", default, deserialize_with = "lenient_string")]
    pub address_zip_code: String,

    #[serde(rename = "emergency_contact_name_c", default, deserialize_with = "lenient_string")]
    pub emergency_contact_name: String,

    #[serde(rename = "emergency_contact_relationship_c", default, deserialize_with = "lenient_string")]
    pub emergency_contact_relationship: String,

    #[serde(rename = "emergency_contact_phone_c", default, deserialize_with = "lenient_string")]
    pub emergency_contact_phone: String,
}

impl Employee {
    /// "first last", falling back to the record name
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.name.clone()
        } else {
            full.to_string()
        }
    }
}

/// Editable employee fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub photo_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hire_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub salary: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address_street: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address_city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address_state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address_zip_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub emergency_contact_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub emergency_contact_relationship: String,
    #[serde(deserialize_with = "lenient_string")]
    pub emergency_contact_phone: String,
}

impl EmployeeDraft {
    fn fields(&self) -> Record {
        let value = json!({
            "first_name_c": self.first_name,
            "last_name_c": self.last_name,
            "email_c": self.email,
            "phone_c": self.phone,
            "photo_url_c": self.photo_url,
            "department_c": self.department,
            "role_c": self.role,
            "hire_date_c": self.hire_date,
            "salary_c": amount_or_zero(&self.salary),
            "status_c": self.status,
            "address_street_c": self.address_street,
            "address_city_c": self.address_city,
            "address_state_c": self.address_state,
            "address_zip_code_c": self.address_zip_code,
            "emergency_contact_name_c": self.emergency_contact_name,
            "emergency_contact_relationship_c": self.emergency_contact_relationship,
            "emergency_contact_phone_c": self.emergency_contact_phone,
        });
        match value {
            serde_json::Value::Object(map) => map,
            _ => Record::new(),
        }
    }
}

impl Entity for Employee {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "employee";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "first_name_c",
        "last_name_c",
        "email_c",
        "phone_c",
        "photo_url_c",
        "department_c",
        "role_c",
        "hire_date_c",
        "salary_c",
        "status_c",
        "address_street_c",
        "address_city_c",
        "address_state_c",
        "address_zip_code_c",
        "emergency_contact_name_c",
        "emergency_contact_relationship_c",
        "emergency_contact_phone_c",
    ];
    const SEARCH_FIELDS: &'static [&'static str] =
        &["first_name_c", "last_name_c", "email_c", "department_c", "role_c"];

    type Draft = EmployeeDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("first_name_c"))
    }

    fn create_record(draft: &EmployeeDraft) -> Record {
        let mut record = draft.fields();
        record.insert(
            "Name".to_string(),
            json!(format!("{} {}", draft.first_name, draft.last_name)),
        );
        record
    }

    fn update_record(id: i64, draft: &EmployeeDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_record() {
        let employee: Employee = serde_json::from_value(json!({
            "Id": 1,
            "Name": "John Smith",
            "first_name_c": "John",
            "last_name_c": null,
            "salary_c": "52000",
            "status_c": "On Leave"
        }))
        .unwrap();

        assert_eq!(employee.last_name, "");
        assert_eq!(employee.salary, Some(52000.0));
        assert_eq!(employee.status, Some(EmployeeStatus::OnLeave));
        assert_eq!(employee.full_name(), "John");
    }

    #[test]
    fn unknown_status_reads_as_none() {
        let employee: Employee =
            serde_json::from_value(json!({"Id": 2, "status_c": "Retired"})).unwrap();
        assert_eq!(employee.status, None);
    }

    #[test]
    fn create_payload_coerces_salary_and_names() {
        let draft = EmployeeDraft {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            salary: "abc".to_string(),
            ..Default::default()
        };
        let record = Employee::create_record(&draft);
        assert_eq!(record["Name"], "Jane Doe");
        assert_eq!(record["salary_c"], json!(0.0));

        let update = Employee::update_record(9, &draft);
        assert_eq!(update["Id"], 9);
        assert!(update.get("Name").is_none());
    }
}
