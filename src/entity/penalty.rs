//! Penalty entity (table penalty_c)

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{amount_or_zero, lenient_enum, lenient_f64, lenient_string, reference_or_null};
use super::{Entity, Reference};
use crate::gateway::{OrderBy, PagingInfo, Record};

pub const TABLE: &str = "penalty_c";

labelled_enum!(PenaltyType {
    VerbalWarning => "Verbal Warning",
    WrittenWarning => "Written Warning",
    Suspension => "Suspension",
    Termination => "Termination",
});

labelled_enum!(PenaltyStatus {
    Active => "Active",
    Resolved => "Resolved",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "employee_id_c", default)]
    pub employee: Reference,

    #[serde(rename = "date_c", default, deserialize_with = "lenient_string")]
    pub date: String,

    #[serde(rename = "type_c", default, deserialize_with = "lenient_enum")]
    pub kind: Option<PenaltyType>,

    #[serde(rename = "reason_c", default, deserialize_with = "lenient_string")]
    pub reason: String,

    #[serde(rename = "amount_c", default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,

    #[serde(rename = "status_c", default, deserialize_with = "lenient_enum")]
    pub status: Option<PenaltyStatus>,

    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_string")]
    pub created_on: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
}

impl PenaltyDraft {
    fn fields(&self) -> Record {
        let mut record = Record::new();
        record.insert("Name".to_string(), json!(self.name));
        record.insert("employee_id_c".to_string(), reference_or_null(&self.employee_id));
        record.insert("date_c".to_string(), json!(self.date));
        record.insert("type_c".to_string(), json!(self.kind));
        record.insert("reason_c".to_string(), json!(self.reason));
        record.insert("amount_c".to_string(), json!(amount_or_zero(&self.amount)));
        record.insert("status_c".to_string(), json!(self.status));
        record
    }
}

impl Entity for Penalty {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "penalty";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "employee_id_c",
        "date_c",
        "type_c",
        "reason_c",
        "amount_c",
        "status_c",
        "CreatedOn",
    ];

    type Draft = PenaltyDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("date_c"))
    }

    fn paging() -> Option<PagingInfo> {
        Some(PagingInfo { limit: 100, offset: 0 })
    }

    fn create_record(draft: &PenaltyDraft) -> Record {
        let mut record = draft.fields();
        if draft.status.trim().is_empty() {
            record.insert("status_c".to_string(), json!(PenaltyStatus::Active.as_str()));
        }
        record
    }

    fn update_record(id: i64, draft: &PenaltyDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_status_and_amount() {
        let record = Penalty::create_record(&PenaltyDraft {
            name: "Late arrival".to_string(),
            employee_id: "1".to_string(),
            kind: "Verbal Warning".to_string(),
            ..Default::default()
        });
        assert_eq!(record["status_c"], "Active");
        assert_eq!(record["amount_c"], json!(0.0));
    }

    #[test]
    fn labels_with_spaces_parse() {
        assert_eq!("Written Warning".parse::<PenaltyType>(), Ok(PenaltyType::WrittenWarning));
        assert!("written warning".parse::<PenaltyType>().is_err());
        assert_eq!(PenaltyType::ALL.len(), 4);
    }
}
