//! Payment entity (table payment_c)

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::coerce::{amount_or_zero, lenient_enum, lenient_f64, lenient_string, reference_or_null};
use super::{Entity, Reference};
use crate::gateway::{OrderBy, PagingInfo, Record};

pub const TABLE: &str = "payment_c";

labelled_enum!(PaymentStatus {
    Pending => "Pending",
    Completed => "Completed",
    Failed => "Failed",
    Refunded => "Refunded",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "Tags", default, deserialize_with = "lenient_string")]
    pub tags: String,

    #[serde(rename = "employee_c", default)]
    pub employee: Reference,

    #[serde(rename = "payment_date_c", default, deserialize_with = "lenient_string")]
    pub payment_date: String,

    #[serde(rename = "amount_c", default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,

    #[serde(rename = "status_c", default, deserialize_with = "lenient_enum")]
    pub status: Option<PaymentStatus>,

    #[serde(rename = "reason_c", default, deserialize_with = "lenient_string")]
    pub reason: String,

    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_string")]
    pub created_on: String,

    #[serde(rename = "ModifiedOn", default, deserialize_with = "lenient_string")]
    pub modified_on: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tags: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reason: String,
}

impl PaymentDraft {
    fn fields(&self) -> Record {
        let mut record = Record::new();
        record.insert("Name".to_string(), json!(self.name));
        record.insert("Tags".to_string(), json!(self.tags));
        record.insert("employee_c".to_string(), reference_or_null(&self.employee_id));
        record.insert("payment_date_c".to_string(), json!(self.payment_date));
        record.insert("amount_c".to_string(), json!(amount_or_zero(&self.amount)));
        record.insert("status_c".to_string(), json!(self.status));
        record.insert("reason_c".to_string(), json!(self.reason));
        record
    }
}

impl Entity for Payment {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "payment";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "Tags",
        "employee_c",
        "payment_date_c",
        "amount_c",
        "status_c",
        "reason_c",
        "CreatedOn",
        "ModifiedOn",
    ];

    type Draft = PaymentDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("ModifiedOn"))
    }

    fn paging() -> Option<PagingInfo> {
        Some(PagingInfo { limit: 50, offset: 0 })
    }

    fn create_record(draft: &PaymentDraft) -> Record {
        draft.fields()
    }

    fn update_record(id: i64, draft: &PaymentDraft) -> Record {
        let mut record = draft.fields();
        record.insert("Id".to_string(), json!(id));
        record
    }
}
