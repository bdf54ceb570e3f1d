//! Query model sent with fetch requests
//!
//! Mirrors the record API wire format: field selection, `where` conditions,
//! `whereGroups`, `orderBy` and `pagingInfo`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied by a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
    Contains,
}

/// Boolean combinator of a where group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

/// `{"field": {"Name": "..."}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Top-level `where` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

impl Condition {
    pub fn equal_to(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field_name: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        }
    }
}

/// Condition inside a where group (camel-cased on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCondition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubGroup {
    pub conditions: Vec<GroupCondition>,
    pub operator: GroupOperator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: GroupOperator,
    pub sub_groups: Vec<SubGroup>,
}

impl WhereGroup {
    /// OR-combination of case-insensitive substring matches over `fields`
    pub fn contains_any(fields: &[&str], query: &str) -> Self {
        Self {
            operator: GroupOperator::Or,
            sub_groups: fields
                .iter()
                .map(|field| SubGroup {
                    conditions: vec![GroupCondition {
                        field_name: field.to_string(),
                        operator: Operator::Contains,
                        values: vec![Value::String(query.to_string())],
                    }],
                    operator: GroupOperator::Or,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self {
            field_name: field.to_string(),
            sort_type: SortType::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field_name: field.to_string(),
            sort_type: SortType::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u64,
    pub offset: u64,
}

/// Parameters of a fetch request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<FieldSelector>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

impl FetchParams {
    /// Select exactly the given fields
    pub fn select(fields: &[&str]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|name| FieldSelector {
                    field: FieldName {
                        name: name.to_string(),
                    },
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_group(mut self, group: WhereGroup) -> Self {
        self.where_groups.push(group);
        self
    }

    pub fn with_order(mut self, order: Option<OrderBy>) -> Self {
        self.order_by.extend(order);
        self
    }

    pub fn with_paging(mut self, paging: Option<PagingInfo>) -> Self {
        self.paging_info = paging;
        self
    }

    /// Names of the selected fields
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.name.as_str())
    }
}
