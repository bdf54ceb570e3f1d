//! In-process record store
//!
//! Implements the record API query semantics over in-memory tables so the
//! service runs without the hosted backend (local runs, tests).

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::query::{GroupOperator, Operator, SortType, SubGroup, WhereGroup};
use super::{
    Condition, DeletePayload, Envelope, FetchParams, GatewayError, GatewayResult, Record,
    RecordOutcome, RecordTransport, WritePayload,
};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Record>,
}

impl Table {
    fn insert(&mut self, mut record: Record) -> Record {
        let id = match record.get("Id").and_then(Value::as_i64) {
            Some(id) => id,
            None => self.next_id + 1,
        };
        self.next_id = self.next_id.max(id);
        record.insert("Id".to_string(), json!(id));
        self.rows.insert(id, record.clone());
        record
    }
}

/// Memory-backed transport
#[derive(Debug, Default)]
pub struct MemoryTransport {
    tables: DashMap<String, Table>,
    /// (table, field) -> referenced table, expanded to `{Id, Name}` on read
    lookups: HashMap<(String, String), String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that expands the given reference fields on read
    pub fn with_lookups(lookups: &[(&str, &str, &str)]) -> Self {
        let mut store = Self::new();
        for (table, field, target) in lookups {
            store
                .lookups
                .insert((table.to_string(), field.to_string()), target.to_string());
        }
        store
    }

    /// Insert a record directly, returning its id
    pub fn insert(&self, table: &str, record: Value) -> i64 {
        let record = match record {
            Value::Object(map) => map,
            _ => Record::new(),
        };
        let stored = self
            .tables
            .entry(table.to_string())
            .or_default()
            .insert(stamp_created(record));
        stored.get("Id").and_then(Value::as_i64).unwrap_or_default()
    }

    /// Load `{ "<table>": [records...] }` from a JSON file
    pub fn seed_from_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(path)?;
        let seed: BTreeMap<String, Vec<Value>> = serde_json::from_str(&content)?;
        let mut count = 0;
        for (table, records) in seed {
            for record in records {
                self.insert(&table, record);
                count += 1;
            }
        }
        tracing::info!("Seeded memory backend with {} records from {}", count, path.display());
        Ok(())
    }

    /// Number of rows currently stored in `table`
    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }

    /// Project a stored row onto the selected fields and expand references
    fn present(&self, table: &str, record: &Record, params: &FetchParams) -> Record {
        let mut out = Record::new();
        out.insert("Id".to_string(), record.get("Id").cloned().unwrap_or(Value::Null));

        let names: Vec<&str> = params.field_names().collect();
        for (key, value) in record {
            if names.is_empty() || names.contains(&key.as_str()) {
                out.insert(key.clone(), self.expand(table, key, value));
            }
        }
        for name in names {
            out.entry(name.to_string()).or_insert(Value::Null);
        }
        out
    }

    fn expand(&self, table: &str, field: &str, value: &Value) -> Value {
        let Some(target) = self.lookups.get(&(table.to_string(), field.to_string())) else {
            return value.clone();
        };
        let Some(id) = value.as_i64() else {
            return value.clone();
        };
        let name = self
            .tables
            .get(target)
            .and_then(|t| t.rows.get(&id).and_then(|r| r.get("Name").cloned()))
            .unwrap_or(Value::Null);
        json!({ "Id": id, "Name": name })
    }

    fn not_found(id: i64) -> RecordOutcome {
        RecordOutcome::rejected(format!("Record {} not found", id))
    }
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn stamp_created(mut record: Record) -> Record {
    let now = now_stamp();
    record.entry("CreatedOn").or_insert_with(|| json!(now));
    record.entry("ModifiedOn").or_insert_with(|| json!(now));
    record
}

/// Value used for comparisons: references compare by id
fn comparable(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("Id").unwrap_or(value),
        _ => value,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("Name").and_then(text_of),
        _ => None,
    }
}

fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (comparable(left), comparable(right)) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            s.trim().parse::<f64>().ok() == n.as_f64()
        }
        (a, b) => a == b,
    }
}

fn matches(record: &Record, field: &str, operator: Operator, values: &[Value]) -> bool {
    let actual = record.get(field).unwrap_or(&Value::Null);
    match operator {
        Operator::EqualTo => values.iter().any(|v| loosely_equal(actual, v)),
        Operator::Contains => {
            let Some(haystack) = text_of(actual).map(|t| t.to_lowercase()) else {
                return false;
            };
            values
                .iter()
                .filter_map(text_of)
                .any(|needle| haystack.contains(&needle.to_lowercase()))
        }
    }
}

fn combine(operator: GroupOperator, mut results: impl Iterator<Item = bool>) -> bool {
    match operator {
        GroupOperator::And => results.all(|r| r),
        GroupOperator::Or => results.any(|r| r),
    }
}

fn matches_sub_group(record: &Record, group: &SubGroup) -> bool {
    combine(
        group.operator,
        group
            .conditions
            .iter()
            .map(|c| matches(record, &c.field_name, c.operator, &c.values)),
    )
}

fn matches_group(record: &Record, group: &WhereGroup) -> bool {
    combine(
        group.operator,
        group.sub_groups.iter().map(|g| matches_sub_group(record, g)),
    )
}

fn matches_condition(record: &Record, condition: &Condition) -> bool {
    matches(record, &condition.field_name, condition.operator, &condition.values)
}

fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (comparable(left), comparable(right)) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (a, b) => text_of(a).cmp(&text_of(b)),
    }
}

#[async_trait]
impl RecordTransport for MemoryTransport {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> GatewayResult<Envelope<Vec<Record>>> {
        let mut rows: Vec<Record> = match self.tables.get(table) {
            Some(t) => t
                .rows
                .values()
                .filter(|r| params.conditions.iter().all(|c| matches_condition(r, c)))
                .filter(|r| params.where_groups.iter().all(|g| matches_group(r, g)))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        // rows come out of the BTreeMap in id order, so ties keep id order
        rows.sort_by(|a, b| {
            params
                .order_by
                .iter()
                .map(|order| {
                    let null = Value::Null;
                    let ord = compare_values(
                        a.get(&order.field_name).unwrap_or(&null),
                        b.get(&order.field_name).unwrap_or(&null),
                    );
                    match order.sort_type {
                        SortType::Asc => ord,
                        SortType::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        if let Some(paging) = params.paging_info {
            rows = rows
                .into_iter()
                .skip(paging.offset as usize)
                .take(paging.limit as usize)
                .collect();
        }

        let data = rows.iter().map(|r| self.present(table, r, params)).collect();
        Ok(Envelope::ok(data))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &FetchParams,
    ) -> GatewayResult<Envelope<Record>> {
        let row = self
            .tables
            .get(table)
            .and_then(|t| t.rows.get(&id).cloned())
            .ok_or(GatewayError::NotFound)?;
        Ok(Envelope::ok(self.present(table, &row, params)))
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &WritePayload,
    ) -> GatewayResult<Envelope<Value>> {
        let mut entry = self.tables.entry(table.to_string()).or_default();
        let results = payload
            .records
            .iter()
            .map(|record| {
                let mut record = record.clone();
                record.remove("Id");
                let stored = entry.insert(stamp_created(record));
                RecordOutcome::saved(stored)
            })
            .collect();
        Ok(Envelope::with_results(results))
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &WritePayload,
    ) -> GatewayResult<Envelope<Value>> {
        let mut entry = self.tables.entry(table.to_string()).or_default();
        let results = payload
            .records
            .iter()
            .map(|record| {
                let Some(id) = record.get("Id").and_then(Value::as_i64) else {
                    return RecordOutcome::rejected("Id is required for update");
                };
                let Some(row) = entry.rows.get_mut(&id) else {
                    return Self::not_found(id);
                };
                for (key, value) in record {
                    row.insert(key.clone(), value.clone());
                }
                row.insert("ModifiedOn".to_string(), json!(now_stamp()));
                RecordOutcome::saved(row.clone())
            })
            .collect();
        Ok(Envelope::with_results(results))
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> GatewayResult<Envelope<Value>> {
        let mut entry = self.tables.entry(table.to_string()).or_default();
        let results = payload
            .record_ids
            .iter()
            .map(|id| match entry.rows.remove(id) {
                Some(_) => RecordOutcome {
                    success: true,
                    data: Some(Map::from_iter([("Id".to_string(), json!(id))])),
                    ..Default::default()
                },
                None => Self::not_found(*id),
            })
            .collect();
        Ok(Envelope::with_results(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{OrderBy, PagingInfo};

    fn store() -> MemoryTransport {
        let store = MemoryTransport::with_lookups(&[("leave_request_c", "employee_id_c", "employee_c")]);
        store.insert("employee_c", json!({"Name": "John Smith", "first_name_c": "John", "status_c": "Active"}));
        store.insert("employee_c", json!({"Name": "Ann Lee", "first_name_c": "Ann", "status_c": "On Leave"}));
        store.insert("employee_c", json!({"Name": "Bob Ray", "first_name_c": "Bob", "status_c": "Inactive"}));
        store
    }

    #[tokio::test]
    async fn equality_is_exact() {
        let store = store();
        let params = FetchParams::select(&["first_name_c"])
            .with_condition(Condition::equal_to("status_c", "Active"));
        let rows = store.fetch_records("employee_c", &params).await.unwrap().data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["first_name_c"], "John");
    }

    #[tokio::test]
    async fn contains_groups_are_case_insensitive_or() {
        let store = store();
        let params = FetchParams::select(&["first_name_c"])
            .with_group(WhereGroup::contains_any(&["first_name_c", "status_c"], "JO"));
        let rows = store.fetch_records("employee_c", &params).await.unwrap().data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Id"], 1);
    }

    #[tokio::test]
    async fn ordering_and_paging() {
        let store = store();
        let params = FetchParams::select(&["first_name_c"])
            .with_order(Some(OrderBy::asc("first_name_c")))
            .with_paging(Some(PagingInfo { limit: 2, offset: 0 }));
        let rows = store.fetch_records("employee_c", &params).await.unwrap().data.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r["first_name_c"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Ann", "Bob"]);
    }

    #[tokio::test]
    async fn references_expand_to_id_and_name() {
        let store = store();
        store.insert("leave_request_c", json!({"employee_id_c": 2, "status_c": "Pending"}));
        let params = FetchParams::select(&["employee_id_c"])
            .with_condition(Condition::equal_to("employee_id_c", 2));
        let rows = store.fetch_records("leave_request_c", &params).await.unwrap().data.unwrap();
        assert_eq!(rows[0]["employee_id_c"], json!({"Id": 2, "Name": "Ann Lee"}));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_records() {
        let store = store();
        let mut record = Record::new();
        record.insert("Id".to_string(), json!(99));
        let update = store
            .update_records("employee_c", &WritePayload { records: vec![record] })
            .await
            .unwrap();
        assert!(!update.results.unwrap()[0].success);

        let delete = store
            .delete_records("employee_c", &DeletePayload { record_ids: vec![1, 42] })
            .await
            .unwrap();
        let results = delete.results.unwrap();
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(store.len("employee_c"), 2);
    }
}
