//! Entity services
//!
//! [`EntityService`] adapts one table's schema to typed operations on top of
//! the [`RecordGateway`]. Reads keep the degrade-to-empty contract of the
//! record API (`get_all`, `get_by_id`); `try_get_all` surfaces the failure
//! for callers that must tell "no records" from "load failed". Writes always
//! return a `Result` so the caller can notify the user.

use std::marker::PhantomData;

use serde_json::Value;
use thiserror::Error;

use crate::entity::{
    Activity, Attendance, Department, Employee, Entity, LeaveRequest, Payment, Penalty,
};
use crate::gateway::{
    Condition, FetchParams, GatewayError, Record, RecordGateway, WhereGroup, WriteOutcome,
};

mod activity;
mod attendance;
mod employee;
mod leave_request;

pub type EmployeeService = EntityService<Employee>;
pub type DepartmentService = EntityService<Department>;
pub type ActivityService = EntityService<Activity>;
pub type AttendanceService = EntityService<Attendance>;
pub type LeaveRequestService = EntityService<LeaveRequest>;
pub type PaymentService = EntityService<Payment>;
pub type PenaltyService = EntityService<Penalty>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Per-record failures reported by the backend, one notice each
    #[error("Rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Backend acknowledged the write without returning a record")]
    Empty,

    #[error("Unexpected record shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    /// Messages to show the user
    pub fn notices(&self) -> Vec<String> {
        match self {
            ServiceError::Rejected(notices) => notices.clone(),
            other => vec![other.to_string()],
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct EntityService<E: Entity> {
    gateway: RecordGateway,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self::new(self.gateway.clone())
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(gateway: RecordGateway) -> Self {
        Self {
            gateway,
            _entity: PhantomData,
        }
    }

    /// Full field selection with the table's default order and paging
    pub fn params() -> FetchParams {
        FetchParams::select(E::FIELDS)
            .with_order(E::default_order())
            .with_paging(E::paging())
    }

    pub async fn try_get_all(&self) -> ServiceResult<Vec<E>> {
        self.try_query(Self::params()).await
    }

    /// All records; a failed fetch reads as an empty list
    pub async fn get_all(&self) -> Vec<E> {
        self.query(Self::params()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Option<E> {
        let params = FetchParams::select(E::FIELDS);
        let record = self.gateway.fetch_one(E::TABLE, id, &params).await?;
        match decode::<E>(record) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::error!("Failed to decode {} {}: {}", E::LABEL, id, e);
                None
            }
        }
    }

    pub async fn create(&self, draft: &E::Draft) -> ServiceResult<E> {
        let record = E::create_record(draft);
        let outcome = self.gateway.create(E::TABLE, vec![record]).await?;
        let created = single::<E>(outcome)?;
        tracing::info!("Created {} {}", E::LABEL, created.id());
        Ok(created)
    }

    pub async fn update(&self, id: i64, draft: &E::Draft) -> ServiceResult<E> {
        self.patch(E::update_record(id, draft)).await
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let outcome = self.gateway.delete(E::TABLE, vec![id]).await?;
        if !outcome.failed.is_empty() {
            return Err(ServiceError::Rejected(notices(&outcome)));
        }
        tracing::info!("Deleted {} {}", E::LABEL, id);
        Ok(())
    }

    /// Case-insensitive substring match over the table's search fields
    pub async fn search(&self, query: &str) -> Vec<E> {
        let query = query.trim();
        if query.is_empty() || E::SEARCH_FIELDS.is_empty() {
            return self.get_all().await;
        }
        let params = Self::params().with_group(WhereGroup::contains_any(E::SEARCH_FIELDS, query));
        self.query(params).await
    }

    /// Exact match on one field
    pub async fn filter_by(&self, field: &str, value: impl Into<Value>) -> Vec<E> {
        let params = Self::params().with_condition(Condition::equal_to(field, value));
        self.query(params).await
    }

    /// Partial update carrying its own `Id`
    pub(crate) async fn patch(&self, record: Record) -> ServiceResult<E> {
        let outcome = self.gateway.update(E::TABLE, vec![record]).await?;
        let updated = single::<E>(outcome)?;
        tracing::info!("Updated {} {}", E::LABEL, updated.id());
        Ok(updated)
    }

    pub(crate) async fn query(&self, params: FetchParams) -> Vec<E> {
        match self.try_query(params).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to load {} records: {}", E::LABEL, e);
                Vec::new()
            }
        }
    }

    async fn try_query(&self, params: FetchParams) -> ServiceResult<Vec<E>> {
        let records = self.gateway.try_fetch_all(E::TABLE, &params).await?;
        let rows = records
            .into_iter()
            .filter_map(|record| match decode::<E>(record) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} record: {}", E::LABEL, e);
                    None
                }
            })
            .collect();
        Ok(rows)
    }
}

fn decode<E: Entity>(record: Record) -> Result<E, serde_json::Error> {
    serde_json::from_value(Value::Object(record))
}

fn notices(outcome: &WriteOutcome) -> Vec<String> {
    outcome.failed.iter().flat_map(|r| r.notices()).collect()
}

/// The one record a single-record write produced
fn single<E: Entity>(outcome: WriteOutcome) -> ServiceResult<E> {
    if !outcome.failed.is_empty() {
        return Err(ServiceError::Rejected(notices(&outcome)));
    }
    let record = outcome.saved.into_iter().next().ok_or(ServiceError::Empty)?;
    Ok(decode::<E>(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EmployeeDraft, EmployeeStatus, PaymentDraft};
    use crate::gateway::memory::MemoryTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn seeded() -> (Arc<MemoryTransport>, RecordGateway) {
        let store = Arc::new(MemoryTransport::with_lookups(crate::entity::LOOKUPS));
        store.insert(
            "employee_c",
            json!({"Name": "John Smith", "first_name_c": "John", "last_name_c": "Smith",
                   "email_c": "john@acme.io", "department_c": "Engineering", "status_c": "Active"}),
        );
        store.insert(
            "employee_c",
            json!({"Name": "Ann Lee", "first_name_c": "Ann", "last_name_c": "Lee",
                   "email_c": "ann@acme.io", "department_c": "Sales", "status_c": "On Leave"}),
        );
        let gateway = RecordGateway::new(store.clone());
        (store, gateway)
    }

    #[tokio::test]
    async fn reads_in_default_order() {
        let (_, gateway) = seeded();
        let service = EmployeeService::new(gateway);
        let names: Vec<_> = service.get_all().await.into_iter().map(|e| e.first_name).collect();
        assert_eq!(names, vec!["Ann", "John"]);
    }

    #[tokio::test]
    async fn get_all_is_repeatable() {
        let (_, gateway) = seeded();
        let service = EmployeeService::new(gateway);
        assert_eq!(service.get_all().await, service.get_all().await);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (_, gateway) = seeded();
        let service = EmployeeService::new(gateway);
        let found = service.search("john").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "John");
        assert_eq!(service.search("  ").await.len(), 2);
    }

    #[tokio::test]
    async fn create_then_update_round_trip() {
        let (_, gateway) = seeded();
        let service = EmployeeService::new(gateway);
        let draft = EmployeeDraft {
            first_name: "Mia".to_string(),
            last_name: "Wong".to_string(),
            email: "mia@acme.io".to_string(),
            status: "Active".to_string(),
            ..Default::default()
        };
        let created = service.create(&draft).await.unwrap();
        assert_eq!(created.name, "Mia Wong");

        let draft = EmployeeDraft {
            status: "Terminated".to_string(),
            ..draft
        };
        let updated = service.update(created.id, &draft).await.unwrap();
        assert_eq!(updated.status, Some(EmployeeStatus::Terminated));
        assert_eq!(service.get_by_id(created.id).await.unwrap().status, updated.status);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_rejected() {
        let (_, gateway) = seeded();
        let service = PaymentService::new(gateway);
        let err = service.update(404, &PaymentDraft::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(ref n) if n[0].contains("404")));
        assert!(service.get_by_id(404).await.is_none());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let (store, gateway) = seeded();
        let service = EmployeeService::new(gateway);
        service.delete(1).await.unwrap();
        assert_eq!(store.len("employee_c"), 1);
    }
}
