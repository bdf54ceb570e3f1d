//! List views
//!
//! A [`ListView`] owns one page's snapshot: the entity's records plus the
//! employee directory used to resolve references. Both are fetched
//! concurrently on load; the snapshot is replaced wholesale after every
//! successful mutation. Filtering, sorting and statistics run synchronously
//! over the snapshot.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

use crate::entity::coerce::parse_int;
use crate::entity::{Employee, Entity, Reference};
use crate::gateway::RecordGateway;
use crate::service::{EmployeeService, EntityService, ServiceError};

mod activity;
mod attendance;
mod department;
mod directory;
mod employee;
mod leave_request;
mod payment;
mod penalty;

pub use activity::{ActivityFilter, ActivityStats};
pub use attendance::{AttendanceFilter, AttendanceStats};
pub use department::{DepartmentFilter, DepartmentStats, Headcount};
pub use directory::{EmployeeCard, EmployeeDirectory};
pub use employee::{EmployeeFilter, EmployeeStats};
pub use leave_request::{LeaveFilter, LeaveStats};
pub use payment::{PaymentFilter, PaymentStats};
pub use penalty::{PenaltyFilter, PenaltyStats, PenaltyTypeCounts};

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Record {0} is not in the current list")]
    NotListed(i64),

    #[error("{0}")]
    AlreadyDecided(String),

    #[error("Nothing is awaiting confirmation")]
    NothingToConfirm,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingAction {
    Delete,
    Reject,
}

/// Destructive action waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub action: PendingAction,
    pub id: i64,
    pub prompt: String,
}

/// Page behavior of an entity: filters, ordering, statistics
pub trait Listing: Entity {
    type Filter: Default + Clone + Serialize + de::DeserializeOwned + Send + Sync;
    type Stats: Serialize;

    /// Whether the page needs the employee directory next to its records
    const USES_DIRECTORY: bool = true;
    /// Placeholder when a reference resolves to nobody
    const UNKNOWN: &'static str = "Unknown Employee";

    fn matches(&self, filter: &Self::Filter, directory: &EmployeeDirectory) -> bool;

    /// Display order of the visible rows; the backend order is kept by default
    fn sort(_rows: &mut [&Self]) {}

    fn stats(rows: &[Self], directory: &EmployeeDirectory) -> Self::Stats;

    /// Employee shown next to the record
    fn employee(&self) -> Option<&Reference> {
        None
    }

    /// Derived fields rendered with the row
    fn details(&self, _directory: &EmployeeDirectory) -> Option<Value> {
        None
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", Self::LABEL)
    }

    fn directory(_rows: &[Self], staff: Vec<Employee>) -> EmployeeDirectory {
        EmployeeDirectory::new(staff)
    }
}

pub struct ListView<E: Listing> {
    service: EntityService<E>,
    employees: EmployeeService,
    state: LoadState,
    records: Vec<E>,
    directory: EmployeeDirectory,
    filter: E::Filter,
    view_mode: ViewMode,
    pending: Option<Confirmation>,
}

impl<E: Listing> ListView<E> {
    pub fn new(gateway: RecordGateway) -> Self {
        Self {
            service: EntityService::new(gateway.clone()),
            employees: EmployeeService::new(gateway),
            state: LoadState::Loading,
            records: Vec::new(),
            directory: EmployeeDirectory::default(),
            filter: E::Filter::default(),
            view_mode: ViewMode::default(),
            pending: None,
        }
    }

    /// Fetch records and the employee directory together; either failing fails the load
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = if E::USES_DIRECTORY {
            tokio::try_join!(self.service.try_get_all(), self.employees.try_get_all())
        } else {
            self.service.try_get_all().await.map(|rows| (rows, Vec::new()))
        };

        match result {
            Ok((rows, staff)) => {
                self.directory = E::directory(&rows, staff);
                self.records = rows;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!("Failed to load {} list: {}", E::LABEL, e);
                self.records.clear();
                self.directory = EmployeeDirectory::default();
                self.state = LoadState::Failed(format!("Failed to load {} records", E::LABEL));
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    pub fn find(&self, id: i64) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn filter(&self) -> &E::Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: E::Filter) {
        self.filter = filter;
    }

    pub fn reset_filters(&mut self) {
        self.filter = E::Filter::default();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }

    /// Filtered and sorted rows of the current snapshot
    pub fn visible(&self) -> Vec<&E> {
        let mut rows: Vec<&E> = self
            .records
            .iter()
            .filter(|r| r.matches(&self.filter, &self.directory))
            .collect();
        E::sort(&mut rows);
        rows
    }

    pub fn stats(&self) -> E::Stats {
        E::stats(&self.records, &self.directory)
    }

    pub fn page(&self) -> ListPage<'_, E> {
        let rows: Vec<Row<'_, E>> = self
            .visible()
            .into_iter()
            .map(|record| Row {
                record,
                employee: record
                    .employee()
                    .map(|reference| self.directory.resolve(reference, E::UNKNOWN)),
                details: record.details(&self.directory),
            })
            .collect();

        ListPage {
            view_mode: self.view_mode,
            filter: &self.filter,
            total: self.records.len(),
            visible: rows.len(),
            rows,
            stats: self.stats(),
        }
    }

    pub fn pending(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    pub fn request_delete(&mut self, id: i64) -> Result<&Confirmation, ViewError> {
        let prompt = self.find(id).ok_or(ViewError::NotListed(id))?.delete_prompt();
        Ok(&*self.pending.insert(Confirmation {
            action: PendingAction::Delete,
            id,
            prompt,
        }))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Run the confirmed delete and reload the snapshot
    pub async fn confirm_delete(&mut self) -> Result<(), ViewError> {
        let confirmation = self.take_pending(PendingAction::Delete)?;
        self.service.delete(confirmation.id).await?;
        self.load().await;
        Ok(())
    }

    pub(crate) fn take_pending(&mut self, action: PendingAction) -> Result<Confirmation, ViewError> {
        match self.pending.take() {
            Some(c) if c.action == action => Ok(c),
            other => {
                self.pending = other;
                Err(ViewError::NothingToConfirm)
            }
        }
    }

    pub(crate) fn service(&self) -> &EntityService<E> {
        &self.service
    }
}

#[derive(Serialize)]
#[serde(bound = "")]
pub struct ListPage<'a, E: Listing> {
    pub view_mode: ViewMode,
    pub filter: &'a E::Filter,
    pub total: usize,
    pub visible: usize,
    pub rows: Vec<Row<'a, E>>,
    pub stats: E::Stats,
}

#[derive(Serialize)]
#[serde(bound = "")]
pub struct Row<'a, E: Listing> {
    #[serde(flatten)]
    pub record: &'a E,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Case-insensitive substring test; an empty needle matches everything
pub(crate) fn contains_text(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Newest first by a date field; rows without a date go last
pub(crate) fn newest_first<E>(rows: &mut [&E], date: impl Fn(&E) -> &str) {
    use crate::entity::dates::sort_key;
    rows.sort_by(|a, b| sort_key(date(b)).cmp(&sort_key(date(a))));
}

/// Filter value given as a label; blank means "any"
pub(crate) fn optional_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Filter value given as an id; blank means "any"
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_i64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_int(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid id: {}", s))),
        Some(other) => Err(de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Filter text; blank means "any"
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EmployeeStatus, Payment};
    use crate::gateway::memory::MemoryTransport;
    use crate::gateway::{DeletePayload, Envelope, FetchParams, GatewayResult, Record, RecordTransport, WritePayload};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    pub(crate) fn staffed_store() -> Arc<MemoryTransport> {
        let store = Arc::new(MemoryTransport::with_lookups(crate::entity::LOOKUPS));
        for (first, last, dept, status) in [
            ("John", "Smith", "Engineering", "Active"),
            ("Ann", "Lee", "Sales", "On Leave"),
            ("Raj", "Patel", "Engineering", "Inactive"),
        ] {
            store.insert(
                "employee_c",
                json!({"Name": format!("{} {}", first, last), "first_name_c": first,
                       "last_name_c": last, "email_c": format!("{}@acme.io", first.to_lowercase()),
                       "department_c": dept, "status_c": status}),
            );
        }
        store
    }

    #[tokio::test]
    async fn status_filter_is_exact_and_resettable() {
        let mut view: ListView<Employee> = ListView::new(RecordGateway::new(staffed_store()));
        view.load().await;
        assert_eq!(view.state(), &LoadState::Ready);
        let everyone: Vec<i64> = view.visible().iter().map(|e| e.id).collect();

        view.set_filter(EmployeeFilter {
            status: Some(EmployeeStatus::Active),
            ..Default::default()
        });
        let active: Vec<_> = view.visible().iter().map(|e| e.first_name.clone()).collect();
        assert_eq!(active, vec!["John"]);

        view.reset_filters();
        let again: Vec<i64> = view.visible().iter().map(|e| e.id).collect();
        assert_eq!(again, everyone);
    }

    #[tokio::test]
    async fn text_query_ignores_case() {
        let mut view: ListView<Employee> = ListView::new(RecordGateway::new(staffed_store()));
        view.load().await;
        view.set_filter(EmployeeFilter {
            query: "john".to_string(),
            ..Default::default()
        });
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.page().total, 3);
        assert_eq!(view.page().visible, 1);
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let mut view: ListView<Employee> = ListView::new(RecordGateway::new(staffed_store()));
        view.load().await;

        assert!(matches!(view.confirm_delete().await, Err(ViewError::NothingToConfirm)));
        assert!(matches!(view.request_delete(99), Err(ViewError::NotListed(99))));

        let prompt = view.request_delete(1).unwrap().prompt.clone();
        assert!(prompt.contains("John Smith"));
        view.cancel();
        assert!(view.pending().is_none());

        view.request_delete(1).unwrap();
        view.confirm_delete().await.unwrap();
        assert_eq!(view.records().len(), 2);
        assert!(view.pending().is_none());
    }

    #[test]
    fn view_mode_toggles() {
        let mut view: ListView<Employee> =
            ListView::new(RecordGateway::new(Arc::new(MemoryTransport::new())));
        assert_eq!(view.view_mode(), ViewMode::Grid);
        view.toggle_view_mode();
        assert_eq!(view.view_mode(), ViewMode::List);
    }

    struct NoEmployees(Arc<MemoryTransport>);

    #[async_trait]
    impl RecordTransport for NoEmployees {
        async fn fetch_records(&self, table: &str, params: &FetchParams) -> GatewayResult<Envelope<Vec<Record>>> {
            if table == "employee_c" {
                return Ok(Envelope::failure("employee table offline"));
            }
            self.0.fetch_records(table, params).await
        }

        async fn get_record_by_id(&self, table: &str, id: i64, params: &FetchParams) -> GatewayResult<Envelope<Record>> {
            self.0.get_record_by_id(table, id, params).await
        }

        async fn create_records(&self, table: &str, payload: &WritePayload) -> GatewayResult<Envelope<Value>> {
            self.0.create_records(table, payload).await
        }

        async fn update_records(&self, table: &str, payload: &WritePayload) -> GatewayResult<Envelope<Value>> {
            self.0.update_records(table, payload).await
        }

        async fn delete_records(&self, table: &str, payload: &DeletePayload) -> GatewayResult<Envelope<Value>> {
            self.0.delete_records(table, payload).await
        }
    }

    #[tokio::test]
    async fn failed_lookup_fails_the_load() {
        let store = Arc::new(MemoryTransport::new());
        store.insert("payment_c", json!({"Name": "Bonus", "amount_c": 10}));
        let mut view: ListView<Payment> = ListView::new(RecordGateway::new(Arc::new(NoEmployees(store))));
        view.load().await;
        assert!(matches!(view.state(), LoadState::Failed(_)));
        assert!(view.records().is_empty());
    }

    #[test]
    fn blank_filter_values_mean_any() {
        let filter: EmployeeFilter =
            serde_json::from_value(json!({"query": "", "status": "", "department": " "})).unwrap();
        assert_eq!(filter, EmployeeFilter::default());
        assert!(serde_json::from_value::<EmployeeFilter>(json!({"status": "Retired"})).is_err());
    }
}
