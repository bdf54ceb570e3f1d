//! Entity module - typed records of the backend tables
//!
//! Each entity declares its table, field selection and default ordering, and
//! maps its editable draft onto the generic record shape the gateway sends.

use serde::{de::DeserializeOwned, Serialize};

use crate::gateway::{OrderBy, PagingInfo, Record};

/// Enum with fixed string labels on the wire
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!("unknown {}: {}", stringify!($name), other)),
                }
            }
        }
    };
}

pub mod activity;
pub mod attendance;
pub mod coerce;
pub mod dates;
pub mod department;
pub mod employee;
pub mod leave_request;
pub mod payment;
pub mod penalty;
pub mod reference;

pub use activity::{Activity, ActivityDraft, ActivityType};
pub use attendance::{Attendance, AttendanceDraft};
pub use department::{Department, DepartmentDraft};
pub use employee::{Employee, EmployeeDraft, EmployeeStatus};
pub use leave_request::{LeaveRequest, LeaveRequestDraft, LeaveStatus, LeaveType};
pub use payment::{Payment, PaymentDraft, PaymentStatus};
pub use penalty::{Penalty, PenaltyDraft, PenaltyStatus, PenaltyType};
pub use reference::Reference;

/// Reference fields the backend expands to `{Id, Name}`: (table, field, target table)
pub const LOOKUPS: &[(&str, &str, &str)] = &[
    (activity::TABLE, "employee_id_c", employee::TABLE),
    (attendance::TABLE, "employee_id_c", employee::TABLE),
    (department::TABLE, "manager_id_c", employee::TABLE),
    (leave_request::TABLE, "employee_id_c", employee::TABLE),
    (payment::TABLE, "employee_c", employee::TABLE),
    (penalty::TABLE, "employee_id_c", employee::TABLE),
];

/// Schema descriptor and field mapper of one table
pub trait Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Backend table name
    const TABLE: &'static str;
    /// Human readable name used in log lines and notifications
    const LABEL: &'static str;
    /// Field-selection list requested on every read
    const FIELDS: &'static [&'static str];
    /// Text fields matched by `search`
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    /// Editable field set submitted by forms
    type Draft: Clone + Default + Serialize + DeserializeOwned + Send + Sync;

    fn id(&self) -> i64;

    fn default_order() -> Option<OrderBy>;

    fn paging() -> Option<PagingInfo> {
        None
    }

    /// Payload for a create, with coercions and defaults applied
    fn create_record(draft: &Self::Draft) -> Record;

    /// Payload for an update of record `id`
    fn update_record(id: i64, draft: &Self::Draft) -> Record;
}
