//! Form modals
//!
//! A [`FormModal`] collects one record's editable fields, validates them and
//! submits through the entity service. It is either closed or open in one
//! of three modes; view mode is read-only. Validation errors are keyed by
//! field name and block submission without touching the network.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

use crate::entity::Entity;
use crate::service::{EntityService, ServiceError};
use crate::view::EmployeeDirectory;

mod activity;
mod attendance;
mod department;
mod employee;
mod leave_request;
mod payment;
mod penalty;

/// Field name -> message
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit,
    View,
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Form is not open")]
    NotOpen,

    #[error("Form is read-only")]
    ReadOnly,

    #[error("Form is being submitted")]
    Busy,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{0} records cannot be opened for viewing")]
    ViewUnsupported(&'static str),

    #[error("Please fix the highlighted fields")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Form behavior of an entity
pub trait Form: Entity {
    /// Whether records can be opened read-only
    const VIEWABLE: bool = false;
    /// Whether `prepare` needs the employee directory
    const NEEDS_DIRECTORY: bool = false;

    /// Field values of a fresh create form
    fn blank() -> Self::Draft {
        Self::Draft::default()
    }

    /// Field values for editing `self`, dates reformatted for input
    fn seed(&self) -> Self::Draft;

    fn validate(draft: &Self::Draft) -> FieldErrors;

    /// Final shaping of a valid draft before it is sent
    fn prepare(draft: Self::Draft, _directory: &EmployeeDirectory) -> Self::Draft {
        draft
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenForm<D> {
    pub mode: FormMode,
    pub id: Option<i64>,
    pub fields: D,
    pub errors: FieldErrors,
    pub loading: bool,
}

#[derive(Debug, Clone)]
enum ModalState<D> {
    Closed,
    Open(OpenForm<D>),
}

pub struct FormModal<E: Form> {
    state: ModalState<E::Draft>,
}

impl<E: Form> Default for FormModal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Form> FormModal<E> {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }

    pub fn open_create(&mut self) {
        self.open(FormMode::Create, None, E::blank());
    }

    pub fn open_edit(&mut self, record: &E) {
        self.open(FormMode::Edit, Some(record.id()), record.seed());
    }

    pub fn open_view(&mut self, record: &E) -> Result<(), FormError> {
        if !E::VIEWABLE {
            return Err(FormError::ViewUnsupported(E::LABEL));
        }
        self.open(FormMode::View, Some(record.id()), record.seed());
        Ok(())
    }

    fn open(&mut self, mode: FormMode, id: Option<i64>, fields: E::Draft) {
        self.state = ModalState::Open(OpenForm {
            mode,
            id,
            fields,
            errors: FieldErrors::new(),
            loading: false,
        });
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn form(&self) -> Option<&OpenForm<E::Draft>> {
        match &self.state {
            ModalState::Open(form) => Some(form),
            ModalState::Closed => None,
        }
    }

    fn editable(&mut self) -> Result<&mut OpenForm<E::Draft>, FormError> {
        let ModalState::Open(form) = &mut self.state else {
            return Err(FormError::NotOpen);
        };
        if form.mode == FormMode::View {
            return Err(FormError::ReadOnly);
        }
        if form.loading {
            return Err(FormError::Busy);
        }
        Ok(form)
    }

    /// Change one field and clear its error
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let form = self.editable()?;
        let mut fields = match serde_json::to_value(&form.fields) {
            Ok(Value::Object(map)) => map,
            _ => return Err(FormError::UnknownField(name.to_string())),
        };
        if !fields.contains_key(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        fields.insert(name.to_string(), Value::String(value.into()));
        form.fields = serde_json::from_value(Value::Object(fields))
            .map_err(|_| FormError::UnknownField(name.to_string()))?;
        form.errors.remove(name);
        Ok(())
    }

    /// Apply every entry of a JSON object as a field edit
    pub fn set_fields(&mut self, values: &serde_json::Map<String, Value>) -> Result<(), FormError> {
        for (name, value) in values {
            self.set_field(name, field_text(value))?;
        }
        Ok(())
    }

    /// Run validation, recording errors on the form
    pub fn validate(&mut self) -> Result<bool, FormError> {
        let form = self.editable()?;
        form.errors = E::validate(&form.fields);
        Ok(form.errors.is_empty())
    }

    /// Validate and send; a successful submit closes the form
    pub async fn submit(
        &mut self,
        service: &EntityService<E>,
        directory: &EmployeeDirectory,
    ) -> Result<E, FormError> {
        let form = self.editable()?;
        let errors = E::validate(&form.fields);
        if !errors.is_empty() {
            form.errors = errors.clone();
            return Err(FormError::Invalid(errors));
        }
        form.errors.clear();
        form.loading = true;

        let draft = E::prepare(form.fields.clone(), directory);
        let result = match form.id {
            Some(id) => service.update(id, &draft).await,
            None => service.create(&draft).await,
        };

        match result {
            Ok(record) => {
                self.close();
                Ok(record)
            }
            Err(e) => {
                tracing::error!("Failed to save {}: {}", E::LABEL, e);
                if let ModalState::Open(form) = &mut self.state {
                    form.loading = false;
                }
                Err(FormError::Service(e))
            }
        }
    }
}

/// Text of a submitted JSON value as a form input would hold it
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => map.get("Id").map(field_text).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Error when `value` is blank after trimming
pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

/// Error when a non-blank `value` is not one of the labels of `T`
pub(crate) fn one_of<T: FromStr>(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if !value.trim().is_empty() && value.parse::<T>().is_err() {
        errors.insert(field.to_string(), message.to_string());
    }
}
