use super::{one_of, require, FieldErrors, Form};
use crate::entity::{dates, Employee, EmployeeDraft, EmployeeStatus};
use crate::view::EmployeeDirectory;

impl Form for Employee {
    const VIEWABLE: bool = true;

    fn blank() -> EmployeeDraft {
        EmployeeDraft {
            status: EmployeeStatus::Active.to_string(),
            ..Default::default()
        }
    }

    fn seed(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            photo_url: self.photo_url.clone(),
            department: self.department.clone(),
            role: self.role.clone(),
            hire_date: dates::to_date_input(&self.hire_date),
            salary: self.salary.map(|s| s.to_string()).unwrap_or_default(),
            status: self.status.map(|s| s.to_string()).unwrap_or_default(),
            address_street: self.address_street.clone(),
            address_city: self.address_city.clone(),
            address_state: self.address_state.clone(),
            address_zip_code: self.address_zip_code.clone(),
            emergency_contact_name: self.emergency_contact_name.clone(),
            emergency_contact_relationship: self.emergency_contact_relationship.clone(),
            emergency_contact_phone: self.emergency_contact_phone.clone(),
        }
    }

    fn validate(draft: &EmployeeDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", &draft.first_name, "First name is required");
        require(&mut errors, "last_name", &draft.last_name, "Last name is required");
        require(&mut errors, "email", &draft.email, "Email is required");
        one_of::<EmployeeStatus>(&mut errors, "status", &draft.status, "Invalid status");
        errors
    }

    /// Hire date becomes an ISO timestamp; missing or invalid dates become now
    fn prepare(mut draft: EmployeeDraft, _: &EmployeeDirectory) -> EmployeeDraft {
        draft.hire_date = dates::to_iso(&draft.hire_date).unwrap_or_else(dates::now_iso);
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hire_date_defaults_to_now() {
        let draft = EmployeeDraft {
            hire_date: "soon".to_string(),
            ..Default::default()
        };
        let prepared = Employee::prepare(draft, &EmployeeDirectory::default());
        assert!(dates::parse_timestamp(&prepared.hire_date).is_some());

        let draft = EmployeeDraft {
            hire_date: "2021-03-04".to_string(),
            ..Default::default()
        };
        let prepared = Employee::prepare(draft, &EmployeeDirectory::default());
        assert_eq!(prepared.hire_date, "2021-03-04T00:00:00.000Z");
    }

    #[test]
    fn names_and_email_required() {
        let errors = Employee::validate(&EmployeeDraft::default());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["email"], "Email is required");
    }

    #[test]
    fn status_must_be_a_known_label() {
        let mut draft = Employee::blank();
        draft.status = "Retired".to_string();
        assert_eq!(Employee::validate(&draft)["status"], "Invalid status");
        draft.status = "On Leave".to_string();
        assert!(!Employee::validate(&draft).contains_key("status"));
    }
}
