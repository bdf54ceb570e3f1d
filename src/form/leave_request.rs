use super::{one_of, require, FieldErrors, Form};
use crate::entity::coerce::parse_int;
use crate::entity::{dates, LeaveRequest, LeaveRequestDraft, LeaveStatus, LeaveType};
use crate::view::EmployeeDirectory;

impl Form for LeaveRequest {
    const NEEDS_DIRECTORY: bool = true;

    fn blank() -> LeaveRequestDraft {
        LeaveRequestDraft {
            status: LeaveStatus::Pending.to_string(),
            ..Default::default()
        }
    }

    fn seed(&self) -> LeaveRequestDraft {
        LeaveRequestDraft {
            name: self.name.clone(),
            employee_id: self.employee.id_text(),
            start_date: dates::to_date_input(&self.start_date),
            end_date: dates::to_date_input(&self.end_date),
            kind: self.kind.map(|k| k.to_string()).unwrap_or_default(),
            reason: self.reason.clone(),
            status: self.status.map(|s| s.to_string()).unwrap_or_default(),
            approved_by: self.approved_by.clone(),
            request_date: self.request_date.clone(),
        }
    }

    fn validate(draft: &LeaveRequestDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "employee_id", &draft.employee_id, "Employee is required");
        require(&mut errors, "start_date", &draft.start_date, "Start date is required");
        require(&mut errors, "end_date", &draft.end_date, "End date is required");
        require(&mut errors, "type", &draft.kind, "Leave type is required");
        one_of::<LeaveType>(&mut errors, "type", &draft.kind, "Invalid leave type");
        one_of::<LeaveStatus>(&mut errors, "status", &draft.status, "Invalid status");
        require(&mut errors, "reason", &draft.reason, "Reason is required");

        let both = !draft.start_date.trim().is_empty() && !draft.end_date.trim().is_empty();
        if both && !dates::is_strictly_after(&draft.start_date, &draft.end_date) {
            errors.insert(
                "end_date".to_string(),
                "End date must be after start date".to_string(),
            );
        }
        errors
    }

    /// Name after the employee and leave type; dates as ISO timestamps
    fn prepare(mut draft: LeaveRequestDraft, directory: &EmployeeDirectory) -> LeaveRequestDraft {
        let employee = parse_int(&draft.employee_id)
            .and_then(|id| directory.get(id))
            .map(|e| if e.name.trim().is_empty() { e.full_name() } else { e.name.clone() })
            .unwrap_or_else(|| "Unknown".to_string());
        draft.name = format!("{} - {} Leave", employee, draft.kind);
        draft.start_date = dates::to_iso(&draft.start_date).unwrap_or(draft.start_date);
        draft.end_date = dates::to_iso(&draft.end_date).unwrap_or(draft.end_date);
        if draft.request_date.trim().is_empty() {
            draft.request_date = dates::now_iso();
        }
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Employee;
    use serde_json::json;

    fn draft(start: &str, end: &str) -> LeaveRequestDraft {
        LeaveRequestDraft {
            employee_id: "3".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            kind: "Vacation".to_string(),
            reason: "Family trip".to_string(),
            ..LeaveRequest::blank()
        }
    }

    #[test]
    fn end_must_follow_start() {
        assert!(LeaveRequest::validate(&draft("2024-06-10", "2024-06-12")).is_empty());
        let same_day = LeaveRequest::validate(&draft("2024-06-10", "2024-06-10"));
        assert_eq!(same_day["end_date"], "End date must be after start date");
        let missing = LeaveRequest::validate(&draft("2024-06-10", ""));
        assert_eq!(missing["end_date"], "End date is required");
    }

    #[test]
    fn type_and_status_must_be_known_labels() {
        let mut holiday = draft("2024-06-10", "2024-06-12");
        holiday.kind = "Holiday".to_string();
        holiday.status = "Maybe".to_string();
        let errors = LeaveRequest::validate(&holiday);
        assert_eq!(errors["type"], "Invalid leave type");
        assert_eq!(errors["status"], "Invalid status");

        holiday.kind = "Paternity".to_string();
        holiday.status = String::new();
        assert!(LeaveRequest::validate(&holiday).is_empty());
    }

    #[test]
    fn prepared_name_uses_employee() {
        let jane: Employee = serde_json::from_value(json!({"Id": 3, "Name": "Jane Doe"})).unwrap();
        let directory = EmployeeDirectory::new(vec![jane]);
        let prepared = LeaveRequest::prepare(draft("2024-06-10", "2024-06-12"), &directory);
        assert_eq!(prepared.name, "Jane Doe - Vacation Leave");
        assert_eq!(prepared.start_date, "2024-06-10T00:00:00.000Z");
        assert!(!prepared.request_date.is_empty());

        let unknown = LeaveRequest::prepare(draft("2024-06-10", "2024-06-12"), &EmployeeDirectory::default());
        assert_eq!(unknown.name, "Unknown - Vacation Leave");
    }
}
