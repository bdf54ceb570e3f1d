use super::{require, FieldErrors, Form};
use crate::entity::{dates, Attendance, AttendanceDraft};

impl Form for Attendance {
    fn seed(&self) -> AttendanceDraft {
        AttendanceDraft {
            name: self.name.clone(),
            employee_id: self.employee.id_text(),
            date: dates::to_date_input(&self.date),
            check_in: self.check_in.clone(),
            check_out: self.check_out.clone(),
            status: self.status.clone(),
            notes: self.notes.clone(),
        }
    }

    fn validate(draft: &AttendanceDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "employee_id", &draft.employee_id, "Employee is required");
        require(&mut errors, "date", &draft.date, "Date is required");
        errors
    }
}
