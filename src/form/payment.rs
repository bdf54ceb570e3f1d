use super::{one_of, require, FieldErrors, Form};
use crate::entity::coerce::parse_float;
use crate::entity::{dates, Payment, PaymentDraft, PaymentStatus};

impl Form for Payment {
    fn blank() -> PaymentDraft {
        PaymentDraft {
            status: PaymentStatus::Pending.to_string(),
            ..Default::default()
        }
    }

    fn seed(&self) -> PaymentDraft {
        PaymentDraft {
            name: self.name.clone(),
            tags: self.tags.clone(),
            employee_id: self.employee.id_text(),
            payment_date: dates::to_date_input(&self.payment_date),
            amount: self.amount.map(|a| a.to_string()).unwrap_or_default(),
            status: self
                .status
                .unwrap_or(PaymentStatus::Pending)
                .to_string(),
            reason: self.reason.clone(),
        }
    }

    fn validate(draft: &PaymentDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &draft.name, "Payment name is required");
        require(&mut errors, "employee_id", &draft.employee_id, "Employee is required");
        require(&mut errors, "payment_date", &draft.payment_date, "Payment date is required");
        if !parse_float(&draft.amount).is_some_and(|a| a > 0.0) {
            errors.insert("amount".to_string(), "Valid amount is required".to_string());
        }
        require(&mut errors, "status", &draft.status, "Status is required");
        one_of::<PaymentStatus>(&mut errors, "status", &draft.status, "Invalid status");
        errors
    }
}
