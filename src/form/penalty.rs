use super::{one_of, require, FieldErrors, Form};
use crate::entity::coerce::parse_float;
use crate::entity::{dates, Penalty, PenaltyDraft, PenaltyStatus, PenaltyType};

impl Form for Penalty {
    fn blank() -> PenaltyDraft {
        PenaltyDraft {
            status: PenaltyStatus::Active.to_string(),
            ..Default::default()
        }
    }

    fn seed(&self) -> PenaltyDraft {
        PenaltyDraft {
            name: self.name.clone(),
            employee_id: self.employee.id_text(),
            date: dates::to_date_input(&self.date),
            kind: self.kind.map(|k| k.to_string()).unwrap_or_default(),
            reason: self.reason.clone(),
            amount: self.amount.map(|a| a.to_string()).unwrap_or_default(),
            status: self.status.unwrap_or(PenaltyStatus::Active).to_string(),
        }
    }

    fn validate(draft: &PenaltyDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &draft.name, "Penalty name is required");
        require(&mut errors, "employee_id", &draft.employee_id, "Employee selection is required");
        require(&mut errors, "date", &draft.date, "Date is required");
        require(&mut errors, "type", &draft.kind, "Penalty type is required");
        one_of::<PenaltyType>(&mut errors, "type", &draft.kind, "Invalid penalty type");
        one_of::<PenaltyStatus>(&mut errors, "status", &draft.status, "Invalid status");
        require(&mut errors, "reason", &draft.reason, "Reason is required");
        if !draft.amount.trim().is_empty() && parse_float(&draft.amount).is_none() {
            errors.insert("amount".to_string(), "Amount must be a valid number".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_is_optional_but_numeric() {
        let mut draft = PenaltyDraft {
            name: "Late".to_string(),
            employee_id: "1".to_string(),
            date: "2024-06-10".to_string(),
            kind: "Verbal Warning".to_string(),
            reason: "Repeated lateness".to_string(),
            ..Default::default()
        };
        assert!(Penalty::validate(&draft).is_empty());
        draft.amount = "ten".to_string();
        assert_eq!(Penalty::validate(&draft)["amount"], "Amount must be a valid number");
        draft.reason = "  ".to_string();
        assert!(Penalty::validate(&draft).contains_key("reason"));
    }

    #[test]
    fn type_and_status_must_be_known_labels() {
        let draft = PenaltyDraft {
            name: "Late".to_string(),
            employee_id: "1".to_string(),
            date: "2024-06-10".to_string(),
            kind: "Fine".to_string(),
            reason: "Repeated lateness".to_string(),
            status: "Closed".to_string(),
            ..Default::default()
        };
        let errors = Penalty::validate(&draft);
        assert_eq!(errors["type"], "Invalid penalty type");
        assert_eq!(errors["status"], "Invalid status");
    }
}
