use super::{one_of, require, FieldErrors, Form};
use crate::entity::{dates, Activity, ActivityDraft, ActivityType};

impl Form for Activity {
    const VIEWABLE: bool = true;

    fn seed(&self) -> ActivityDraft {
        ActivityDraft {
            name: self.name.clone(),
            kind: self.kind.map(|k| k.to_string()).unwrap_or_default(),
            description: self.description.clone(),
            activity_date: dates::to_datetime_input(&self.activity_date),
            employee_id: self.employee.id_text(),
        }
    }

    fn validate(draft: &ActivityDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &draft.name, "Activity name is required");
        require(&mut errors, "type", &draft.kind, "Activity type is required");
        one_of::<ActivityType>(&mut errors, "type", &draft.kind, "Invalid activity type");
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_is_required_and_known() {
        let mut draft = ActivityDraft {
            name: "Quarterly review".to_string(),
            ..Default::default()
        };
        assert_eq!(Activity::validate(&draft)["type"], "Activity type is required");
        draft.kind = "Lunch".to_string();
        assert_eq!(Activity::validate(&draft)["type"], "Invalid activity type");
        draft.kind = "Meeting".to_string();
        assert!(Activity::validate(&draft).is_empty());
    }
}
