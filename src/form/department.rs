use super::{require, FieldErrors, Form};
use crate::entity::{Department, DepartmentDraft};
use crate::view::EmployeeDirectory;

impl Form for Department {
    fn seed(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.clone(),
            manager_id: self.manager.id_text(),
            employee_count: self.employee_count.map(|c| c.to_string()).unwrap_or_default(),
            description: self.description.clone(),
        }
    }

    fn validate(draft: &DepartmentDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &draft.name, "Department name is required");
        require(&mut errors, "manager_id", &draft.manager_id, "Manager selection is required");
        require(&mut errors, "description", &draft.description, "Description is required");
        errors
    }

    fn prepare(mut draft: DepartmentDraft, _: &EmployeeDirectory) -> DepartmentDraft {
        draft.name = draft.name.trim().to_string();
        draft.description = draft.description.trim().to_string();
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_not_a_name() {
        let errors = Department::validate(&DepartmentDraft {
            name: "   ".to_string(),
            manager_id: "2".to_string(),
            description: "Builds things".to_string(),
            ..Default::default()
        });
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["name"]);
    }
}
