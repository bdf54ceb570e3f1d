use super::EntityService;
use crate::entity::Employee;

impl EntityService<Employee> {
    pub async fn filter_by_department(&self, department: &str) -> Vec<Employee> {
        self.filter_by("department_c", department).await
    }
}
