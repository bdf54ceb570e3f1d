use super::EntityService;
use crate::entity::{dates, Attendance};

impl EntityService<Attendance> {
    pub async fn get_by_employee(&self, employee_id: i64) -> Vec<Attendance> {
        self.filter_by("employee_id_c", employee_id).await
    }

    /// Rows for one calendar day; the date is normalized to `YYYY-MM-DD`
    pub async fn get_by_date(&self, date: &str) -> Vec<Attendance> {
        let day = dates::to_date_input(date);
        let day = if day.is_empty() { date.trim().to_string() } else { day };
        self.filter_by("date_c", day).await
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::memory::MemoryTransport;
    use crate::gateway::RecordGateway;
    use crate::service::AttendanceService;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn by_employee_and_by_day() {
        let store = Arc::new(MemoryTransport::new());
        store.insert("attendance_c", json!({"employee_id_c": 1, "date_c": "2024-06-10", "status_c": "Present"}));
        store.insert("attendance_c", json!({"employee_id_c": 1, "date_c": "2024-06-11", "status_c": "Late"}));
        store.insert("attendance_c", json!({"employee_id_c": 2, "date_c": "2024-06-10", "status_c": "Absent"}));
        let service = AttendanceService::new(RecordGateway::new(store));

        let rows = service.get_by_employee(1).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-06-11");

        let day = service.get_by_date("2024-06-10T08:00:00.000Z").await;
        assert_eq!(day.len(), 2);
    }
}
