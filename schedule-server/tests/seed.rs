//! Demo data seeding

use chrono::NaiveDate;
use schedule_server::StoreClient;
use schedule_server::db::repository::{EmployeeRepository, ShiftRepository};
use schedule_server::seed::seed_demo_data;

#[tokio::test]
async fn seeding_is_repeatable() {
    let store = StoreClient::in_memory().await.unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

    let first = seed_demo_data(&store, date).await.unwrap();
    assert_eq!(first.employees, 10);
    assert_eq!(first.shifts, 40);

    let second = seed_demo_data(&store, date).await.unwrap();
    assert_eq!(second.employees, 10);
    assert_eq!(second.shifts, 0);

    let employees = EmployeeRepository::new(store.clone()).find_all().await.unwrap();
    assert_eq!(employees.len(), 10);
    assert_eq!(employees[0].employee_number, "EMP000");
    assert_eq!(employees[0].name, "Anders Svensson");

    let shifts = ShiftRepository::new(store).find_by_day(date).await.unwrap();
    assert_eq!(shifts.len(), 40);
    assert!(shifts.iter().all(|s| s.start.starts_with("2024-07-15")));
}
