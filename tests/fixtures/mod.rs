// Test fixtures - reusable test data
// Provides consistent schedules across all test files

#![allow(dead_code)]

use chrono::NaiveDate;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Mar 10 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Tuesday, Mar 11 2025
    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
    }
}

/// Sample tasks for testing
pub mod tasks {
    use time_block_planner::models::task::{EnergyLevel, Priority, ScheduledTask};

    pub fn task(id: &str, start: &str, end: &str) -> ScheduledTask {
        ScheduledTask::builder()
            .id(id)
            .title(id)
            .start_time(start)
            .end_time(end)
            .build()
            .unwrap()
    }

    pub fn lunch_break() -> ScheduledTask {
        ScheduledTask::builder()
            .id("lunch")
            .title("Lunch")
            .start_time("12:00")
            .end_time("13:00")
            .energy_level(EnergyLevel::Low)
            .priority(Priority::Low)
            .is_break(true)
            .build()
            .unwrap()
    }

    /// A(09:00-10:00), B(09:30-10:30), C(10:00-11:00)
    pub fn chained_overlaps() -> Vec<ScheduledTask> {
        vec![
            task("A", "09:00", "10:00"),
            task("B", "09:30", "10:30"),
            task("C", "10:00", "11:00"),
        ]
    }

    /// Optimizer output for a small day plan
    pub const DAILY_RESPONSE: &str = r#"{"schedule": [
        {"id": "focus", "title": "Deep work", "duration": 120, "energyLevel": "high",
         "priority": "high", "startTime": "08:00", "endTime": "10:00", "isBreak": false},
        {"id": "coffee", "title": "Coffee", "duration": 15, "energyLevel": "low",
         "priority": "low", "startTime": "10:00", "endTime": "10:15", "isBreak": true},
        {"id": "email", "title": "Email", "duration": 45, "energyLevel": "low",
         "priority": "medium", "startTime": "09:30", "endTime": "10:15", "isBreak": false}
    ]}"#;
}
