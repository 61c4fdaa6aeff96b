// Intent module
// Commands emitted by the gesture controllers for the host to apply

use chrono::NaiveDate;

use crate::models::task::{ScheduledTask, TaskChanges};
use crate::utils::time::Minutes;

/// A requested change to the schedule.
///
/// Controllers never touch the per-day task arrays themselves; they emit one
/// of these and the host decides how to apply it.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleIntent {
    Create {
        day: NaiveDate,
        start_time: String,
        duration: Minutes,
        title: Option<String>,
    },
    /// Live feedback while a resize gesture is in progress; not authoritative
    ResizePreview {
        task: ScheduledTask,
        day: NaiveDate,
        duration: Minutes,
    },
    Resize {
        task: ScheduledTask,
        day: NaiveDate,
        new_duration: Minutes,
    },
    Reschedule {
        task: ScheduledTask,
        from_day: NaiveDate,
        to_day: NaiveDate,
        new_start_time: String,
    },
    Delete {
        task: ScheduledTask,
        day: NaiveDate,
    },
    Update {
        task: ScheduledTask,
        day: NaiveDate,
        changes: TaskChanges,
    },
}

impl ScheduleIntent {
    /// Whether a persistence layer should record this intent
    pub fn is_authoritative(&self) -> bool {
        !matches!(self, ScheduleIntent::ResizePreview { .. })
    }

    /// Human-readable summary for history menus and logs
    pub fn description(&self) -> String {
        match self {
            ScheduleIntent::Create {
                title, start_time, ..
            } => format!(
                "Create task \"{}\" at {}",
                title.as_deref().unwrap_or("New Task"),
                start_time
            ),
            ScheduleIntent::ResizePreview { task, duration, .. } => {
                format!("Preview \"{}\" as {} min", task.title, duration)
            }
            ScheduleIntent::Resize {
                task, new_duration, ..
            } => format!("Resize task \"{}\" to {} min", task.title, new_duration),
            ScheduleIntent::Reschedule {
                task,
                to_day,
                new_start_time,
                ..
            } => format!(
                "Move task \"{}\" to {} {}",
                task.title, to_day, new_start_time
            ),
            ScheduleIntent::Delete { task, .. } => format!("Delete task \"{}\"", task.title),
            ScheduleIntent::Update { task, .. } => format!("Update task \"{}\"", task.title),
        }
    }
}
