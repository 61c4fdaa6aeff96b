// Task module
// Scheduled task model shared with the external optimizer

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::time::{format_minutes, time_to_minutes, Minutes, TimeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A task placed on the calendar with concrete start and end times.
///
/// `start_time`/`end_time` are authoritative for layout; `duration` is carried
/// as reported and may drift from the difference between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub id: String,
    pub title: String,
    pub duration: Minutes,
    pub energy_level: EnergyLevel,
    pub priority: Priority,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_task_id: Option<String>,
}

impl ScheduledTask {
    /// Create a task spanning `start_time` for `duration` minutes.
    ///
    /// # Examples
    /// ```
    /// use time_block_planner::models::task::ScheduledTask;
    ///
    /// let task = ScheduledTask::new("Deep work", "09:00", 90).unwrap();
    /// assert_eq!(task.end_time, "10:30");
    /// ```
    pub fn new(
        title: impl Into<String>,
        start_time: &str,
        duration: Minutes,
    ) -> Result<Self, String> {
        Self::builder()
            .title(title)
            .start_time(start_time)
            .duration(duration)
            .build()
    }

    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }

    pub fn start_minutes(&self) -> Result<Minutes, TimeError> {
        time_to_minutes(&self.start_time)
    }

    pub fn end_minutes(&self) -> Result<Minutes, TimeError> {
        time_to_minutes(&self.end_time)
    }

    /// `(start, end)` in minutes since midnight
    pub fn span(&self) -> Result<(Minutes, Minutes), TimeError> {
        Ok((self.start_minutes()?, self.end_minutes()?))
    }

    /// Length derived from the authoritative start/end times
    pub fn scheduled_length(&self) -> Result<Minutes, TimeError> {
        let (start, end) = self.span()?;
        Ok(end - start)
    }

    /// Breaks are pinned in place by the move gesture.
    pub fn is_draggable(&self) -> bool {
        !self.is_break
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Task title cannot be empty".to_string());
        }

        let (start, end) = self.span().map_err(|e| e.to_string())?;
        if end <= start {
            return Err("Task end time must be after start time".to_string());
        }

        Ok(())
    }
}

/// Builder for tasks with optional fields
pub struct TaskBuilder {
    id: Option<String>,
    title: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    duration: Option<Minutes>,
    energy_level: EnergyLevel,
    priority: Priority,
    is_break: bool,
    recurring_task_id: Option<String>,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            start_time: None,
            end_time: None,
            duration: None,
            energy_level: EnergyLevel::default(),
            priority: Priority::default(),
            is_break: false,
            recurring_task_id: None,
        }
    }

    /// Set an explicit id (a v4 uuid is generated otherwise)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start_time(mut self, time: impl Into<String>) -> Self {
        self.start_time = Some(time.into());
        self
    }

    /// Set the end time; takes precedence over `duration` for the span
    pub fn end_time(mut self, time: impl Into<String>) -> Self {
        self.end_time = Some(time.into());
        self
    }

    pub fn duration(mut self, minutes: Minutes) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn energy_level(mut self, level: EnergyLevel) -> Self {
        self.energy_level = level;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_break(mut self, is_break: bool) -> Self {
        self.is_break = is_break;
        self
    }

    pub fn recurring_task_id(mut self, id: impl Into<String>) -> Self {
        self.recurring_task_id = Some(id.into());
        self
    }

    pub fn build(self) -> Result<ScheduledTask, String> {
        let title = self.title.ok_or("Task title is required")?;
        let start_time = self.start_time.ok_or("Task start time is required")?;
        let start = time_to_minutes(&start_time).map_err(|e| e.to_string())?;

        let (end_time, duration) = match (self.end_time, self.duration) {
            (Some(end_time), duration) => {
                let end = time_to_minutes(&end_time).map_err(|e| e.to_string())?;
                (end_time, duration.unwrap_or(end - start))
            }
            (None, Some(duration)) => (format_minutes(start + duration), duration),
            (None, None) => return Err("Task end time or duration is required".to_string()),
        };

        let task = ScheduledTask {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title,
            duration,
            energy_level: self.energy_level,
            priority: self.priority,
            start_time,
            end_time,
            is_break: self.is_break,
            recurring_task_id: self.recurring_task_id,
        };

        task.validate()?;
        Ok(task)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial field update carried by an update intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_break: Option<bool>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        *self == TaskChanges::default()
    }

    /// Apply the changes to a copy of `task`, recomputing duration from the times.
    pub fn apply_to(&self, task: &ScheduledTask) -> Result<ScheduledTask, String> {
        let mut updated = task.clone();
        if let Some(ref title) = self.title {
            updated.title = title.clone();
        }
        if let Some(level) = self.energy_level {
            updated.energy_level = level;
        }
        if let Some(priority) = self.priority {
            updated.priority = priority;
        }
        if let Some(ref start) = self.start_time {
            updated.start_time = start.clone();
        }
        if let Some(ref end) = self.end_time {
            updated.end_time = end.clone();
        }
        if let Some(is_break) = self.is_break {
            updated.is_break = is_break;
        }

        updated.validate()?;
        updated.duration = updated.scheduled_length().map_err(|e| e.to_string())?;
        Ok(updated)
    }
}
