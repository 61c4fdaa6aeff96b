// Day module
// A calendar date and its tasks ordered by start time

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::task::ScheduledTask;
use crate::utils::time::Minutes;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub tasks: Vec<ScheduledTask>,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
        }
    }

    /// Build a day from an unordered task list.
    pub fn with_tasks(date: NaiveDate, tasks: Vec<ScheduledTask>) -> Self {
        let mut day = Self { date, tasks };
        day.sort();
        day
    }

    /// Stable sort by start time. Tasks with unparsable times sink to the end.
    pub fn sort(&mut self) {
        self.tasks.sort_by_key(sort_key);
    }

    /// Insert keeping start-time order; equal starts keep insertion order.
    pub fn insert(&mut self, task: ScheduledTask) {
        let key = sort_key(&task);
        let position = self.tasks.partition_point(|existing| sort_key(existing) <= key);
        self.tasks.insert(position, task);
    }

    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    pub fn find(&self, task_id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn remove(&mut self, task_id: &str) -> Option<ScheduledTask> {
        self.position(task_id).map(|index| self.tasks.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

fn sort_key(task: &ScheduledTask) -> Minutes {
    task.start_minutes().unwrap_or(Minutes::MAX)
}
