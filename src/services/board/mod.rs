//! In-memory host for schedule intents.
//!
//! The gesture controllers only describe changes. `ScheduleBoard` is a
//! reference host that owns the per-day task arrays, applies intents to them
//! and records each authoritative change for undo/redo.

mod commands;

pub use commands::{BoardEdit, UndoManager};

use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use crate::models::day::Day;
use crate::models::intent::ScheduleIntent;
use crate::models::task::ScheduledTask;
use crate::services::layout::{layout_tasks, DayLayout};
use crate::utils::time::{format_minutes, time_to_minutes, Minutes};

/// Title given to tasks created by dragging on empty space
pub const DEFAULT_TASK_TITLE: &str = "New Task";

/// Latest end time a task can carry (23:59)
const LAST_MINUTE_OF_DAY: Minutes = 24 * 60 - 1;

/// Anything that can receive intents emitted by the controllers
#[cfg_attr(test, mockall::automock)]
pub trait IntentSink {
    fn apply(&mut self, intent: &ScheduleIntent) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct ScheduleBoard {
    days: BTreeMap<NaiveDate, Day>,
    history: UndoManager,
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of the given dates (e.g. with optimizer output)
    pub fn load_days(&mut self, days: Vec<Day>) {
        for mut day in days {
            day.sort();
            self.days.insert(day.date, day);
        }
        self.history.clear();
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.get(&date)
    }

    pub fn tasks_for(&self, date: NaiveDate) -> &[ScheduledTask] {
        self.days
            .get(&date)
            .map(|day| day.tasks.as_slice())
            .unwrap_or(&[])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Column layout for a date, recomputed from the current task list
    pub fn layout_for(&self, date: NaiveDate) -> Result<DayLayout> {
        layout_tasks(self.tasks_for(date))
            .with_context(|| format!("Failed to lay out tasks for {}", date))
    }

    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    /// Revert the last applied intent, returning its description
    pub fn undo(&mut self) -> Option<String> {
        let edit = self.history.undo()?.clone();
        self.restore(edit.before);
        Some(edit.description)
    }

    pub fn redo(&mut self) -> Option<String> {
        let edit = self.history.redo()?.clone();
        self.restore(edit.after);
        Some(edit.description)
    }

    fn restore(&mut self, snapshot: Vec<(NaiveDate, Option<Day>)>) {
        for (date, day) in snapshot {
            match day {
                Some(day) => {
                    self.days.insert(date, day);
                }
                None => {
                    self.days.remove(&date);
                }
            }
        }
    }

    fn snapshot(&self, dates: &[NaiveDate]) -> Vec<(NaiveDate, Option<Day>)> {
        dates
            .iter()
            .map(|date| (*date, self.days.get(date).cloned()))
            .collect()
    }

    fn day_mut(&mut self, date: NaiveDate) -> Result<&mut Day> {
        self.days
            .get_mut(&date)
            .ok_or_else(|| anyhow!("No schedule loaded for {}", date))
    }

    fn take_task(&mut self, date: NaiveDate, task_id: &str) -> Result<ScheduledTask> {
        self.day_mut(date)?
            .remove(task_id)
            .ok_or_else(|| anyhow!("Task {} not found on {}", task_id, date))
    }

    /// End time for a task starting at `start`, cut at 23:59.
    ///
    /// Returns the end and the length actually kept.
    fn fit_end(task_id: &str, start: Minutes, duration: Minutes) -> (String, Minutes) {
        let end = (start + duration).min(LAST_MINUTE_OF_DAY);
        if end - start < duration {
            log::warn!(
                "task {} cut to {} min to end by {}",
                task_id,
                end - start,
                format_minutes(LAST_MINUTE_OF_DAY)
            );
        }
        (format_minutes(end), end - start)
    }

    fn apply_create(
        &mut self,
        day: NaiveDate,
        start_time: &str,
        duration: Minutes,
        title: Option<&str>,
    ) -> Result<()> {
        let requested = time_to_minutes(start_time)?;
        // Pull late starts back so the whole duration fits before midnight
        let start = requested.min(LAST_MINUTE_OF_DAY - duration).max(0);
        if start != requested {
            log::debug!("create at {} moved to {}", start_time, format_minutes(start));
        }
        let end = (start + duration).min(LAST_MINUTE_OF_DAY);
        let task = ScheduledTask::builder()
            .title(title.unwrap_or(DEFAULT_TASK_TITLE))
            .start_time(format_minutes(start))
            .end_time(format_minutes(end))
            .duration(duration)
            .build()
            .map_err(|e| anyhow!(e))?;

        log::info!("created task {} on {} at {}", task.id, day, task.start_time);
        self.days.entry(day).or_insert_with(|| Day::new(day)).insert(task);
        Ok(())
    }

    fn apply_resize(&mut self, day: NaiveDate, task_id: &str, new_duration: Minutes) -> Result<()> {
        let mut task = self.take_task(day, task_id)?;
        let start = task.start_minutes()?;
        let (end_time, kept) = Self::fit_end(&task.id, start, new_duration);
        task.end_time = end_time;
        task.duration = kept;
        log::info!("resized task {} to {} min", task.id, new_duration);
        self.day_mut(day)?.insert(task);
        Ok(())
    }

    fn apply_reschedule(
        &mut self,
        from_day: NaiveDate,
        to_day: NaiveDate,
        task_id: &str,
        new_start_time: &str,
    ) -> Result<()> {
        let new_start = time_to_minutes(new_start_time)?;
        let mut task = self.take_task(from_day, task_id)?;
        let length = task.scheduled_length()?;
        let (end_time, kept) = Self::fit_end(&task.id, new_start, length);
        task.start_time = format_minutes(new_start);
        task.end_time = end_time;
        if kept < length {
            task.duration = kept;
        }

        log::info!(
            "moved task {} from {} to {} {}",
            task.id,
            from_day,
            to_day,
            task.start_time
        );
        self.days
            .entry(to_day)
            .or_insert_with(|| Day::new(to_day))
            .insert(task);
        Ok(())
    }

    fn apply_intent(&mut self, intent: &ScheduleIntent) -> Result<()> {
        match intent {
            ScheduleIntent::Create {
                day,
                start_time,
                duration,
                title,
            } => self.apply_create(*day, start_time, *duration, title.as_deref()),
            // Previews only drive rendering; nothing to persist
            ScheduleIntent::ResizePreview { .. } => Ok(()),
            ScheduleIntent::Resize {
                task,
                day,
                new_duration,
            } => self.apply_resize(*day, &task.id, *new_duration),
            ScheduleIntent::Reschedule {
                task,
                from_day,
                to_day,
                new_start_time,
            } => self.apply_reschedule(*from_day, *to_day, &task.id, new_start_time),
            ScheduleIntent::Delete { task, day } => {
                self.take_task(*day, &task.id)?;
                log::info!("deleted task {} from {}", task.id, day);
                Ok(())
            }
            ScheduleIntent::Update { task, day, changes } => {
                let current = self.take_task(*day, &task.id)?;
                let updated = changes.apply_to(&current).map_err(|e| anyhow!(e))?;
                log::info!("updated task {} on {}", updated.id, day);
                self.day_mut(*day)?.insert(updated);
                Ok(())
            }
        }
    }
}

fn affected_dates(intent: &ScheduleIntent) -> Vec<NaiveDate> {
    match intent {
        ScheduleIntent::Create { day, .. }
        | ScheduleIntent::ResizePreview { day, .. }
        | ScheduleIntent::Resize { day, .. }
        | ScheduleIntent::Delete { day, .. }
        | ScheduleIntent::Update { day, .. } => vec![*day],
        ScheduleIntent::Reschedule {
            from_day, to_day, ..
        } if from_day != to_day => vec![*from_day, *to_day],
        ScheduleIntent::Reschedule { from_day, .. } => vec![*from_day],
    }
}

impl IntentSink for ScheduleBoard {
    /// Apply an intent atomically: on error the board is left unchanged.
    fn apply(&mut self, intent: &ScheduleIntent) -> Result<()> {
        if !intent.is_authoritative() {
            return Ok(());
        }

        let dates = affected_dates(intent);
        let before = self.snapshot(&dates);
        if let Err(err) = self.apply_intent(intent) {
            self.restore(before);
            log::warn!("failed to apply \"{}\": {}", intent.description(), err);
            return Err(err.context(format!("Failed to apply \"{}\"", intent.description())));
        }

        let after = self.snapshot(&dates);
        self.history.push(BoardEdit {
            description: intent.description(),
            before,
            after,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskChanges;
    use pretty_assertions::assert_eq;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
    }

    fn task(id: &str, start: &str, duration: Minutes) -> ScheduledTask {
        ScheduledTask::builder()
            .id(id)
            .title(id)
            .start_time(start)
            .duration(duration)
            .build()
            .unwrap()
    }

    fn board() -> ScheduleBoard {
        let mut board = ScheduleBoard::new();
        board.load_days(vec![Day::with_tasks(
            monday(),
            vec![task("a", "09:00", 60), task("b", "11:00", 30)],
        )]);
        board
    }

    fn ids(board: &ScheduleBoard, date: NaiveDate) -> Vec<String> {
        board.tasks_for(date).iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_create_inserts_in_order() {
        let mut board = board();
        board
            .apply(&ScheduleIntent::Create {
                day: monday(),
                start_time: "10:00".to_string(),
                duration: 45,
                title: None,
            })
            .unwrap();

        let tasks = board.tasks_for(monday());
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].title, DEFAULT_TASK_TITLE);
        assert_eq!(tasks[1].end_time, "10:45");
    }

    #[test]
    fn test_create_near_midnight_moves_start_back() {
        let mut board = board();
        board
            .apply(&ScheduleIntent::Create {
                day: monday(),
                start_time: "23:00".to_string(),
                duration: 90,
                title: Some("Late".to_string()),
            })
            .unwrap();
        let late = board.tasks_for(monday()).last().unwrap().clone();
        assert_eq!(late.start_time, "22:29");
        assert_eq!(late.end_time, "23:59");
        assert_eq!(late.duration, 90);
    }

    #[test]
    fn test_create_at_last_minute_succeeds() {
        let mut board = board();
        board
            .apply(&ScheduleIntent::Create {
                day: monday(),
                start_time: "23:59".to_string(),
                duration: 5,
                title: None,
            })
            .unwrap();
        let last = board.tasks_for(monday()).last().unwrap().clone();
        assert_eq!(last.start_time, "23:54");
        assert_eq!(last.end_time, "23:59");
        assert!(board.history().can_undo());
    }

    #[test]
    fn test_truncated_moves_and_resizes_keep_duration_in_sync() {
        let mut board = board();
        let a = board.tasks_for(monday())[0].clone();
        board
            .apply(&ScheduleIntent::Reschedule {
                task: a.clone(),
                from_day: monday(),
                to_day: tuesday(),
                new_start_time: "23:00".to_string(),
            })
            .unwrap();
        let moved = board.tasks_for(tuesday())[0].clone();
        assert_eq!(moved.end_time, "23:59");
        assert_eq!(moved.duration, 59);
        assert_eq!(moved.scheduled_length().unwrap(), moved.duration);

        board
            .apply(&ScheduleIntent::Resize {
                task: moved,
                day: tuesday(),
                new_duration: 120,
            })
            .unwrap();
        let resized = &board.tasks_for(tuesday())[0];
        assert_eq!(resized.end_time, "23:59");
        assert_eq!(resized.duration, 59);
    }

    #[test]
    fn test_resize_updates_end() {
        let mut board = board();
        let a = board.tasks_for(monday())[0].clone();
        board
            .apply(&ScheduleIntent::Resize {
                task: a,
                day: monday(),
                new_duration: 120,
            })
            .unwrap();
        let a = &board.tasks_for(monday())[0];
        assert_eq!(a.end_time, "11:00");
        assert_eq!(a.duration, 120);
    }

    #[test]
    fn test_preview_does_not_change_board() {
        let mut board = board();
        let a = board.tasks_for(monday())[0].clone();
        board
            .apply(&ScheduleIntent::ResizePreview {
                task: a,
                day: monday(),
                duration: 300,
            })
            .unwrap();
        assert_eq!(board.tasks_for(monday())[0].end_time, "10:00");
        assert!(!board.history().can_undo());
    }

    #[test]
    fn test_reschedule_across_days_keeps_length() {
        let mut board = board();
        let a = board.tasks_for(monday())[0].clone();
        board
            .apply(&ScheduleIntent::Reschedule {
                task: a,
                from_day: monday(),
                to_day: tuesday(),
                new_start_time: "14:00".to_string(),
            })
            .unwrap();

        assert_eq!(ids(&board, monday()), vec!["b"]);
        let moved = &board.tasks_for(tuesday())[0];
        assert_eq!(moved.start_time, "14:00");
        assert_eq!(moved.end_time, "15:00");
    }

    #[test]
    fn test_update_and_delete() {
        let mut board = board();
        let b = board.tasks_for(monday())[1].clone();
        board
            .apply(&ScheduleIntent::Update {
                task: b.clone(),
                day: monday(),
                changes: TaskChanges {
                    start_time: Some("08:00".to_string()),
                    end_time: Some("08:45".to_string()),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(ids(&board, monday()), vec!["b", "a"]);
        assert_eq!(board.tasks_for(monday())[0].duration, 45);

        board
            .apply(&ScheduleIntent::Delete {
                task: b,
                day: monday(),
            })
            .unwrap();
        assert_eq!(ids(&board, monday()), vec!["a"]);
    }

    #[test]
    fn test_failed_intent_leaves_board_untouched() {
        let mut board = board();
        let a = board.tasks_for(monday())[0].clone();
        let result = board.apply(&ScheduleIntent::Update {
            task: a,
            day: monday(),
            changes: TaskChanges {
                end_time: Some("08:00".to_string()),
                ..Default::default()
            },
        });
        assert!(result.is_err());
        assert_eq!(ids(&board, monday()), vec!["a", "b"]);

        let ghost = task("ghost", "09:00", 30);
        assert!(board
            .apply(&ScheduleIntent::Delete {
                task: ghost,
                day: tuesday(),
            })
            .is_err());
        assert!(!board.history().can_undo());
    }

    #[test]
    fn test_undo_redo_reschedule() {
        let mut board = board();
        let a = board.tasks_for(monday())[0].clone();
        board
            .apply(&ScheduleIntent::Reschedule {
                task: a,
                from_day: monday(),
                to_day: tuesday(),
                new_start_time: "14:00".to_string(),
            })
            .unwrap();

        assert_eq!(board.undo().as_deref(), Some("Move task \"a\" to 2025-03-11 14:00"));
        assert_eq!(ids(&board, monday()), vec!["a", "b"]);
        assert!(board.day(tuesday()).is_none());

        assert!(board.redo().is_some());
        assert_eq!(ids(&board, tuesday()), vec!["a"]);
        assert_eq!(board.redo(), None);
    }

    #[test]
    fn test_layout_for_board_day() {
        let mut board = board();
        board
            .apply(&ScheduleIntent::Create {
                day: monday(),
                start_time: "09:30".to_string(),
                duration: 30,
                title: None,
            })
            .unwrap();
        let layout = board.layout_for(monday()).unwrap();
        assert_eq!(layout.max_columns(), 2);
        assert_eq!(board.layout_for(tuesday()).unwrap().len(), 0);
    }

    #[test]
    fn test_mock_sink_receives_intent() {
        let mut sink = MockIntentSink::new();
        sink.expect_apply()
            .withf(|intent| matches!(intent, ScheduleIntent::Delete { .. }))
            .times(1)
            .returning(|_| Ok(()));

        let intent = ScheduleIntent::Delete {
            task: task("x", "09:00", 30),
            day: monday(),
        };
        sink.apply(&intent).unwrap();
    }
}
