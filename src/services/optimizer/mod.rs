//! Boundary to the external schedule optimizer.
//!
//! The optimizer is an opaque, LLM-backed service. This module only describes
//! what is sent to it and how its answer becomes per-day task arrays.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::day::Day;
use crate::models::task::{EnergyLevel, Priority, ScheduledTask};
use crate::utils::time::{time_to_minutes, Minutes};

/// A task as entered by the user, before placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub id: String,
    pub title: String,
    pub duration: Minutes,
    pub energy_level: EnergyLevel,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanningPeriod {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerRequest {
    pub tasks: Vec<TaskInput>,
    /// Earliest start of the plan ("HH:MM")
    pub start_time: String,
    /// Free-form break preference passed through to the optimizer
    pub break_preference: String,
    pub planning_period: PlanningPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdays: Option<Vec<Weekday>>,
}

impl OptimizerRequest {
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            bail!("At least one task is required to build a schedule");
        }
        time_to_minutes(&self.start_time)
            .with_context(|| format!("Invalid plan start time '{}'", self.start_time))?;
        if let Some(task) = self.tasks.iter().find(|task| task.duration <= 0) {
            bail!("Task \"{}\" must have a positive duration", task.title);
        }
        Ok(())
    }
}

/// Either a single day's schedule or one per weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptimizerResponse {
    Daily {
        schedule: Vec<ScheduledTask>,
    },
    Weekly {
        #[serde(rename = "weeklySchedule")]
        weekly_schedule: BTreeMap<String, Vec<ScheduledTask>>,
    },
}

impl OptimizerResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse optimizer response")
    }

    /// Spread the response over calendar dates.
    ///
    /// A daily schedule lands on `anchor`; weekday names map onto the
    /// Monday-based week containing `anchor`.
    pub fn into_days(self, anchor: NaiveDate) -> Result<Vec<Day>> {
        match self {
            OptimizerResponse::Daily { schedule } => Ok(vec![Day::with_tasks(anchor, schedule)]),
            OptimizerResponse::Weekly { weekly_schedule } => {
                let monday = week_start(anchor);
                let mut days = weekly_schedule
                    .into_iter()
                    .map(|(name, tasks)| {
                        let weekday: Weekday = name.parse().map_err(|_| {
                            anyhow!("Unknown day name '{}' in weekly schedule", name)
                        })?;
                        let date = monday + Duration::days(weekday.num_days_from_monday() as i64);
                        Ok(Day::with_tasks(date, tasks))
                    })
                    .collect::<Result<Vec<_>>>()?;
                days.sort_by_key(|day| day.date);
                Ok(days)
            }
        }
    }
}

/// External collaborator that turns tasks into a placed schedule
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleOptimizer {
    fn optimize(&self, request: &OptimizerRequest) -> Result<OptimizerResponse>;
}

/// Validate, call the optimizer and lay the answer out on dates.
pub fn plan_days(
    optimizer: &dyn ScheduleOptimizer,
    request: &OptimizerRequest,
    anchor: NaiveDate,
) -> Result<Vec<Day>> {
    request.validate()?;
    let response = optimizer
        .optimize(request)
        .context("Schedule optimizer failed")?;
    let days = response.into_days(anchor)?;
    log::info!(
        "optimizer placed {} tasks over {} day(s)",
        days.iter().map(Day::len).sum::<usize>(),
        days.len()
    );
    Ok(days)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
