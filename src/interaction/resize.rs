// Event Resize System
//
// Enables resizing tasks by dragging the handle on their bottom edge.
// - Vertical pointer travel is converted to minutes and snapped to the grid
// - Every move emits a preview intent; only the release is authoritative

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};

use super::capture::CaptureGuard;
use crate::models::intent::ScheduleIntent;
use crate::models::settings::PlannerSettings;
use crate::models::task::ScheduledTask;
use crate::utils::time::{clamp, pixels_to_minutes, Minutes};

/// Size of the resize handle hit area
pub const HANDLE_SIZE: f32 = 8.0;

/// Hit zone for the bottom-edge handle of a task card.
///
/// Small cards split in half so a click near the top still moves the card;
/// larger cards get a fixed strip along the bottom edge.
pub fn handle_rect(card_rect: Rect) -> Rect {
    let zone_height = if card_rect.height() < 2.0 * HANDLE_SIZE {
        card_rect.height() / 2.0
    } else {
        HANDLE_SIZE
    };
    Rect::from_min_size(
        Pos2::new(card_rect.left(), card_rect.bottom() - zone_height),
        Vec2::new(card_rect.width(), zone_height),
    )
}

/// Whether a pointer is over a card's resize handle
pub fn hit_test(card_rect: Rect, pointer: Pos2) -> bool {
    handle_rect(card_rect).contains(pointer)
}

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeContext {
    /// The task being resized, as it was when the gesture began
    pub task: ScheduledTask,
    pub day: NaiveDate,
    /// Card height in pixels at gesture start
    pub initial_height: f32,
    /// Pointer y at gesture start
    pub origin_y: f32,
    /// Accumulated vertical travel
    pub delta_y: f32,
    /// Snapped duration for the current pointer position
    pub duration: Minutes,
}

#[derive(Debug)]
enum ResizeState {
    Idle,
    Resizing {
        context: ResizeContext,
        _capture: CaptureGuard,
    },
}

/// How a resize gesture ended
#[derive(Clone, Debug, PartialEq)]
pub enum ResizeOutcome {
    Committed(ScheduleIntent),
    /// Gesture discarded; the task is returned so the host can undo any
    /// optimistic preview
    Cancelled { task: ScheduledTask, day: NaiveDate },
    Inactive,
}

/// Manager for resize operations
#[derive(Debug)]
pub struct ResizeManager {
    grid_minutes: Minutes,
    max_duration_minutes: Minutes,
    hour_height: f32,
    state: ResizeState,
}

impl ResizeManager {
    pub fn new(grid_minutes: Minutes, max_duration_minutes: Minutes, hour_height: f32) -> Self {
        Self {
            grid_minutes,
            max_duration_minutes,
            hour_height,
            state: ResizeState::Idle,
        }
    }

    pub fn from_settings(settings: &PlannerSettings) -> Self {
        Self::new(
            settings.grid_minutes,
            settings.max_duration_minutes,
            settings.hour_height_px,
        )
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    pub fn active(&self) -> Option<&ResizeContext> {
        match &self.state {
            ResizeState::Resizing { context, .. } => Some(context),
            ResizeState::Idle => None,
        }
    }

    /// Check if resizing a specific task
    pub fn is_resizing_task(&self, task_id: &str) -> bool {
        self.active().is_some_and(|context| context.task.id == task_id)
    }

    /// Begin a resize from the bottom handle of `card_rect`
    pub fn pointer_down(
        &mut self,
        task: &ScheduledTask,
        day: NaiveDate,
        card_rect: Rect,
        pointer: Pos2,
        capture: CaptureGuard,
    ) -> bool {
        if self.is_active() {
            return false;
        }

        let initial_height = card_rect.height();
        let duration = self.snapped_duration(initial_height);
        log::debug!("resize started for task {} ({} px)", task.id, initial_height);
        self.state = ResizeState::Resizing {
            context: ResizeContext {
                task: task.clone(),
                day,
                initial_height,
                origin_y: pointer.y,
                delta_y: 0.0,
                duration,
            },
            _capture: capture,
        };
        true
    }

    /// Track pointer travel and emit a live preview
    pub fn pointer_move(&mut self, pointer: Pos2) -> Option<ScheduleIntent> {
        let grid = self.grid_minutes;
        let max = self.max_duration_minutes;
        let hour_height = self.hour_height;
        let ResizeState::Resizing { context, .. } = &mut self.state else {
            return None;
        };

        context.delta_y = pointer.y - context.origin_y;
        let height = context.initial_height + context.delta_y;
        context.duration = snap_duration(height, grid, max, hour_height);
        Some(ScheduleIntent::ResizePreview {
            task: context.task.clone(),
            day: context.day,
            duration: context.duration,
        })
    }

    /// Finish the resize. `None` means the release happened outside any
    /// tracked target.
    pub fn pointer_up(&mut self, pointer: Option<Pos2>) -> ResizeOutcome {
        let Some(pointer) = pointer else {
            return self.cancel();
        };
        if self.pointer_move(pointer).is_none() {
            return ResizeOutcome::Inactive;
        }

        match std::mem::replace(&mut self.state, ResizeState::Idle) {
            ResizeState::Resizing { context, .. } => {
                log::debug!(
                    "resize committed for task {}: {} min",
                    context.task.id,
                    context.duration
                );
                ResizeOutcome::Committed(ScheduleIntent::Resize {
                    task: context.task,
                    day: context.day,
                    new_duration: context.duration,
                })
            }
            ResizeState::Idle => ResizeOutcome::Inactive,
        }
    }

    /// Cancel the resize operation
    pub fn cancel(&mut self) -> ResizeOutcome {
        match std::mem::replace(&mut self.state, ResizeState::Idle) {
            ResizeState::Resizing { context, .. } => {
                log::debug!("resize cancelled for task {}", context.task.id);
                ResizeOutcome::Cancelled {
                    task: context.task,
                    day: context.day,
                }
            }
            ResizeState::Idle => ResizeOutcome::Inactive,
        }
    }

    /// Pixel height to a grid-aligned duration within `[grid, max]`
    pub fn snapped_duration(&self, height: f32) -> Minutes {
        snap_duration(height, self.grid_minutes, self.max_duration_minutes, self.hour_height)
    }
}

fn snap_duration(height: f32, grid: Minutes, max: Minutes, hour_height: f32) -> Minutes {
    let grid = grid.max(1);
    let minutes = pixels_to_minutes(height, hour_height);
    let snapped = (minutes / grid as f32).round() as Minutes * grid;
    clamp(snapped, grid, max.max(grid))
}
