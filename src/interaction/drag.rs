// Drag-to-reschedule
//
// Pick a task card up, carry it over the week grid and drop it on a
// day x hour cell. Drops resolve to whole hours.

use chrono::NaiveDate;
use egui::Pos2;
use thiserror::Error;

use super::capture::CaptureGuard;
use crate::models::intent::ScheduleIntent;
use crate::models::settings::PlannerSettings;
use crate::models::task::ScheduledTask;
use crate::utils::time::{Minutes, TimeError, TimeWindow};

/// A day x hour cell on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropTarget {
    pub day: NaiveDate,
    pub hour: u32,
}

impl DropTarget {
    pub fn new(day: NaiveDate, hour: u32) -> Self {
        Self { day, hour }
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24
    }

    /// Start time a task dropped here receives
    pub fn start_time(&self) -> String {
        format!("{:02}:00", self.hour)
    }

    pub fn start_minutes(&self) -> Minutes {
        self.hour as Minutes * 60
    }
}

/// Why a pick-up was refused. Surfaced to the user; the state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PickRejection {
    #[error("Breaks cannot be moved")]
    BreakNotMovable,
    #[error("Another gesture is already in progress")]
    GestureInProgress,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub task: ScheduledTask,
    pub from_day: NaiveDate,
    pub pointer_origin: Pos2,
    pub pointer_pos: Pos2,
    pub hovered: Option<DropTarget>,
}

impl DragContext {
    pub fn from_task(task: &ScheduledTask, from_day: NaiveDate, pointer: Pos2) -> Self {
        Self {
            task: task.clone(),
            from_day,
            pointer_origin: pointer,
            pointer_pos: pointer,
            hovered: None,
        }
    }

    pub fn travel(&self) -> f32 {
        self.pointer_origin.distance(self.pointer_pos)
    }

    /// Start time the task would get if dropped on the hovered cell
    pub fn hovered_start(&self) -> Option<String> {
        self.hovered.map(|target| target.start_time())
    }
}

#[derive(Debug)]
enum DragState {
    Idle,
    /// Pointer is down but has not travelled far enough to count as a drag
    Pressed {
        context: DragContext,
        capture: CaptureGuard,
    },
    Picked {
        context: DragContext,
        _capture: CaptureGuard,
    },
}

/// How a move gesture ended
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// Released over a cell. `None` when the drop would not change anything.
    DroppedValid(Option<ScheduleIntent>),
    /// Released outside any droppable region; the card snaps back
    DroppedInvalid,
    /// Released before the activation distance, i.e. a plain click
    Clicked,
    Cancelled,
    Inactive,
}

/// Drives the move gesture: `Idle -> Picked -> {DroppedValid | DroppedInvalid | Cancelled}`
#[derive(Debug)]
pub struct DragManager {
    activation_distance: f32,
    window: TimeWindow,
    state: DragState,
}

impl DragManager {
    pub fn new(activation_distance: f32, window: TimeWindow) -> Self {
        Self {
            activation_distance,
            window,
            state: DragState::Idle,
        }
    }

    pub fn from_settings(settings: &PlannerSettings) -> Result<Self, TimeError> {
        Ok(Self::new(settings.drag_activation_px, settings.window()?))
    }

    /// Cells whose hour starts inside the visible window
    pub fn accepts(&self, target: &DropTarget) -> bool {
        target.is_valid()
            && target.start_minutes() >= self.window.start
            && target.start_minutes() < self.window.end
    }

    /// A gesture is pending or picked
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn is_picked(&self) -> bool {
        matches!(self.state, DragState::Picked { .. })
    }

    /// The picked-up task, for the overlay that follows the pointer
    pub fn active(&self) -> Option<&DragContext> {
        match &self.state {
            DragState::Picked { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Press on a task card. Breaks are refused immediately.
    pub fn pointer_down(
        &mut self,
        task: &ScheduledTask,
        from_day: NaiveDate,
        pointer: Pos2,
        capture: CaptureGuard,
    ) -> Result<(), PickRejection> {
        if self.is_active() {
            return Err(PickRejection::GestureInProgress);
        }
        if !task.is_draggable() {
            log::warn!("refusing to move break \"{}\"", task.title);
            return Err(PickRejection::BreakNotMovable);
        }

        self.state = DragState::Pressed {
            context: DragContext::from_task(task, from_day, pointer),
            capture,
        };
        Ok(())
    }

    /// Track the pointer. Returns true while a task is picked up.
    pub fn pointer_move(&mut self, pointer: Pos2) -> bool {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Pressed {
                mut context,
                capture,
            } => {
                context.pointer_pos = pointer;
                if context.travel() >= self.activation_distance {
                    log::debug!("picked up task {} from {}", context.task.id, context.from_day);
                    self.state = DragState::Picked {
                        context,
                        _capture: capture,
                    };
                    true
                } else {
                    self.state = DragState::Pressed { context, capture };
                    false
                }
            }
            DragState::Picked {
                mut context,
                _capture,
            } => {
                context.pointer_pos = pointer;
                self.state = DragState::Picked { context, _capture };
                true
            }
            DragState::Idle => false,
        }
    }

    /// Highlight the cell under the pointer
    pub fn hover(&mut self, target: Option<DropTarget>) {
        let target = target.filter(|target| self.accepts(target));
        if let DragState::Picked { context, .. } = &mut self.state {
            context.hovered = target;
        }
    }

    /// Release the pointer over `target`, or over nothing droppable.
    pub fn pointer_up(&mut self, target: Option<DropTarget>) -> DropOutcome {
        let target = target.filter(|target| self.accepts(target));
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DropOutcome::Inactive,
            DragState::Pressed { .. } => DropOutcome::Clicked,
            DragState::Picked { context, .. } => match target {
                Some(target) => DropOutcome::DroppedValid(Self::reschedule(context, target)),
                None => {
                    log::debug!("task {} dropped outside the grid", context.task.id);
                    DropOutcome::DroppedInvalid
                }
            },
        }
    }

    pub fn cancel(&mut self) -> DropOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DropOutcome::Inactive,
            _ => DropOutcome::Cancelled,
        }
    }

    fn reschedule(context: DragContext, target: DropTarget) -> Option<ScheduleIntent> {
        // Unparsable start times always count as a change
        let same_start = context
            .task
            .start_minutes()
            .is_ok_and(|start| start == target.start_minutes());
        if target.day == context.from_day && same_start {
            log::debug!("drop of task {} onto its own slot ignored", context.task.id);
            return None;
        }

        Some(ScheduleIntent::Reschedule {
            task: context.task,
            from_day: context.from_day,
            to_day: target.day,
            new_start_time: target.start_time(),
        })
    }
}
