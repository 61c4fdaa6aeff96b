//! Pointer gesture controllers for the calendar grid.
//!
//! Each gesture is a small state value owned by its manager and changed only
//! through the manager's methods. [`CalendarController`] bundles the three
//! managers for a view and makes sure at most one gesture runs at a time.

pub mod capture;
pub mod create;
pub mod drag;
pub mod resize;

pub use capture::CaptureGuard;
pub use create::{CreateManager, CreateOutcome, CreationDraft, DraftPreview, PointerTarget};
pub use drag::{DragContext, DragManager, DropOutcome, DropTarget, PickRejection};
pub use resize::{ResizeContext, ResizeManager, ResizeOutcome};

use chrono::NaiveDate;
use egui::{Pos2, Rect};

use crate::models::settings::PlannerSettings;
use crate::models::task::ScheduledTask;
use crate::utils::time::TimeError;

/// Which gesture currently owns the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveGesture {
    Create,
    Resize,
    Move,
}

/// Gesture state for one calendar view
#[derive(Debug)]
pub struct CalendarController {
    pub create: CreateManager,
    pub resize: ResizeManager,
    pub drag: DragManager,
}

impl CalendarController {
    pub fn new(settings: &PlannerSettings) -> Result<Self, TimeError> {
        Ok(Self {
            create: CreateManager::from_settings(settings)?,
            resize: ResizeManager::from_settings(settings),
            drag: DragManager::from_settings(settings)?,
        })
    }

    pub fn active_gesture(&self) -> Option<ActiveGesture> {
        if self.create.is_active() {
            Some(ActiveGesture::Create)
        } else if self.resize.is_active() {
            Some(ActiveGesture::Resize)
        } else if self.drag.is_active() {
            Some(ActiveGesture::Move)
        } else {
            None
        }
    }

    /// Press on empty grid space
    pub fn begin_create(
        &mut self,
        day: NaiveDate,
        pointer: Pos2,
        container: Rect,
        target: PointerTarget,
        capture: CaptureGuard,
    ) -> bool {
        if self.active_gesture().is_some() {
            return false;
        }
        self.create.pointer_down(day, pointer, container, target, capture)
    }

    /// Press on a task's resize handle
    pub fn begin_resize(
        &mut self,
        task: &ScheduledTask,
        day: NaiveDate,
        card_rect: Rect,
        pointer: Pos2,
        capture: CaptureGuard,
    ) -> bool {
        if self.active_gesture().is_some() {
            return false;
        }
        self.resize.pointer_down(task, day, card_rect, pointer, capture)
    }

    /// Press on a task card body
    pub fn begin_move(
        &mut self,
        task: &ScheduledTask,
        day: NaiveDate,
        pointer: Pos2,
        capture: CaptureGuard,
    ) -> Result<(), PickRejection> {
        if self.active_gesture().is_some() {
            return Err(PickRejection::GestureInProgress);
        }
        self.drag.pointer_down(task, day, pointer, capture)
    }

    /// Abort whatever is running (view unmounted). Nothing is emitted.
    pub fn cancel_all(&mut self) {
        let gesture = self.active_gesture();
        self.create.cancel();
        self.resize.cancel();
        self.drag.cancel();
        if let Some(gesture) = gesture {
            log::debug!("cancelled active {:?} gesture", gesture);
        }
    }
}
