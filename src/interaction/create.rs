// Event Creation System
//
// Press on empty grid space and drag to sketch a new task.
// - The press point is the anchor; dragging up or down both work
// - Nothing is created until release; the draft is preview-only

use chrono::NaiveDate;
use egui::{Pos2, Rect};

use super::capture::CaptureGuard;
use crate::models::intent::ScheduleIntent;
use crate::models::settings::PlannerSettings;
use crate::utils::time::{minutes_to_time, pointer_y_to_minutes, Minutes, TimeError, TimeWindow};

/// What the pointer went down on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Free grid space
    EmptySpace,
    /// An existing task card
    EventCard,
    /// Areas that must never start a creation (resize handles, headers)
    NoCreateZone,
}

/// Transient state of an in-progress creation gesture
#[derive(Clone, Debug, PartialEq)]
pub struct CreationDraft {
    pub day: NaiveDate,
    /// Container bounds captured once at gesture start
    pub container_top: f32,
    pub container_height: f32,
    pub start_minutes: Minutes,
    pub current_minutes: Minutes,
}

impl CreationDraft {
    /// Normalised `(start, end)` regardless of drag direction
    pub fn bounds(&self) -> (Minutes, Minutes) {
        (
            self.start_minutes.min(self.current_minutes),
            self.start_minutes.max(self.current_minutes),
        )
    }

    /// Duration never drops below one grid step
    pub fn duration(&self, grid_minutes: Minutes) -> Minutes {
        let (start, end) = self.bounds();
        (end - start).max(grid_minutes)
    }
}

/// What the host renders while the user is dragging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraftPreview {
    pub day: NaiveDate,
    pub start_minutes: Minutes,
    pub end_minutes: Minutes,
    pub duration: Minutes,
}

#[derive(Debug)]
enum CreateState {
    Idle,
    Dragging {
        draft: CreationDraft,
        _capture: CaptureGuard,
    },
}

/// How a creation gesture ended
#[derive(Clone, Debug, PartialEq)]
pub enum CreateOutcome {
    Committed(ScheduleIntent),
    Cancelled,
    /// No gesture was in progress
    Inactive,
}

/// Drives the create gesture: `Idle -> Dragging -> {Committed | Cancelled}`
#[derive(Debug)]
pub struct CreateManager {
    window: TimeWindow,
    grid_minutes: Minutes,
    state: CreateState,
}

impl CreateManager {
    pub fn new(window: TimeWindow, grid_minutes: Minutes) -> Self {
        Self {
            window,
            grid_minutes,
            state: CreateState::Idle,
        }
    }

    pub fn from_settings(settings: &PlannerSettings) -> Result<Self, TimeError> {
        Ok(Self::new(settings.window()?, settings.grid_minutes))
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CreateState::Dragging { .. })
    }

    pub fn draft(&self) -> Option<&CreationDraft> {
        match &self.state {
            CreateState::Dragging { draft, .. } => Some(draft),
            CreateState::Idle => None,
        }
    }

    /// Start a gesture. Returns false (and releases `capture`) when the press
    /// cannot start a creation.
    pub fn pointer_down(
        &mut self,
        day: NaiveDate,
        pointer: Pos2,
        container: Rect,
        target: PointerTarget,
        capture: CaptureGuard,
    ) -> bool {
        if self.is_active() || target != PointerTarget::EmptySpace {
            log::debug!("create gesture not started on {:?}", target);
            return false;
        }

        let start_minutes = self.minutes_at(pointer.y, container.top(), container.height());
        log::debug!("create gesture started on {} at {}", day, start_minutes);
        self.state = CreateState::Dragging {
            draft: CreationDraft {
                day,
                container_top: container.top(),
                container_height: container.height(),
                start_minutes,
                current_minutes: start_minutes,
            },
            _capture: capture,
        };
        true
    }

    pub fn pointer_move(&mut self, pointer: Pos2) -> Option<DraftPreview> {
        let (window, grid) = (self.window, self.grid_minutes);
        let CreateState::Dragging { draft, .. } = &mut self.state else {
            return None;
        };

        draft.current_minutes = pointer_y_to_minutes(
            pointer.y,
            draft.container_top,
            draft.container_height,
            window,
            grid,
        );
        let preview = Self::preview_of(draft, window, grid);
        Some(preview)
    }

    /// Current preview without moving the pointer
    pub fn preview(&self) -> Option<DraftPreview> {
        self.draft()
            .map(|draft| Self::preview_of(draft, self.window, self.grid_minutes))
    }

    /// Finish the gesture. `None` means the release happened outside any
    /// tracked target, which discards the draft.
    pub fn pointer_up(&mut self, pointer: Option<Pos2>) -> CreateOutcome {
        let Some(pointer) = pointer else {
            return self.cancel();
        };
        if self.pointer_move(pointer).is_none() {
            return CreateOutcome::Inactive;
        }

        let CreateState::Dragging { draft, .. } =
            std::mem::replace(&mut self.state, CreateState::Idle)
        else {
            return CreateOutcome::Inactive;
        };

        let (start, duration) = Self::placement(&draft, self.window, self.grid_minutes);
        let intent = ScheduleIntent::Create {
            day: draft.day,
            start_time: minutes_to_time(start, self.window),
            duration,
            title: None,
        };
        log::debug!("create gesture committed: {}", intent.description());
        CreateOutcome::Committed(intent)
    }

    /// Drop the draft without emitting anything (view unmounted, escape)
    pub fn cancel(&mut self) -> CreateOutcome {
        match std::mem::replace(&mut self.state, CreateState::Idle) {
            CreateState::Dragging { draft, .. } => {
                log::debug!("create gesture on {} cancelled", draft.day);
                CreateOutcome::Cancelled
            }
            CreateState::Idle => CreateOutcome::Inactive,
        }
    }

    fn minutes_at(&self, y: f32, top: f32, height: f32) -> Minutes {
        pointer_y_to_minutes(y, top, height, self.window, self.grid_minutes)
    }

    /// Start and duration for a draft. A minimum-length draft pressed at the
    /// window end is pulled back so it still ends inside the window.
    fn placement(draft: &CreationDraft, window: TimeWindow, grid: Minutes) -> (Minutes, Minutes) {
        let (start, _) = draft.bounds();
        let duration = draft.duration(grid);
        let start = start.min(window.end - duration).max(window.start);
        (start, duration)
    }

    fn preview_of(draft: &CreationDraft, window: TimeWindow, grid: Minutes) -> DraftPreview {
        let (start, duration) = Self::placement(draft, window, grid);
        DraftPreview {
            day: draft.day,
            start_minutes: start,
            end_minutes: start + duration,
            duration,
        }
    }
}
