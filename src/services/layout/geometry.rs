use egui::{pos2, Rect};

use super::LayoutSlot;
use crate::models::settings::PlannerSettings;
use crate::models::task::ScheduledTask;
use crate::utils::time::{minutes_to_pixels, TimeError};

/// Horizontal placement of a card as percentages of its day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub left_percent: f32,
    pub width_percent: f32,
}

impl SlotGeometry {
    pub fn for_slot(slot: LayoutSlot) -> Self {
        let width_percent = 100.0 / slot.max_columns.max(1) as f32;
        Self {
            left_percent: slot.column as f32 * width_percent,
            width_percent,
        }
    }

    /// Resolve to a screen rect inside `column_rect`, spanning `top..bottom`.
    ///
    /// `gutter` is added to the left edge and removed from the width so
    /// neighbouring cards never touch.
    pub fn to_rect(&self, column_rect: Rect, top: f32, bottom: f32, gutter: f32) -> Rect {
        let full_width = column_rect.width();
        let left = column_rect.left() + full_width * self.left_percent / 100.0 + gutter;
        let width = (full_width * self.width_percent / 100.0 - gutter).max(0.0);
        Rect::from_min_max(pos2(left, top), pos2(left + width, bottom.max(top)))
    }
}

/// Screen rect for a task card in a day column drawn from the visible window start.
pub fn task_rect(
    task: &ScheduledTask,
    slot: LayoutSlot,
    column_rect: Rect,
    settings: &PlannerSettings,
) -> Result<Rect, TimeError> {
    let window = settings.window()?;
    let (start, end) = task.span()?;
    let start = window.clamp(start);
    let end = window.clamp(end);

    let top = column_rect.top() + minutes_to_pixels(start - window.start, settings.hour_height_px);
    let bottom = column_rect.top() + minutes_to_pixels(end - window.start, settings.hour_height_px);

    Ok(slot
        .geometry()
        .to_rect(column_rect, top, bottom, settings.gutter_px))
}
