// Settings module
// Planner grid and gesture configuration

use serde::{Deserialize, Serialize};

use crate::utils::time::{time_to_minutes, Minutes, TimeError, TimeWindow, DEFAULT_GRID_MINUTES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// First visible time on the grid ("HH:MM")
    pub window_start: String,
    /// Last visible time on the grid ("HH:MM")
    pub window_end: String,
    /// Snapping unit for create and resize gestures
    pub grid_minutes: Minutes,
    /// Upper bound for a resized task
    pub max_duration_minutes: Minutes,
    /// Pointer travel before a press becomes a move gesture
    pub drag_activation_px: f32,
    /// Horizontal inset between side-by-side cards
    pub gutter_px: f32,
    /// Rendered height of one hour on the grid
    pub hour_height_px: f32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            window_start: "06:00".to_string(),
            window_end: "22:00".to_string(),
            grid_minutes: DEFAULT_GRID_MINUTES,
            max_duration_minutes: 480,
            drag_activation_px: 8.0,
            gutter_px: 2.0,
            hour_height_px: 60.0,
        }
    }
}

impl PlannerSettings {
    pub fn window(&self) -> Result<TimeWindow, TimeError> {
        Ok(TimeWindow::new(
            time_to_minutes(&self.window_start)?,
            time_to_minutes(&self.window_end)?,
        ))
    }

    pub fn validate(&self) -> Result<(), String> {
        let window = self.window().map_err(|e| e.to_string())?;
        if window.is_empty() {
            return Err("Window end must be after window start".to_string());
        }

        if self.grid_minutes <= 0 || self.grid_minutes > 60 {
            return Err("Grid size must be between 1 and 60 minutes".to_string());
        }

        if self.max_duration_minutes < self.grid_minutes {
            return Err("Maximum duration must be at least one grid step".to_string());
        }

        if self.drag_activation_px < 0.0 || self.gutter_px < 0.0 {
            return Err("Pixel distances cannot be negative".to_string());
        }

        if self.hour_height_px <= 0.0 {
            return Err("Hour height must be positive".to_string());
        }

        Ok(())
    }
}
