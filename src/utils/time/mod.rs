// Time utility functions
// Conversions between "HH:MM" clock strings, minute offsets and pixels

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Minutes since midnight on a 24h local clock.
pub type Minutes = i32;

/// Default snapping unit for create/resize gestures
pub const DEFAULT_GRID_MINUTES: Minutes = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Input was not a well-formed "HH:MM" clock value
    #[error("invalid time '{input}', expected HH:MM")]
    Format { input: String },
}

/// The visible portion of a day on the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Minutes,
    pub end: Minutes,
}

impl TimeWindow {
    /// 06:00 - 22:00
    pub const DEFAULT: TimeWindow = TimeWindow {
        start: 6 * 60,
        end: 22 * 60,
    };

    pub fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> Minutes {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    pub fn contains(&self, minutes: Minutes) -> bool {
        minutes >= self.start && minutes <= self.end
    }

    /// Pull a value to the nearest window boundary
    pub fn clamp(&self, minutes: Minutes) -> Minutes {
        clamp(minutes, self.start, self.end)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bound `value` to `[min, max]`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Parse an "HH:MM" string into minutes since midnight.
///
/// # Examples
/// ```
/// use time_block_planner::utils::time::time_to_minutes;
///
/// assert_eq!(time_to_minutes("09:30").unwrap(), 570);
/// assert!(time_to_minutes("9h30").is_err());
/// ```
pub fn time_to_minutes(time: &str) -> Result<Minutes, TimeError> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| TimeError::Format {
        input: time.to_string(),
    })?;
    Ok((parsed.hour() * 60 + parsed.minute()) as Minutes)
}

/// Format minutes as "HH:MM" after clamping into the visible window.
///
/// Values outside the window are pulled to the nearest boundary, never wrapped.
pub fn minutes_to_time(total_minutes: Minutes, window: TimeWindow) -> String {
    format_minutes(window.clamp(total_minutes))
}

/// Format minutes as "HH:MM" without any clamping.
pub(crate) fn format_minutes(minutes: Minutes) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Round to the nearest multiple of `grid_size`, halves rounding up.
pub fn snap_to_grid(minutes: Minutes, grid_size: Minutes) -> Minutes {
    if grid_size <= 1 {
        return minutes;
    }
    let steps = (minutes as f64 / grid_size as f64 + 0.5).floor() as Minutes;
    steps * grid_size
}

/// Length in minutes between two "HH:MM" values.
pub fn duration_between(start: &str, end: &str) -> Result<Minutes, TimeError> {
    Ok(time_to_minutes(end)? - time_to_minutes(start)?)
}

/// Map a pointer Y coordinate inside a container onto a snapped calendar time.
///
/// The ratio is taken relative to the container captured at gesture start, so
/// pointers above or below the container resolve to the window edges.
pub fn pointer_y_to_minutes(
    client_y: f32,
    container_top: f32,
    container_height: f32,
    window: TimeWindow,
    grid_size: Minutes,
) -> Minutes {
    if container_height <= 0.0 {
        return window.start;
    }
    let ratio = clamp((client_y - container_top) / container_height, 0.0, 1.0);
    let raw = window.start as f32 + ratio * window.len() as f32;
    window.clamp(snap_to_grid(raw.round() as Minutes, grid_size))
}

/// Convert a pixel extent to minutes for a grid drawn at `hour_height` px per hour.
pub fn pixels_to_minutes(pixels: f32, hour_height: f32) -> f32 {
    if hour_height <= 0.0 {
        return 0.0;
    }
    pixels / hour_height * 60.0
}

pub fn minutes_to_pixels(minutes: Minutes, hour_height: f32) -> f32 {
    minutes as f32 / 60.0 * hour_height
}
