//! Column layout for overlapping tasks within a single day.
//!
//! Overlapping tasks are placed side by side using greedy interval
//! partitioning. A sweep over the tasks ordered by `(start, end)` keeps an
//! active set sorted by end time; each task takes the lowest column not used
//! by an active task, and every active member's `max_columns` grows to the
//! size of the active set. A task's width therefore reflects the densest
//! cluster it was ever part of, so a wide cluster stays uniformly narrow.

mod geometry;

pub use geometry::{task_rect, SlotGeometry};

use std::collections::{BTreeMap, BTreeSet};

use crate::models::task::ScheduledTask;
use crate::utils::time::{Minutes, TimeError};

/// Column assignment for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSlot {
    pub column: usize,
    pub max_columns: usize,
}

impl LayoutSlot {
    pub fn geometry(&self) -> SlotGeometry {
        SlotGeometry::for_slot(*self)
    }
}

/// Layout output for a day, keyed by the task's index in the input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLayout {
    slots: BTreeMap<usize, LayoutSlot>,
}

impl DayLayout {
    pub fn get(&self, index: usize) -> Option<LayoutSlot> {
        self.slots.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in input order
    pub fn iter(&self) -> impl Iterator<Item = (usize, LayoutSlot)> + '_ {
        self.slots.iter().map(|(index, slot)| (*index, *slot))
    }

    /// Widest overlap cluster in the day
    pub fn max_columns(&self) -> usize {
        self.slots.values().map(|slot| slot.max_columns).max().unwrap_or(0)
    }
}

struct ActiveEntry {
    end: Minutes,
    index: usize,
    column: usize,
}

/// Assign columns to `(start, end)` spans given in minutes.
///
/// Intervals are half-open: a span ending exactly when another starts does
/// not overlap it.
pub fn compute_columns(spans: &[(Minutes, Minutes)]) -> DayLayout {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    // stable: identical spans keep declaration order
    order.sort_by_key(|&index| spans[index]);

    let mut slots: BTreeMap<usize, LayoutSlot> = BTreeMap::new();
    let mut active: Vec<ActiveEntry> = Vec::new();
    let mut used_columns: BTreeSet<usize> = BTreeSet::new();

    for index in order {
        let (start, end) = spans[index];

        // Active set is sorted by end, so finished entries form a prefix
        let finished = active.partition_point(|entry| entry.end <= start);
        for entry in active.drain(..finished) {
            used_columns.remove(&entry.column);
        }

        let column = (0..)
            .find(|candidate| !used_columns.contains(candidate))
            .unwrap_or(used_columns.len());
        used_columns.insert(column);

        let position = active.partition_point(|entry| entry.end <= end);
        active.insert(position, ActiveEntry { end, index, column });
        slots.insert(
            index,
            LayoutSlot {
                column,
                max_columns: 1,
            },
        );

        let concurrency = active.len();
        for entry in &active {
            if let Some(slot) = slots.get_mut(&entry.index) {
                slot.max_columns = slot.max_columns.max(concurrency);
            }
        }
    }

    DayLayout { slots }
}

/// Lay out a day's tasks using their authoritative start/end times.
pub fn layout_tasks(tasks: &[ScheduledTask]) -> Result<DayLayout, TimeError> {
    let spans = tasks
        .iter()
        .map(ScheduledTask::span)
        .collect::<Result<Vec<_>, _>>()?;

    let layout = compute_columns(&spans);
    log::debug!(
        "laid out {} tasks across at most {} columns",
        layout.len(),
        layout.max_columns()
    );
    Ok(layout)
}
