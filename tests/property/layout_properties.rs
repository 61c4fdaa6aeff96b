// Property-based tests for the column layout and time helpers
// Random day plans exercise the overlap rules and snapping laws

use proptest::prelude::*;

use time_block_planner::interaction::{CaptureGuard, CreateManager, PointerTarget, ResizeManager};
use time_block_planner::services::layout::compute_columns;
use time_block_planner::utils::time::{
    minutes_to_time, snap_to_grid, time_to_minutes, Minutes, TimeWindow,
};

use chrono::NaiveDate;
use egui::{pos2, Rect, Vec2};

fn span() -> impl Strategy<Value = (Minutes, Minutes)> {
    (360..1300i32, 5..240i32).prop_map(|(start, len)| (start, start + len))
}

fn overlaps(a: (Minutes, Minutes), b: (Minutes, Minutes)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

proptest! {
    /// Property: overlapping tasks never share a column
    #[test]
    fn prop_overlapping_tasks_get_distinct_columns(spans in prop::collection::vec(span(), 0..40)) {
        let layout = compute_columns(&spans);
        prop_assert_eq!(layout.len(), spans.len());

        for i in 0..spans.len() {
            for j in (i + 1)..spans.len() {
                if overlaps(spans[i], spans[j]) {
                    let a = layout.get(i).unwrap();
                    let b = layout.get(j).unwrap();
                    prop_assert_ne!(a.column, b.column);
                }
            }
        }
    }

    /// Property: a column always fits inside its task's width budget
    #[test]
    fn prop_column_below_max_columns(spans in prop::collection::vec(span(), 1..40)) {
        let layout = compute_columns(&spans);
        for (_, slot) in layout.iter() {
            prop_assert!(slot.max_columns >= 1);
            prop_assert!(slot.column < slot.max_columns);
        }
    }

    /// Property: disjoint tasks all render full width in column 0
    #[test]
    fn prop_non_overlapping_full_width(lengths in prop::collection::vec(5..60i32, 1..20)) {
        let mut start = 360;
        let spans: Vec<_> = lengths
            .iter()
            .map(|len| {
                let span = (start, start + len);
                start += len;
                span
            })
            .collect();

        let layout = compute_columns(&spans);
        for (_, slot) in layout.iter() {
            prop_assert_eq!(slot.column, 0);
            prop_assert_eq!(slot.max_columns, 1);
        }
    }

    /// Property: N mutually overlapping tasks use columns 0..N, each with max N
    #[test]
    fn prop_full_cluster_is_permutation(n in 1usize..12, base in 360..900i32) {
        let spans: Vec<_> = (0..n as i32).map(|i| (base + i, base + 300 - i)).collect();
        let layout = compute_columns(&spans);

        let mut columns: Vec<_> = layout.iter().map(|(_, slot)| slot.column).collect();
        columns.sort_unstable();
        prop_assert_eq!(columns, (0..n).collect::<Vec<_>>());
        for (_, slot) in layout.iter() {
            prop_assert_eq!(slot.max_columns, n);
        }
    }

    /// Property: snapping twice changes nothing
    #[test]
    fn prop_snap_idempotent(minutes in -2000..3000i32, grid in 1..60i32) {
        let once = snap_to_grid(minutes, grid);
        prop_assert_eq!(snap_to_grid(once, grid), once);
        prop_assert_eq!(once % grid, 0);
    }

    /// Property: HH:MM inside the window survives a round trip
    #[test]
    fn prop_time_round_trip(hour in 6u32..22, minute in 0u32..60) {
        let text = format!("{:02}:{:02}", hour, minute);
        let minutes = time_to_minutes(&text).unwrap();
        prop_assert_eq!(minutes_to_time(minutes, TimeWindow::DEFAULT), text);
    }

    /// Property: creation drafts do not depend on drag direction
    #[test]
    fn prop_create_drag_symmetric(a in 0.0f32..960.0, b in 0.0f32..960.0) {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let container = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(100.0, 960.0));

        let mut forward = CreateManager::new(TimeWindow::DEFAULT, 5);
        forward.pointer_down(
            day,
            pos2(0.0, a),
            container,
            PointerTarget::EmptySpace,
            CaptureGuard::detached(),
        );
        let forward_preview = forward.pointer_move(pos2(0.0, b));

        let mut backward = CreateManager::new(TimeWindow::DEFAULT, 5);
        backward.pointer_down(
            day,
            pos2(0.0, b),
            container,
            PointerTarget::EmptySpace,
            CaptureGuard::detached(),
        );
        let backward_preview = backward.pointer_move(pos2(0.0, a));

        prop_assert_eq!(forward_preview, backward_preview);
    }

    /// Property: resized durations stay on the grid within [grid, max]
    #[test]
    fn prop_resize_duration_bounded(height in -500.0f32..2000.0) {
        let manager = ResizeManager::new(5, 480, 60.0);
        let duration = manager.snapped_duration(height);
        prop_assert!((5..=480).contains(&duration));
        prop_assert_eq!(duration % 5, 0);
    }
}
