// Parameterised tests for the time helpers
// Covers conversions at and around the visible window edges

use test_case::test_case;

use time_block_planner::utils::time::{
    minutes_to_time, pointer_y_to_minutes, snap_to_grid, time_to_minutes, TimeError, TimeWindow,
};

#[test_case("00:00" => 0)]
#[test_case("06:00" => 360)]
#[test_case("9:05" => 545; "single digit hour")]
#[test_case("12:30" => 750)]
#[test_case(" 22:00 " => 1320; "surrounding whitespace")]
fn test_parse_valid(input: &str) -> i32 {
    time_to_minutes(input).unwrap()
}

#[test_case("24:00"; "hour out of range")]
#[test_case("10:75"; "minute out of range")]
#[test_case("10-30"; "wrong separator")]
#[test_case("ten thirty"; "words")]
#[test_case(""; "empty")]
fn test_parse_invalid(input: &str) {
    assert!(matches!(time_to_minutes(input), Err(TimeError::Format { .. })));
}

#[test_case(300 => "06:00"; "before window")]
#[test_case(360 => "06:00"; "window start")]
#[test_case(725 => "12:05"; "inside")]
#[test_case(1320 => "22:00"; "window end")]
#[test_case(1400 => "22:00"; "after window")]
fn test_format_clamped(minutes: i32) -> String {
    minutes_to_time(minutes, TimeWindow::DEFAULT)
}

#[test_case(0, 5 => 0)]
#[test_case(2, 5 => 0)]
#[test_case(3, 5 => 5; "half rounds up")]
#[test_case(22, 15 => 15)]
#[test_case(23, 15 => 30)]
fn test_snap(minutes: i32, grid: i32) -> i32 {
    snap_to_grid(minutes, grid)
}

#[test]
fn test_pointer_mapping_respects_custom_window() {
    let window = TimeWindow::new(8 * 60, 12 * 60);
    // 4 hours over 480 px: 2 px per minute
    assert_eq!(pointer_y_to_minutes(0.0, 0.0, 480.0, window, 15), 480);
    assert_eq!(pointer_y_to_minutes(240.0, 0.0, 480.0, window, 15), 600);
    assert_eq!(pointer_y_to_minutes(250.0, 0.0, 480.0, window, 15), 600);
    assert_eq!(pointer_y_to_minutes(480.0, 0.0, 480.0, window, 15), 720);
}
