// Time-Block Planner Library
// Layout and pointer-gesture core for a time-blocked task calendar

pub mod interaction;
pub mod models;
pub mod services;
pub mod utils;
