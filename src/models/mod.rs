// Module exports for models

pub mod day;
pub mod intent;
pub mod settings;
pub mod task;
