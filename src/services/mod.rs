// Service module exports

pub mod board;
pub mod layout;
pub mod optimizer;
pub mod settings;
