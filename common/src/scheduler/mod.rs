// Scheduler module for periodic menu refresh

pub mod engine;

pub use engine::{RefreshConfig, RefreshEngine};
