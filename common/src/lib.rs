// Common library for shared code across the scheduler binary and tests

pub mod config;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod parser;
pub mod scheduler;
pub mod select;
pub mod telemetry;
