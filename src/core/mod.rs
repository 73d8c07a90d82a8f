//! Domain logic between the CLI and the storage layer.

pub mod asphalt;
pub mod calculator;
pub mod config;
pub mod context;
pub mod hours;
pub mod log;
pub mod material;
pub mod report;
pub mod trip;
pub mod usage;
