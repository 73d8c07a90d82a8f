pub mod asphalt;
pub mod catalog;
pub mod db_utils;
pub mod initialize;
pub mod log;
pub mod material_usage;
pub mod materials;
pub mod migrate;
pub mod pool;
pub mod projects;
pub mod stats;
pub mod trips;
pub mod vehicles;
pub mod worker_hours;
pub mod workers;
