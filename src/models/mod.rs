//! Domain rows. Dates are stored as `YYYY-MM-DD`, times as `HH:MM`.

pub mod asphalt;
pub mod asphalt_class;
pub mod catalog;
pub mod material;
pub mod material_type;
pub mod material_unit;
pub mod project;
pub mod vehicle;
pub mod worker;
pub mod worker_status;

pub use asphalt::{AsphaltDelivery, AsphaltDeliveryUpdate, NewAsphaltDelivery};
pub use asphalt_class::AsphaltClass;
pub use catalog::{
    CatalogMaterial, CatalogMaterialUpdate, MaterialUsage, NewCatalogMaterial, NewMaterialUsage,
    UsageTotals,
};
pub use material::{Material, MaterialUpdate, NewMaterial};
pub use material_type::MaterialType;
pub use material_unit::MaterialUnit;
pub use project::{NewProject, Project, ProjectUpdate};
pub use vehicle::{NewTrip, NewVehicle, TRIP_PURPOSES, Trip, TripUpdate, Vehicle, VehicleUpdate};
pub use worker::{HoursTotals, NewWorkerHours, Worker, WorkerHours, WorkerUpdate};
pub use worker_status::WorkerStatus;

/// Fresh opaque id: random 128-bit token rendered as a string.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
