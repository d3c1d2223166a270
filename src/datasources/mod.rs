pub mod memory;

pub use memory::InMemorySnapshots;

use crate::error::Result;
use crate::models::{Driver, MaintenanceRecord, Vehicle};
use chrono::NaiveDate;
use std::sync::Arc;

/// Read-only source of fleet state consumed by the availability checks.
///
/// Lookups return `Ok(None)` (or an empty list) for entities that do not
/// exist. `Err` is reserved for the store itself failing.
pub trait SnapshotProvider: Send + Sync {
    fn vehicle(&self, id: &str) -> Result<Option<Vehicle>>;

    fn driver(&self, id: &str) -> Result<Option<Driver>>;

    /// Maintenance records for `vehicle_id` scheduled on exactly `date`.
    fn maintenance_on(&self, vehicle_id: &str, date: NaiveDate) -> Result<Vec<MaintenanceRecord>>;
}

impl<T: SnapshotProvider + ?Sized> SnapshotProvider for &T {
    fn vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        (**self).vehicle(id)
    }

    fn driver(&self, id: &str) -> Result<Option<Driver>> {
        (**self).driver(id)
    }

    fn maintenance_on(&self, vehicle_id: &str, date: NaiveDate) -> Result<Vec<MaintenanceRecord>> {
        (**self).maintenance_on(vehicle_id, date)
    }
}

impl<T: SnapshotProvider + ?Sized> SnapshotProvider for Arc<T> {
    fn vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        (**self).vehicle(id)
    }

    fn driver(&self, id: &str) -> Result<Option<Driver>> {
        (**self).driver(id)
    }

    fn maintenance_on(&self, vehicle_id: &str, date: NaiveDate) -> Result<Vec<MaintenanceRecord>> {
        (**self).maintenance_on(vehicle_id, date)
    }
}
