use super::SnapshotProvider;
use crate::error::Result;
use crate::models::{Driver, FleetSnapshot, MaintenanceRecord, Vehicle};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Immutable in-memory fleet state. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshots {
    vehicles: HashMap<String, Vehicle>,
    drivers: HashMap<String, Driver>,
    maintenance: Vec<MaintenanceRecord>,
}

impl InMemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        self
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.drivers.insert(driver.id.clone(), driver);
        self
    }

    pub fn with_maintenance(mut self, record: MaintenanceRecord) -> Self {
        self.maintenance.push(record);
        self
    }
}

impl From<FleetSnapshot> for InMemorySnapshots {
    fn from(fleet: FleetSnapshot) -> Self {
        let store = fleet
            .vehicles
            .into_iter()
            .fold(Self::new(), |store, v| store.with_vehicle(v));
        let store = fleet
            .drivers
            .into_iter()
            .fold(store, |store, d| store.with_driver(d));
        fleet
            .maintenance
            .into_iter()
            .fold(store, |store, m| store.with_maintenance(m))
    }
}

impl SnapshotProvider for InMemorySnapshots {
    fn vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        Ok(self.vehicles.get(id).cloned())
    }

    fn driver(&self, id: &str) -> Result<Option<Driver>> {
        Ok(self.drivers.get(id).cloned())
    }

    fn maintenance_on(&self, vehicle_id: &str, date: NaiveDate) -> Result<Vec<MaintenanceRecord>> {
        Ok(self
            .maintenance
            .iter()
            .filter(|m| m.vehicle_id == vehicle_id && m.scheduled_date == date)
            .cloned()
            .collect())
    }
}
