use super::{Driver, MaintenanceRecord, Vehicle};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A complete set of fleet entities, as read from an import file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceRecord>,
}

impl FleetSnapshot {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.drivers.is_empty() && self.maintenance.is_empty()
    }
}
