use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Active,
    Maintenance,
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "Active",
            VehicleStatus::Maintenance => "Maintenance",
            VehicleStatus::OutOfService => "Out of Service",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "active" => Some(VehicleStatus::Active),
            "maintenance" | "inmaintenance" => Some(VehicleStatus::Maintenance),
            "outofservice" => Some(VehicleStatus::OutOfService),
            _ => None,
        }
    }

    pub fn all() -> &'static [VehicleStatus] {
        &[
            VehicleStatus::Active,
            VehicleStatus::Maintenance,
            VehicleStatus::OutOfService,
        ]
    }
}

/// Lenient serde reader for `Vehicle::status`: accepts any spelling
/// `from_str` knows and maps everything else to `None`.
fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<VehicleStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        VehicleStatus::from_str(&s).or_else(|| {
            tracing::warn!(
                status = %s,
                expected = ?VehicleStatus::all(),
                "Unknown vehicle status, treating as unrecognized"
            );
            None
        })
    }))
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only view of a vehicle as the checker sees it.
///
/// `status` is `None` when the stored value was missing or not one of the
/// known states; such vehicles are never available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub last_inspection: Option<NaiveDate>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, status: VehicleStatus) -> Self {
        Self {
            id: id.into(),
            status: Some(status),
            last_inspection: None,
        }
    }

    pub fn with_last_inspection(mut self, date: NaiveDate) -> Self {
        self.last_inspection = Some(date);
        self
    }

    pub fn without_status(mut self) -> Self {
        self.status = None;
        self
    }
}
