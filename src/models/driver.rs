use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    Active,
    Inactive,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "Active",
            DriverStatus::Inactive => "Inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(DriverStatus::Active),
            "inactive" => Some(DriverStatus::Inactive),
            _ => None,
        }
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<DriverStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        DriverStatus::from_str(&s).or_else(|| {
            tracing::warn!(status = %s, "Unknown driver status, treating as unrecognized");
            None
        })
    }))
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: Option<DriverStatus>,
    /// Last day the license is valid. `None` means no license is tracked.
    #[serde(default)]
    pub license_expiration: Option<NaiveDate>,
}

impl Driver {
    pub fn new(id: impl Into<String>, status: DriverStatus) -> Self {
        Self {
            id: id.into(),
            status: Some(status),
            license_expiration: None,
        }
    }

    pub fn with_license_expiration(mut self, date: NaiveDate) -> Self {
        self.license_expiration = Some(date);
        self
    }
}
