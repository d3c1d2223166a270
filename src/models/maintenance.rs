use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub vehicle_id: String,
    pub scheduled_date: NaiveDate,
    /// Free-text progress marker, e.g. "Scheduled", "In Progress", "Completed".
    #[serde(default)]
    pub completion: Option<String>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl MaintenanceRecord {
    pub fn new(vehicle_id: impl Into<String>, scheduled_date: NaiveDate) -> Self {
        Self {
            id: None,
            vehicle_id: vehicle_id.into(),
            scheduled_date,
            completion: None,
            cost: 0.0,
            description: None,
        }
    }

    pub fn with_completion(mut self, marker: &str) -> Self {
        self.completion = Some(marker.to_string());
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// True when the record carries a non-empty marker that is not one of
    /// `finished_markers` (case-insensitive).
    pub fn is_active_hold(&self, finished_markers: &[String]) -> bool {
        match self.completion.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(marker) => !finished_markers
                .iter()
                .any(|done| done.trim().eq_ignore_ascii_case(marker)),
        }
    }
}
